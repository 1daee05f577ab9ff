use serde::Serialize;

use crate::domain::laundry::{LaundryBatch, LaundryItem};

#[derive(Debug, Serialize)]
pub struct LaundryBatchDetail {
    #[serde(flatten)]
    pub batch: LaundryBatch,
    pub items: Vec<LaundryItem>,
}

impl From<(LaundryBatch, Vec<LaundryItem>)> for LaundryBatchDetail {
    fn from((batch, items): (LaundryBatch, Vec<LaundryItem>)) -> Self {
        Self { batch, items }
    }
}
