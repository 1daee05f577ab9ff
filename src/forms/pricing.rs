use serde::Deserialize;
use validator::Validate;

use crate::domain::pricing::NewDistanceTier;

#[derive(Debug, Deserialize, Validate)]
pub struct PackageForm {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PackageVariantForm {
    pub package_id: i32,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub base_price: f64,
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub security_deposit: f64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Replaces the franchise's whole distance-tier table.
#[derive(Debug, Deserialize)]
pub struct DistanceTiersForm {
    pub tiers: Vec<NewDistanceTier>,
}

fn default_true() -> bool {
    true
}
