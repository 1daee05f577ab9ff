use serde::Serialize;

use crate::domain::pricing::{AddonSource, Package, PackageVariant};

#[derive(Debug, Serialize)]
pub struct PackageWithVariants {
    #[serde(flatten)]
    pub package: Package,
    pub variants: Vec<PackageVariant>,
}

impl From<(Package, Vec<PackageVariant>)> for PackageWithVariants {
    fn from((package, variants): (Package, Vec<PackageVariant>)) -> Self {
        Self { package, variants }
    }
}

/// Resolved distance addon for a quoted trip.
#[derive(Debug, Serialize)]
pub struct DistanceQuote {
    pub distance_km: f64,
    pub addon: f64,
    pub source: AddonSource,
}
