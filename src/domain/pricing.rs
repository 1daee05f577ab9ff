//! Packages, variants and distance-based price additions.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Package {
    pub id: i32,
    pub franchise_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewPackage {
    pub franchise_id: i32,
    pub name: String,
    pub description: Option<String>,
}

impl NewPackage {
    pub fn new(
        franchise_id: i32,
        name: &str,
        description: Option<&str>,
    ) -> Result<Self, TypeConstraintError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self {
            franchise_id,
            name,
            description: description
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(ToString::to_string),
        })
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PackageVariant {
    pub id: i32,
    pub package_id: i32,
    pub name: String,
    pub base_price: f64,
    pub security_deposit: f64,
    pub is_active: bool,
}

#[derive(Clone, Debug)]
pub struct NewPackageVariant {
    pub package_id: i32,
    pub name: String,
    pub base_price: f64,
    pub security_deposit: f64,
}

/// A distance band and the amount it adds to a package price.
/// `variant_id` of None makes the tier apply franchise-wide.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DistanceTier {
    pub id: i32,
    pub franchise_id: i32,
    pub variant_id: Option<i32>,
    pub min_km: f64,
    pub max_km: f64,
    pub base_price_addition: f64,
    pub is_active: bool,
}

impl DistanceTier {
    pub fn covers(&self, km: f64) -> bool {
        self.is_active && self.min_km <= km && km <= self.max_km
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewDistanceTier {
    pub variant_id: Option<i32>,
    pub min_km: f64,
    pub max_km: f64,
    pub base_price_addition: f64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AddonSource {
    Variant,
    Global,
    None,
}

/// Resolve the distance addon for a trip. Variant-specific tiers win over
/// global ones; within each group the first covering tier applies.
pub fn resolve_distance_addon(
    tiers: &[DistanceTier],
    variant_id: Option<i32>,
    km: f64,
) -> (f64, AddonSource) {
    if km <= 0.0 {
        return (0.0, AddonSource::None);
    }
    if let Some(variant_id) = variant_id {
        if let Some(tier) = tiers
            .iter()
            .find(|t| t.variant_id == Some(variant_id) && t.covers(km))
        {
            return (tier.base_price_addition, AddonSource::Variant);
        }
    }
    if let Some(tier) = tiers.iter().find(|t| t.variant_id.is_none() && t.covers(km)) {
        return (tier.base_price_addition, AddonSource::Global);
    }
    (0.0, AddonSource::None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(id: i32, variant_id: Option<i32>, min: f64, max: f64, addon: f64) -> DistanceTier {
        DistanceTier {
            id,
            franchise_id: 1,
            variant_id,
            min_km: min,
            max_km: max,
            base_price_addition: addon,
            is_active: true,
        }
    }

    #[test]
    fn variant_tier_wins_over_global() {
        let tiers = vec![
            tier(1, None, 0.0, 50.0, 500.0),
            tier(2, Some(9), 0.0, 50.0, 800.0),
        ];
        assert_eq!(
            resolve_distance_addon(&tiers, Some(9), 20.0),
            (800.0, AddonSource::Variant)
        );
        assert_eq!(
            resolve_distance_addon(&tiers, Some(4), 20.0),
            (500.0, AddonSource::Global)
        );
    }

    #[test]
    fn bounds_are_inclusive() {
        let tiers = vec![tier(1, None, 10.0, 25.0, 300.0)];
        assert_eq!(resolve_distance_addon(&tiers, None, 10.0).0, 300.0);
        assert_eq!(resolve_distance_addon(&tiers, None, 25.0).0, 300.0);
        assert_eq!(
            resolve_distance_addon(&tiers, None, 25.1),
            (0.0, AddonSource::None)
        );
    }

    #[test]
    fn zero_or_negative_distance_costs_nothing() {
        let tiers = vec![tier(1, None, 0.0, 50.0, 500.0)];
        assert_eq!(
            resolve_distance_addon(&tiers, None, 0.0),
            (0.0, AddonSource::None)
        );
        assert_eq!(
            resolve_distance_addon(&tiers, None, -3.0),
            (0.0, AddonSource::None)
        );
    }

    #[test]
    fn inactive_tiers_skipped() {
        let mut t = tier(1, None, 0.0, 50.0, 500.0);
        t.is_active = false;
        assert_eq!(
            resolve_distance_addon(&[t], None, 20.0),
            (0.0, AddonSource::None)
        );
    }
}
