//! Loadout model: a specific equipment and crew combination.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Employee, Equipment, ServiceType};

/// An equipment + crew configuration with its own production rate.
///
/// The hourly cost of a loadout is derived, never stored; see
/// [`crate::calculation::calculate_loadout_cost`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loadout {
    /// Unique identifier for the loadout.
    pub id: String,
    /// Display name (e.g. "Mulcher crew A").
    pub name: String,
    /// The service this loadout is configured for.
    pub service_type: ServiceType,
    /// Equipment in assignment order.
    #[serde(default)]
    pub equipment: Vec<Equipment>,
    /// Crew members.
    #[serde(default)]
    pub employees: Vec<Employee>,
    /// Production rate in TreeShop points per hour.
    pub production_rate_pph: Decimal,
}

impl Loadout {
    /// Returns true if the loadout has neither equipment nor crew.
    ///
    /// Such a loadout is valid and costs nothing; calculators use it to
    /// score work without pricing it.
    pub fn is_empty(&self) -> bool {
        self.equipment.is_empty() && self.employees.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_scoring_only_loadout() {
        let json = r#"{
            "id": "lo_001",
            "name": "Scoring only",
            "service_type": "tree_removal",
            "production_rate_pph": "350"
        }"#;

        let loadout: Loadout = serde_json::from_str(json).unwrap();
        assert_eq!(loadout.service_type, ServiceType::TreeRemoval);
        assert!(loadout.is_empty());
        assert_eq!(loadout.production_rate_pph, Decimal::from(350));
    }
}
