// Built-in datasets.

use crate::config::{SecurityTier, StateProfile, StateTable};

/// The national line-item table shown by the dashboard.
pub(crate) const LINE_ITEMS_CSV: &str = include_str!("../data/line_items.csv");

// (state, Lok Sabha seats, assembly seats, security tier)
const STATES: &[(&str, u32, u32, SecurityTier)] = &[
    ("Andhra Pradesh", 25, 175, SecurityTier::Normal),
    ("Arunachal Pradesh", 2, 60, SecurityTier::Sensitive),
    ("Assam", 14, 126, SecurityTier::Sensitive),
    ("Bihar", 40, 243, SecurityTier::Sensitive),
    ("Chhattisgarh", 11, 90, SecurityTier::Sensitive),
    ("Goa", 2, 40, SecurityTier::Normal),
    ("Gujarat", 26, 182, SecurityTier::Normal),
    ("Haryana", 10, 90, SecurityTier::Normal),
    ("Himachal Pradesh", 4, 68, SecurityTier::Normal),
    ("Jharkhand", 14, 81, SecurityTier::Sensitive),
    ("Karnataka", 28, 224, SecurityTier::Normal),
    ("Kerala", 20, 140, SecurityTier::Sensitive),
    ("Madhya Pradesh", 29, 230, SecurityTier::Normal),
    ("Maharashtra", 48, 288, SecurityTier::Normal),
    ("Manipur", 2, 60, SecurityTier::Conflict),
    ("Meghalaya", 2, 60, SecurityTier::Sensitive),
    ("Mizoram", 1, 40, SecurityTier::Normal),
    ("Nagaland", 1, 60, SecurityTier::Sensitive),
    ("Odisha", 21, 147, SecurityTier::Sensitive),
    ("Punjab", 13, 117, SecurityTier::Normal),
    ("Rajasthan", 25, 200, SecurityTier::Normal),
    ("Sikkim", 1, 32, SecurityTier::Normal),
    ("Tamil Nadu", 39, 234, SecurityTier::Normal),
    ("Telangana", 17, 119, SecurityTier::Normal),
    ("Tripura", 2, 60, SecurityTier::Sensitive),
    ("Uttar Pradesh", 80, 403, SecurityTier::Normal),
    ("Uttarakhand", 5, 70, SecurityTier::Normal),
    ("West Bengal", 42, 294, SecurityTier::Conflict),
    ("Delhi (NCT)", 7, 70, SecurityTier::Normal),
    ("Jammu & Kashmir", 5, 90, SecurityTier::Conflict),
];

impl StateTable {
    /// The 30 states and union territories with their real seat counts.
    pub fn india() -> StateTable {
        StateTable {
            states: STATES
                .iter()
                .map(|(name, ls, assembly, tier)| StateProfile {
                    name: name.to_string(),
                    lok_sabha_seats: *ls,
                    assembly_seats: *assembly,
                    tier: *tier,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn india_table_is_complete() {
        let t = StateTable::india();
        assert_eq!(t.len(), 30);
        let up = t.get("Uttar Pradesh").unwrap();
        assert_eq!(up.lok_sabha_seats, 80);
        assert_eq!(up.assembly_seats, 403);
        assert_eq!(t.get("Manipur").unwrap().tier, SecurityTier::Conflict);
        assert!(t.get("Atlantis").is_none());
    }

    #[test]
    fn lok_sabha_seats_add_up() {
        // The table omits the smaller union territories.
        let total: u32 = StateTable::india().iter().map(|s| s.lok_sabha_seats).sum();
        assert_eq!(total, 536);
    }
}
