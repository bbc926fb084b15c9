mod config;
mod india;

pub mod builder;
pub mod ledger;
pub mod manual;
pub mod projection;

use log::info;

pub use crate::config::*;
pub use crate::ledger::Ledger;

/// Rounds a cost to two decimal places (paise of a crore).
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Evaluates the built-in national line-item table.
pub fn national_ledger() -> Result<Ledger, CostModelError> {
    let items = ledger::load_line_items()?;
    info!("Loaded {} built-in line items", items.len());
    Ledger::new(items)
}

/// Projects the built-in state table with the given unit costs and assumptions.
///
/// Arguments:
/// * `costs` the unit economics
/// * `assumptions` sizing rules and scenario factors
pub fn india_projection(
    costs: &UnitCosts,
    assumptions: &Assumptions,
) -> Result<Vec<StateProjectionRow>, CostModelError> {
    projection::project_all(&StateTable::india(), costs, assumptions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn rounding() {
        assert_eq!(round2(11.880000000000003), 11.88);
        assert_eq!(round2(-9.719999999999999), -9.72);
        assert_eq!(round2(121.5), 121.5);
    }

    #[test]
    fn national_totals() {
        init();
        let l = national_ledger().unwrap();
        assert_eq!(l.rows().len(), 16);
        assert_eq!(l.total_normal(), 18440.0);
        assert_eq!(l.total_onoe(), 17575.0);
    }

    #[test]
    fn india_projection_defaults() {
        init();
        let rows = india_projection(&UnitCosts::DEFAULT, &Assumptions::DEFAULT).unwrap();
        assert_eq!(rows.len(), 120);
        // Every state saves money on the running costs and pays more for machines.
        for r in rows.iter() {
            match r.line_item.as_str() {
                "EVM Procurement" => assert_eq!(r.impact, Impact::CostIncrease),
                _ => assert_eq!(r.impact, Impact::Savings),
            }
        }
    }
}
