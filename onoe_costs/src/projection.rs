// Per-state projection of the four main budget heads.

use log::{debug, info};
use std::collections::BTreeMap;
use std::io;

use crate::config::*;
use crate::round2;

/// INR per crore.
const CRORE: f64 = 1e7;

/// Physical quantities derived from the seat counts of a state.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct StateMetrics {
    pub total_booths: u64,
    pub total_staff: u64,
    /// Not necessarily whole: sensitive states get 1.5 times the base.
    pub required_companies: f64,
}

impl StateMetrics {
    pub fn derive(profile: &StateProfile, assumptions: &Assumptions) -> StateMetrics {
        let total_booths =
            profile.assembly_seats as u64 * assumptions.booths_per_assembly_seat as u64;
        // Seat and booth counts both come from the configuration.
        let total_staff = total_booths.saturating_mul(assumptions.staff_per_booth as u64);
        let base_companies =
            (profile.lok_sabha_seats as u64 * assumptions.companies_per_lok_sabha_seat as u64) as f64;
        StateMetrics {
            total_booths,
            total_staff,
            required_companies: base_companies * profile.tier.multiplier(),
        }
    }

    /// Jawans deployed in one movement of the required companies.
    pub fn security_personnel(&self, assumptions: &Assumptions) -> f64 {
        self.required_companies * assumptions.security_company_size as f64
    }
}

/// Unrounded cost of a line item, in crores, under one scenario.
pub fn line_item_cost(
    item: ProjectedLineItem,
    scenario: Scenario,
    metrics: &StateMetrics,
    costs: &UnitCosts,
    a: &Assumptions,
) -> f64 {
    let booths = metrics.total_booths as f64;
    let staff = metrics.total_staff as f64;
    match (item, scenario) {
        (ProjectedLineItem::EvmProcurement, Scenario::Standard) => {
            booths * a.standard_evm_inventory * costs.evm_set / CRORE
        }
        (ProjectedLineItem::EvmProcurement, Scenario::Onoe) => {
            booths * a.onoe_evm_inventory * costs.evm_set / CRORE
        }
        (ProjectedLineItem::PollingStaffWages, Scenario::Standard) => {
            staff * costs.polling_staff_wage * a.standard_polls / CRORE
        }
        (ProjectedLineItem::PollingStaffWages, Scenario::Onoe) => {
            staff * (costs.polling_staff_wage * a.onoe_wage_premium) / CRORE
        }
        // Company costs are already quoted in crores.
        (ProjectedLineItem::CapfLogistics, Scenario::Standard) => {
            metrics.required_companies * costs.security_company_cr * a.standard_polls
        }
        (ProjectedLineItem::CapfLogistics, Scenario::Onoe) => {
            metrics.required_companies * costs.security_company_cr
        }
        (ProjectedLineItem::LastMileTransport, Scenario::Standard) => {
            booths * a.vehicles_per_booth * costs.transport_vehicle * a.standard_polls / CRORE
        }
        (ProjectedLineItem::LastMileTransport, Scenario::Onoe) => {
            booths * a.vehicles_per_booth * (costs.transport_vehicle * a.onoe_transport_premium)
                / CRORE
        }
    }
}

/// Projects the four line items of one state.
pub fn project_state(
    profile: &StateProfile,
    costs: &UnitCosts,
    assumptions: &Assumptions,
) -> Vec<StateProjectionRow> {
    let metrics = StateMetrics::derive(profile, assumptions);
    debug!("project_state: {}: {:?}", profile.name, metrics);
    ProjectedLineItem::ALL
        .iter()
        .map(|item| {
            let std_cost =
                line_item_cost(*item, Scenario::Standard, &metrics, costs, assumptions);
            let onoe_cost = line_item_cost(*item, Scenario::Onoe, &metrics, costs, assumptions);
            let variance = round2(onoe_cost - std_cost);
            StateProjectionRow {
                state: profile.name.clone(),
                category: item.category().to_string(),
                line_item: item.name().to_string(),
                details: item.details().to_string(),
                funding: item.funding().to_string(),
                standard_cost: round2(std_cost),
                onoe_cost: round2(onoe_cost),
                impact: Impact::from_variance(variance),
                variance,
            }
        })
        .collect()
}

/// Projects every state of the table, four rows per state in table order.
pub fn project_all(
    states: &StateTable,
    costs: &UnitCosts,
    assumptions: &Assumptions,
) -> Result<Vec<StateProjectionRow>, CostModelError> {
    if states.is_empty() {
        return Err(CostModelError::EmptyTable);
    }
    let rows: Vec<StateProjectionRow> = states
        .iter()
        .flat_map(|s| project_state(s, costs, assumptions))
        .collect();
    info!(
        "Projected {} line items for {} states",
        rows.len(),
        states.len()
    );
    Ok(rows)
}

/// Per-state totals, sorted by state name.
pub fn summarize_by_state(rows: &[StateProjectionRow]) -> Vec<StateSummary> {
    let mut totals: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
    for r in rows {
        let e = totals.entry(r.state.as_str()).or_insert((0.0, 0.0));
        e.0 += r.standard_cost;
        e.1 += r.onoe_cost;
    }
    totals
        .into_iter()
        .map(|(state, (standard_cost, onoe_cost))| StateSummary {
            state: state.to_string(),
            standard_cost,
            onoe_cost,
            net_savings: standard_cost - onoe_cost,
        })
        .collect()
}

pub fn write_projection_csv<W: io::Write>(
    rows: &[StateProjectionRow],
    writer: W,
) -> Result<(), CostModelError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush().map_err(|e| CostModelError::Csv(e.into()))?;
    Ok(())
}

pub fn read_projection_csv<R: io::Read>(
    reader: R,
) -> Result<Vec<StateProjectionRow>, CostModelError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut res: Vec<StateProjectionRow> = Vec::new();
    for record in rdr.deserialize() {
        res.push(record?);
    }
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(ls: u32, assembly: u32, tier: SecurityTier) -> StateProfile {
        StateProfile {
            name: "Test".to_string(),
            lok_sabha_seats: ls,
            assembly_seats: assembly,
            tier,
        }
    }

    #[test]
    fn reference_state_metrics() {
        let m = StateMetrics::derive(&profile(10, 90, SecurityTier::Normal), &Assumptions::DEFAULT);
        assert_eq!(m.total_booths, 22_500);
        assert_eq!(m.total_staff, 135_000);
        assert_eq!(m.required_companies, 150.0);
        assert_eq!(m.security_personnel(&Assumptions::DEFAULT), 15_000.0);
    }

    #[test]
    fn reference_state_costs() {
        let rows = project_state(
            &profile(10, 90, SecurityTier::Normal),
            &UnitCosts::DEFAULT,
            &Assumptions::DEFAULT,
        );
        let pairs: Vec<(&str, f64, f64)> = rows
            .iter()
            .map(|r| (r.line_item.as_str(), r.standard_cost, r.onoe_cost))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("EVM Procurement", 121.5, 243.0),
                ("Polling Staff Wages", 486.0, 291.6),
                ("CAPF Logistics", 750.0, 375.0),
                ("Last Mile Transport", 21.6, 11.88),
            ]
        );
        assert_eq!(rows[0].impact, Impact::CostIncrease);
        assert_eq!(rows[0].variance, 121.5);
        assert_eq!(rows[1].impact, Impact::Savings);
        assert_eq!(rows[1].variance, -194.4);
        assert_eq!(rows[2].variance, -375.0);
        assert_eq!(rows[3].variance, -9.72);
        assert_eq!(rows[2].funding, "Center");
        assert_eq!(rows[1].category, "Human Resources");
    }

    #[test]
    fn large_seat_counts_do_not_overflow() {
        let a = Assumptions::DEFAULT;
        let m = StateMetrics::derive(&profile(300_000_000, u32::MAX, SecurityTier::Normal), &a);
        assert_eq!(m.required_companies, 4_500_000_000.0);
        assert_eq!(m.total_booths, u32::MAX as u64 * 250);
        let rows = project_state(
            &profile(300_000_000, 1, SecurityTier::Normal),
            &UnitCosts::DEFAULT,
            &a,
        );
        assert_eq!(rows[2].onoe_cost, 11_250_000_000.0);

        let staffed = Assumptions {
            staff_per_booth: u32::MAX,
            ..a
        };
        let m = StateMetrics::derive(&profile(1, u32::MAX, SecurityTier::Normal), &staffed);
        assert_eq!(m.total_staff, u64::MAX);
    }

    #[test]
    fn conflict_tier_multiplies_security() {
        let a = Assumptions::DEFAULT;
        let base = StateMetrics::derive(&profile(7, 60, SecurityTier::Normal), &a);
        let sensitive = StateMetrics::derive(&profile(7, 60, SecurityTier::Sensitive), &a);
        let conflict = StateMetrics::derive(&profile(7, 60, SecurityTier::Conflict), &a);
        assert_eq!(sensitive.required_companies, 1.5 * base.required_companies);
        assert_eq!(conflict.required_companies, 2.5 * base.required_companies);
        assert_eq!(conflict.total_booths, base.total_booths);
    }

    #[test]
    fn all_states() {
        let rows = project_all(
            &StateTable::india(),
            &UnitCosts::DEFAULT,
            &Assumptions::DEFAULT,
        )
        .unwrap();
        assert_eq!(rows.len(), 120);
        assert_eq!(rows[0].state, "Andhra Pradesh");
        assert_eq!(rows[119].state, "Jammu & Kashmir");
        let haryana: Vec<&StateProjectionRow> =
            rows.iter().filter(|r| r.state == "Haryana").collect();
        assert_eq!(haryana[0].standard_cost, 121.5);
    }

    #[test]
    fn empty_states() {
        let res = project_all(
            &StateTable::default(),
            &UnitCosts::DEFAULT,
            &Assumptions::DEFAULT,
        );
        assert!(matches!(res, Err(CostModelError::EmptyTable)));
    }

    #[test]
    fn summary_by_state() {
        let rows = project_all(
            &StateTable::india(),
            &UnitCosts::DEFAULT,
            &Assumptions::DEFAULT,
        )
        .unwrap();
        let summary = summarize_by_state(&rows);
        assert_eq!(summary.len(), 30);
        assert_eq!(summary[0].state, "Andhra Pradesh");
        assert_eq!(summary[1].state, "Arunachal Pradesh");
        let haryana = summary.iter().find(|s| s.state == "Haryana").unwrap();
        assert!((haryana.standard_cost - 1379.1).abs() < 1e-9);
        assert!((haryana.onoe_cost - 921.48).abs() < 1e-9);
        assert!((haryana.net_savings - 457.62).abs() < 1e-9);
    }

    #[test]
    fn csv_round_trip() {
        let rows = project_all(
            &StateTable::india(),
            &UnitCosts::DEFAULT,
            &Assumptions::DEFAULT,
        )
        .unwrap();
        let mut buf: Vec<u8> = Vec::new();
        write_projection_csv(&rows, &mut buf).unwrap();
        let text = String::from_utf8(buf.clone()).unwrap();
        assert!(text.starts_with(
            "State,Category,Line_Item,Details,Funding,Standard_Cycle_Cost_Cr,ONOE_Cycle_Cost_Cr,Impact,Variance_Cr\n"
        ));
        assert!(text.contains("Haryana,Capital Assets,EVM Procurement,Ballot & Control Units,Center (LS) / State (VS),121.5,243.0,Cost Increase,121.5\n"));
        let back = read_projection_csv(buf.as_slice()).unwrap();
        assert_eq!(back, rows);
    }
}
