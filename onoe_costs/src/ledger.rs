// The national line-item ledger behind the dashboard.

use log::{debug, info};
use std::io;

use crate::config::*;
use crate::india::LINE_ITEMS_CSV;

/// Parses the built-in national line-item table.
pub fn load_line_items() -> Result<Vec<LineItem>, CostModelError> {
    read_line_items(LINE_ITEMS_CSV.as_bytes())
}

/// Parses a line-item table with the same header as the built-in one.
pub fn read_line_items<R: io::Read>(reader: R) -> Result<Vec<LineItem>, CostModelError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut res: Vec<LineItem> = Vec::new();
    for record in rdr.deserialize() {
        let item: LineItem = record?;
        debug!("read_line_items: {:?}", item);
        res.push(item);
    }
    Ok(res)
}

/// Cost of the item when the national and state polls are held separately.
///
/// Assets bought for the national poll are reused by the state poll, so only
/// running costs are paid twice.
pub fn normal_cycle_cost(item: &LineItem) -> f64 {
    match item.category {
        Category::Capital | Category::Lifecycle => item.cost_ls_only,
        Category::Operational
        | Category::Logistics
        | Category::Contingency
        | Category::Infrastructure
        | Category::Admin
        | Category::Surveillance => item.cost_ls_only + item.cost_state_only,
    }
}

/// ONOE cost minus normal-cycle cost. Negative values are savings.
pub fn difference(item: &LineItem) -> f64 {
    item.cost_onoe - normal_cycle_cost(item)
}

/// Chart label of a task: the name up to its parenthesised qualifier.
pub fn short_task_name(name: &str) -> &str {
    name.split('(').next().unwrap_or(name).trim()
}

impl LedgerRow {
    pub fn evaluate(item: LineItem) -> LedgerRow {
        let normal_cycle_cost = normal_cycle_cost(&item);
        let difference = item.cost_onoe - normal_cycle_cost;
        let cost_type = CostType::of(item.category);
        LedgerRow {
            item,
            normal_cycle_cost,
            difference,
            cost_type,
        }
    }

    pub fn cost(&self, scenario: Scenario) -> f64 {
        match scenario {
            Scenario::Standard => self.normal_cycle_cost,
            Scenario::Onoe => self.item.cost_onoe,
        }
    }

    pub fn impact(&self) -> Impact {
        Impact::from_variance(self.difference)
    }
}

/// The evaluated table with its aggregates.
#[derive(PartialEq, Debug, Clone)]
pub struct Ledger {
    rows: Vec<LedgerRow>,
}

impl Ledger {
    pub fn new(items: Vec<LineItem>) -> Result<Ledger, CostModelError> {
        if items.is_empty() {
            return Err(CostModelError::EmptyTable);
        }
        if let Some(bad) = items.iter().find(|it| !it.has_finite_costs()) {
            return Err(CostModelError::NonFiniteCost(bad.task_id));
        }
        let rows: Vec<LedgerRow> = items.into_iter().map(LedgerRow::evaluate).collect();
        info!("Evaluated {} line items", rows.len());
        Ok(Ledger { rows })
    }

    pub fn rows(&self) -> &[LedgerRow] {
        &self.rows
    }

    pub fn total(&self, scenario: Scenario) -> f64 {
        self.rows.iter().map(|r| r.cost(scenario)).sum()
    }

    pub fn total_normal(&self) -> f64 {
        self.total(Scenario::Standard)
    }

    pub fn total_onoe(&self) -> f64 {
        self.total(Scenario::Onoe)
    }

    /// ONOE total minus standard total.
    pub fn net_impact(&self) -> f64 {
        self.total_onoe() - self.total_normal()
    }

    pub fn pct_change(&self) -> f64 {
        let normal = self.total_normal();
        if normal == 0.0 {
            0.0
        } else {
            self.net_impact() / normal * 100.0
        }
    }

    /// Sum of the negative differences (a negative number).
    pub fn savings_total(&self) -> f64 {
        self.rows
            .iter()
            .map(|r| r.difference)
            .filter(|d| *d < 0.0)
            .sum()
    }

    /// Sum of the positive differences.
    pub fn increase_total(&self) -> f64 {
        self.rows
            .iter()
            .map(|r| r.difference)
            .filter(|d| *d > 0.0)
            .sum()
    }

    /// Totals per cost type, capital first.
    pub fn totals_by_type(&self, scenario: Scenario) -> Vec<(CostType, f64)> {
        [CostType::Capital, CostType::Operational]
            .iter()
            .map(|ct| {
                let t: f64 = self
                    .rows
                    .iter()
                    .filter(|r| r.cost_type == *ct)
                    .map(|r| r.cost(scenario))
                    .sum();
                (*ct, t)
            })
            .collect()
    }

    /// Share of the running costs saved by holding the polls together, in percent.
    pub fn operational_savings_pct(&self) -> f64 {
        let by_type = |s: Scenario| -> f64 {
            self.totals_by_type(s)
                .iter()
                .filter(|(ct, _)| *ct == CostType::Operational)
                .map(|(_, t)| *t)
                .sum()
        };
        let normal = by_type(Scenario::Standard);
        if normal == 0.0 {
            0.0
        } else {
            (normal - by_type(Scenario::Onoe)) / normal * 100.0
        }
    }

    /// Writes the evaluated table, derived columns included, as UTF-8 CSV.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), CostModelError> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record([
            "Task_ID",
            "Task_Name",
            "Category",
            "Sub_Unit_Details",
            "Unit_Cost_INR",
            "Quantity_LS_Only",
            "Cost_LS_Only_Cr",
            "Quantity_State_Only",
            "Cost_State_Only_Cr",
            "Quantity_ONOE",
            "Cost_ONOE_Cr",
            "Impact_Note",
            "Normal_Cycle_Cost",
            "Difference",
            "Type",
        ])?;
        for r in self.rows.iter() {
            let it = &r.item;
            wtr.write_record(&[
                it.task_id.to_string(),
                it.task_name.clone(),
                it.category.label().to_string(),
                it.sub_unit_details.clone(),
                it.unit_cost_inr.map(|c| c.to_string()).unwrap_or_default(),
                it.quantity_ls_only.clone(),
                it.cost_ls_only.to_string(),
                it.quantity_state_only.clone(),
                it.cost_state_only.to_string(),
                it.quantity_onoe.clone(),
                it.cost_onoe.to_string(),
                it.impact_note.clone(),
                r.normal_cycle_cost.to_string(),
                r.difference.to_string(),
                r.cost_type.label().to_string(),
            ])?;
        }
        wtr.flush().map_err(|e| CostModelError::Csv(e.into()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger() -> Ledger {
        Ledger::new(load_line_items().unwrap()).unwrap()
    }

    #[test]
    fn embedded_table_parses() {
        let items = load_line_items().unwrap();
        assert_eq!(items.len(), 16);
        assert_eq!(items[0].task_name, "EVM & VVPAT Procurement");
        assert_eq!(items[0].unit_cost_inr, Some(34000.0));
        assert_eq!(items[8].unit_cost_inr, None);
        assert_eq!(items[14].category, Category::Lifecycle);
    }

    #[test]
    fn assets_are_paid_once() {
        for r in ledger().rows() {
            match r.item.category {
                Category::Capital | Category::Lifecycle => {
                    assert_eq!(r.normal_cycle_cost, r.item.cost_ls_only)
                }
                _ => assert_eq!(
                    r.normal_cycle_cost,
                    r.item.cost_ls_only + r.item.cost_state_only
                ),
            }
            assert_eq!(r.difference, r.item.cost_onoe - r.normal_cycle_cost);
        }
    }

    #[test]
    fn totals() {
        let l = ledger();
        assert_eq!(l.total_normal(), 18440.0);
        assert_eq!(l.total_onoe(), 17575.0);
        assert_eq!(l.net_impact(), -865.0);
        let rows_normal: f64 = l.rows().iter().map(|r| r.normal_cycle_cost).sum();
        assert_eq!(l.total_normal(), rows_normal);
        assert!((l.pct_change() + 4.6909).abs() < 1e-3);
    }

    #[test]
    fn bridge_closes() {
        let l = ledger();
        assert_eq!(l.savings_total(), -6495.0);
        assert_eq!(l.increase_total(), 5630.0);
        assert_eq!(
            l.total_normal() + l.savings_total() + l.increase_total(),
            l.total_onoe()
        );
    }

    #[test]
    fn structural_shift() {
        let l = ledger();
        assert_eq!(
            l.totals_by_type(Scenario::Standard),
            vec![(CostType::Capital, 4920.0), (CostType::Operational, 13520.0)]
        );
        assert_eq!(
            l.totals_by_type(Scenario::Onoe),
            vec![(CostType::Capital, 10440.0), (CostType::Operational, 7135.0)]
        );
        assert!((l.operational_savings_pct() - 47.226).abs() < 1e-2);
    }

    #[test]
    fn impact_labels() {
        let l = ledger();
        assert_eq!(l.rows()[0].impact(), Impact::CostIncrease);
        assert_eq!(l.rows()[3].impact(), Impact::Savings);
        assert_eq!(l.rows()[9].impact(), Impact::NoChange);
    }

    #[test]
    fn short_names() {
        assert_eq!(short_task_name("Security Deployment (CAPF)"), "Security Deployment");
        assert_eq!(short_task_name("Contingency Fund"), "Contingency Fund");
    }

    #[test]
    fn empty_table() {
        assert!(matches!(
            Ledger::new(vec![]),
            Err(CostModelError::EmptyTable)
        ));
    }

    #[test]
    fn infinite_and_missing_costs_are_rejected() {
        let text = "Task_ID,Task_Name,Category,Sub_Unit_Details,Unit_Cost_INR,Quantity_LS_Only,Cost_LS_Only_Cr,Quantity_State_Only,Cost_State_Only_Cr,Quantity_ONOE,Cost_ONOE_Cr,Impact_Note
1,Ink,Operational,Vial,180,x,18,x,18,x,20,note
7,Machines,Capital,Set,NA,x,inf,x,5,x,10,note
";
        let items = read_line_items(text.as_bytes()).unwrap();
        assert!(matches!(
            Ledger::new(items),
            Err(CostModelError::NonFiniteCost(7))
        ));

        let text = text.replace("inf", "5").replace(",20,note", ",NaN,note");
        let items = read_line_items(text.as_bytes()).unwrap();
        assert!(matches!(
            Ledger::new(items),
            Err(CostModelError::NonFiniteCost(1))
        ));
    }

    #[test]
    fn export_has_derived_columns() {
        let mut buf: Vec<u8> = Vec::new();
        ledger().write_csv(&mut buf).unwrap();
        let s = String::from_utf8(buf).unwrap();
        let mut lines = s.lines();
        assert!(lines
            .next()
            .unwrap()
            .ends_with("Normal_Cycle_Cost,Difference,Type"));
        let first = lines.next().unwrap();
        assert!(first.starts_with("1,EVM & VVPAT Procurement,Capital,Set (BU+CU+VVPAT),34000,"));
        assert!(first.ends_with(",4420,4420,Capital (Assets)"));
        // Lump-sum heads have no unit cost.
        assert!(s.contains("National Campaign,,National Scale"));
        assert_eq!(s.lines().count(), 17);
    }
}
