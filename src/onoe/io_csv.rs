// Primitives for reading and writing CSV files.

use std::fs::File;

use log::debug;
use onoe_costs::projection::write_projection_csv;
use onoe_costs::{CostModelError, Ledger, LineItem, StateProjectionRow};
use snafu::prelude::*;

use crate::onoe::*;

/// Reads a line-item table. Line numbers in errors count the header as line 1.
pub fn read_line_items(path: &str) -> BOnoeResult<Vec<LineItem>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    let mut res: Vec<LineItem> = Vec::new();
    for (idx, record) in rdr.deserialize().enumerate() {
        let lineno = (idx + 2) as u64;
        let item: LineItem = record.context(CsvLineParseSnafu { lineno })?;
        debug!("read_line_items: lineno: {:?} item: {:?}", lineno, item);
        res.push(item);
    }
    Ok(res)
}

#[cfg(test)]
pub fn read_projection(path: &str) -> BOnoeResult<Vec<StateProjectionRow>> {
    use onoe_costs::projection::read_projection_csv;
    let f = File::open(path).context(OpeningFileSnafu { path })?;
    read_projection_csv(f).map_err(|e| Box::new(cost_model_error(e, path)))
}

pub fn write_projection(path: &str, rows: &[StateProjectionRow]) -> BOnoeResult<()> {
    let f = File::create(path).context(WritingOutputSnafu { path })?;
    write_projection_csv(rows, f).map_err(|e| Box::new(cost_model_error(e, path)))
}

pub fn write_ledger(path: &str, ledger: &Ledger) -> BOnoeResult<()> {
    let f = File::create(path).context(WritingOutputSnafu { path })?;
    ledger
        .write_csv(f)
        .map_err(|e| Box::new(cost_model_error(e, path)))
}

// CSV failures carry the file name, the other model errors pass through.
fn cost_model_error(e: CostModelError, path: &str) -> OnoeError {
    match e {
        CostModelError::Csv(source) => OnoeError::CsvOpen {
            source,
            path: path.to_string(),
        },
        source => OnoeError::CostModel { source },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_custom_table() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("items.csv");
        let mut f = File::create(&p).unwrap();
        writeln!(f, "Task_ID,Task_Name,Category,Sub_Unit_Details,Unit_Cost_INR,Quantity_LS_Only,Cost_LS_Only_Cr,Quantity_State_Only,Cost_State_Only_Cr,Quantity_ONOE,Cost_ONOE_Cr,Impact_Note").unwrap();
        writeln!(f, "1,Ink,Operational,Vial,180,1 Cr Vials,18,1 Cr Vials,18,1 Cr Vials,20,One mark per voter").unwrap();
        writeln!(f, "2,Machines,Capital,Set,NA,10 Sets,5,10 Sets,5,20 Sets,10,Bought once").unwrap();
        drop(f);

        let items = read_line_items(&p.display().to_string()).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].unit_cost_inr, None);
        let ledger = Ledger::new(items).unwrap();
        assert_eq!(ledger.total_normal(), 41.0);
        assert_eq!(ledger.total_onoe(), 30.0);
    }

    #[test]
    fn reports_bad_lines() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("items.csv");
        let mut f = File::create(&p).unwrap();
        writeln!(f, "Task_ID,Task_Name,Category,Sub_Unit_Details,Unit_Cost_INR,Quantity_LS_Only,Cost_LS_Only_Cr,Quantity_State_Only,Cost_State_Only_Cr,Quantity_ONOE,Cost_ONOE_Cr,Impact_Note").unwrap();
        writeln!(f, "1,Ink,Stationery,Vial,180,x,18,x,18,x,20,note").unwrap();
        drop(f);

        let err = read_line_items(&p.display().to_string()).unwrap_err();
        assert!(matches!(*err, OnoeError::CsvLineParse { lineno: 2, .. }));
    }

    #[test]
    fn missing_file() {
        let err = read_line_items("/nonexistent/items.csv").unwrap_err();
        assert!(matches!(*err, OnoeError::CsvOpen { .. }));
    }
}
