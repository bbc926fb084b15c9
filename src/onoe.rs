use log::{debug, info, warn};

use onoe_costs::builder::ProjectionBuilder;
use onoe_costs::ledger::load_line_items;
use onoe_costs::projection::{summarize_by_state, write_projection_csv};
use onoe_costs::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::Path;

use text_diff::print_diff;

use crate::args::{DashboardArgs, GenerateArgs};
use crate::onoe::config_reader::*;
use crate::onoe::io_common::{format_crore, simplify_file_name};

pub mod config_reader;
pub mod dashboard;
pub mod io_common;
pub mod io_csv;
pub mod io_excel;

const DEFAULT_PROJECTION_OUT: &str = "onoe_complete_india_data.csv";
const DEFAULT_DASHBOARD_OUT: &str = "onoe_dashboard.html";
const DEFAULT_DASHBOARD_CSV: &str = "onoe_data.csv";
const PREVIEW_ROWS: usize = 10;

#[derive(Debug, Snafu)]
pub enum OnoeError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The Excel file {path} has no usable worksheet"))]
    EmptyExcel { path: String },
    #[snafu(display("Worksheet {name} not found in {path}"))]
    MissingWorksheet { name: String, path: String },
    #[snafu(display(
        "The Excel file {path} has several worksheets, the worksheet name must be provided"
    ))]
    AmbiguousWorksheet { path: String },
    #[snafu(display("Could not read the cell at line {lineno}: {content}"))]
    ExcelWrongCellType { lineno: u64, content: String },
    #[snafu(display("Error opening file {path}"))]
    OpeningFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing the JSON configuration"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error parsing line {lineno}"))]
    CsvLineParse { source: csv::Error, lineno: u64 },
    #[snafu(display("Error writing {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error reading {path}"))]
    ReadingReference {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Unknown input type {input_type} (expected csv or xlsx)"))]
    UnknownInputType { input_type: String },
    #[snafu(display("Invalid cost model: {source}"))]
    CostModel { source: CostModelError },
    #[snafu(display("Error rendering the output"))]
    Rendering { source: std::fmt::Error },
    #[snafu(display("Difference detected between the generated table and the reference {path}"))]
    ReferenceMismatch { path: String },
}

pub type BOnoeResult<T> = Result<T, Box<OnoeError>>;

/// Projects the state table, prints a preview and writes the CSV export.
pub fn run_generator(args: &GenerateArgs) -> BOnoeResult<()> {
    let builder = match &args.config {
        Some(path) => {
            let config = read_config(path)?;
            debug!("config: {:?}", config);
            config.to_builder()?
        }
        None => ProjectionBuilder::india(),
    };
    info!(
        "Projecting {} states, unit costs: {:?}",
        builder.states().len(),
        builder.costs()
    );

    let rows = builder.project().context(CostModelSnafu {})?;

    println!("Data Generation Complete. Preview:");
    let preview = io_common::preview_table(&rows, PREVIEW_ROWS).context(RenderingSnafu {})?;
    let summary = io_common::state_summary_table(&summarize_by_state(&rows))
        .context(RenderingSnafu {})?;
    print!("{}", preview);
    println!();
    print!("{}", summary);

    let out = args
        .out
        .clone()
        .unwrap_or_else(|| DEFAULT_PROJECTION_OUT.to_string());
    io_csv::write_projection(&out, &rows)?;
    info!("Wrote {} rows to {}", rows.len(), out);

    if let Some(reference) = &args.reference {
        check_reference(&rows, reference)?;
    }
    Ok(())
}

/// Compares the generated table with a reference CSV file, text for text.
fn check_reference(rows: &[StateProjectionRow], reference_path: &str) -> BOnoeResult<()> {
    let mut buf: Vec<u8> = Vec::new();
    write_projection_csv(rows, &mut buf).context(CostModelSnafu {})?;
    let generated = String::from_utf8_lossy(&buf).to_string();
    let reference = fs::read_to_string(reference_path)
        .context(ReadingReferenceSnafu {
            path: reference_path,
        })?
        .replace("\r\n", "\n");
    if reference != generated {
        warn!("Found differences with the reference file {}", reference_path);
        print_diff(reference.as_str(), generated.as_str(), "\n");
        return Err(Box::new(OnoeError::ReferenceMismatch {
            path: reference_path.to_string(),
        }));
    }
    info!("Generated table matches the reference {}", reference_path);
    Ok(())
}

fn read_line_item_input(args: &DashboardArgs) -> BOnoeResult<Vec<LineItem>> {
    let path = match &args.input {
        Some(p) => p,
        None => return load_line_items().context(CostModelSnafu {}).map_err(Box::new),
    };
    let input_type = args.input_type.clone().unwrap_or_else(|| "csv".to_string());
    info!("Attempting to read line items from {:?} ({})", path, input_type);
    match input_type.as_str() {
        "csv" => io_csv::read_line_items(path),
        "xlsx" | "excel" => io_excel::read_line_items(path, args.excel_worksheet_name.as_deref()),
        x => Err(Box::new(OnoeError::UnknownInputType {
            input_type: x.to_string(),
        })),
    }
}

/// Evaluates the line-item table and renders the dashboard with its CSV export.
pub fn run_dashboard(args: &DashboardArgs) -> BOnoeResult<()> {
    let items = read_line_item_input(args)?;
    let ledger = Ledger::new(items).context(CostModelSnafu {})?;

    let net = ledger.net_impact();
    println!("One Nation One Election: Financial Impact");
    println!(
        "Standard 5-Year Cost: {}",
        format_crore(ledger.total_normal())
    );
    println!("ONOE Cost:            {}", format_crore(ledger.total_onoe()));
    println!(
        "Net Impact:           {} ({:.2}% change)",
        dashboard::net_impact_text(net),
        ledger.pct_change()
    );
    println!(
        "Operational savings:  {:.0}% on running costs",
        ledger.operational_savings_pct()
    );

    let html_out = args
        .out
        .clone()
        .unwrap_or_else(|| DEFAULT_DASHBOARD_OUT.to_string());
    let csv_out = args
        .csv_out
        .clone()
        .unwrap_or_else(|| DEFAULT_DASHBOARD_CSV.to_string());

    io_csv::write_ledger(&csv_out, &ledger)?;
    info!("Wrote the CSV export to {}", csv_out);

    let page = dashboard::render(&ledger, &download_link(&html_out, &csv_out))
        .context(RenderingSnafu {})?;
    fs::write(&html_out, page).context(WritingOutputSnafu { path: &html_out })?;
    info!("Wrote the dashboard to {}", html_out);
    Ok(())
}

/// The CSV location as seen from the dashboard page.
fn download_link(html_out: &str, csv_out: &str) -> String {
    let html_dir = Path::new(html_out).parent();
    let csv_dir = Path::new(csv_out).parent();
    if html_dir == csv_dir {
        simplify_file_name(csv_out)
    } else {
        csv_out.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn download_link_is_relative_when_possible() {
        assert_eq!(download_link("out/dash.html", "out/data.csv"), "data.csv");
        assert_eq!(download_link("dash.html", "data.csv"), "data.csv");
        assert_eq!(download_link("dash.html", "/tmp/data.csv"), "/tmp/data.csv");
    }

    #[test]
    fn reference_check() {
        let rows = india_projection(&UnitCosts::DEFAULT, &Assumptions::DEFAULT).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("reference.csv");
        let ps = p.display().to_string();
        io_csv::write_projection(&ps, &rows).unwrap();
        assert!(check_reference(&rows, &ps).is_ok());

        let mut changed = rows.clone();
        changed[0].onoe_cost += 1.0;
        let err = check_reference(&changed, &ps).unwrap_err();
        assert!(matches!(*err, OnoeError::ReferenceMismatch { .. }));
    }

    #[test]
    fn generator_writes_the_table() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("india.csv").display().to_string();
        let args = GenerateArgs {
            out: Some(out.clone()),
            config: None,
            reference: None,
        };
        run_generator(&args).unwrap();
        let rows = io_csv::read_projection(&out).unwrap();
        assert_eq!(rows.len(), 120);
    }

    #[test]
    fn dashboard_writes_page_and_csv() {
        let dir = tempfile::tempdir().unwrap();
        let html = dir.path().join("dash.html").display().to_string();
        let csv = dir.path().join("data.csv").display().to_string();
        let args = DashboardArgs {
            out: Some(html.clone()),
            csv_out: Some(csv.clone()),
            input: None,
            input_type: None,
            excel_worksheet_name: None,
        };
        run_dashboard(&args).unwrap();
        let page = fs::read_to_string(&html).unwrap();
        assert!(page.contains("href=\"data.csv\""));
        let items = io_csv::read_line_items(&csv).unwrap();
        assert_eq!(items.len(), 16);
    }

    #[test]
    fn dashboard_rejects_infinite_costs() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("items.csv");
        fs::write(
            &input,
            "Task_ID,Task_Name,Category,Sub_Unit_Details,Unit_Cost_INR,Quantity_LS_Only,Cost_LS_Only_Cr,Quantity_State_Only,Cost_State_Only_Cr,Quantity_ONOE,Cost_ONOE_Cr,Impact_Note\n\
             3,Machines,Capital,Set,NA,x,inf,x,5,x,10,note\n",
        )
        .unwrap();
        let html = dir.path().join("dash.html");
        let args = DashboardArgs {
            out: Some(html.display().to_string()),
            csv_out: Some(dir.path().join("data.csv").display().to_string()),
            input: Some(input.display().to_string()),
            input_type: None,
            excel_worksheet_name: None,
        };
        let err = run_dashboard(&args).unwrap_err();
        assert!(matches!(
            *err,
            OnoeError::CostModel {
                source: CostModelError::NonFiniteCost(3)
            }
        ));
        assert!(!html.exists());
    }

    #[test]
    fn dashboard_from_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let html = dir.path().join("dash.html").display().to_string();
        let csv = dir.path().join("data.csv").display().to_string();
        let args = DashboardArgs {
            out: Some(html.clone()),
            csv_out: Some(csv.clone()),
            input: Some(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/line_items_two_sheets.xlsx").to_string()),
            input_type: Some("xlsx".to_string()),
            excel_worksheet_name: Some("Budget".to_string()),
        };
        run_dashboard(&args).unwrap();
        let page = fs::read_to_string(&html).unwrap();
        assert!(page.contains(">Machines<"));
        assert_eq!(io_csv::read_line_items(&csv).unwrap().len(), 2);
    }

    #[test]
    fn unknown_input_type() {
        let args = DashboardArgs {
            out: None,
            csv_out: None,
            input: Some("table.ods".to_string()),
            input_type: Some("ods".to_string()),
            excel_worksheet_name: None,
        };
        let err = read_line_item_input(&args).unwrap_err();
        assert!(matches!(*err, OnoeError::UnknownInputType { .. }));
    }
}
