// Reading line-item tables from Excel workbooks.

use calamine::{open_workbook, DataType, Reader, Xlsx};
use log::debug;
use onoe_costs::LineItem;
use snafu::prelude::*;

use crate::onoe::*;

/// Reads a line-item table from the given worksheet, or from the only worksheet of the file.
///
/// The first row is the header, with the same column names as the CSV table.
pub fn read_line_items(path: &str, worksheet_name: Option<&str>) -> BOnoeResult<Vec<LineItem>> {
    let wrange = get_range(path, worksheet_name)?;
    let mut rows = wrange.rows();
    let header = rows.next().context(EmptyExcelSnafu { path })?;
    let header_record = csv::StringRecord::from(to_strings(header, 1)?);
    debug!("read_line_items: header: {:?}", header_record);

    let mut res: Vec<LineItem> = Vec::new();
    for (idx, row) in rows.enumerate() {
        // The ranges are 1-indexed in the spreadsheet world, and the header is row 1.
        let lineno = (idx + 2) as u64;
        let cells = to_strings(row, lineno)?;
        if cells.iter().all(|c| c.is_empty()) {
            continue;
        }
        let record = csv::StringRecord::from(cells);
        let item: LineItem = record
            .deserialize(Some(&header_record))
            .context(CsvLineParseSnafu { lineno })?;
        debug!("read_line_items: lineno: {:?} item: {:?}", lineno, item);
        res.push(item);
    }
    Ok(res)
}

fn to_strings(row: &[DataType], lineno: u64) -> BOnoeResult<Vec<String>> {
    row.iter().map(|c| read_cell(c, lineno)).collect()
}

fn read_cell(cell: &DataType, lineno: u64) -> BOnoeResult<String> {
    match cell {
        DataType::String(s) => Ok(s.trim().to_string()),
        DataType::Float(f) => Ok(f.to_string()),
        DataType::Int(i) => Ok(i.to_string()),
        DataType::Empty => Ok("".to_string()),
        _ => Err(Box::new(OnoeError::ExcelWrongCellType {
            lineno,
            content: format!("{:?}", cell),
        })),
    }
}

fn get_range(path: &str, worksheet_name_o: Option<&str>) -> BOnoeResult<calamine::Range<DataType>> {
    debug!(
        "get_range: path: {:?} worksheet: {:?}",
        path, &worksheet_name_o
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    // A worksheet name was provided, use it.
    if let Some(worksheet_name) = worksheet_name_o {
        let wrange = workbook
            .worksheet_range(worksheet_name)
            .context(MissingWorksheetSnafu {
                name: worksheet_name,
                path,
            })?
            .context(OpeningExcelSnafu { path })?;
        Ok(wrange)
    } else {
        let all_worksheets = workbook.worksheets();
        match all_worksheets.as_slice() {
            [] => Err(Box::new(OnoeError::EmptyExcel {
                path: path.to_string(),
            })),
            [(worksheet_name, wrange)] => {
                debug!("get_range: path: {:?} worksheet: {:?}", path, worksheet_name);
                Ok(wrange.clone())
            }
            _ => Err(Box::new(OnoeError::AmbiguousWorksheet {
                path: path.to_string(),
            })),
        }
    }
}
