use std::fmt::{self, Write};
use std::path::Path;

use num_format::{Locale, ToFormattedString};
use onoe_costs::{StateProjectionRow, StateSummary};

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Formats a number with comma thousand separators and no decimals: `18440.4` -> `18,440`.
pub fn format_thousands(x: f64) -> String {
    // A value rounding to zero prints without a sign.
    (x.round() as i64).to_formatted_string(&Locale::en)
}

pub fn format_crore(x: f64) -> String {
    format!("₹ {} Cr", format_thousands(x))
}

/// The first rows of the projection as a fixed-width text table.
pub fn preview_table(rows: &[StateProjectionRow], num_rows: usize) -> Result<String, fmt::Error> {
    let mut s = String::new();
    writeln!(
        s,
        "{:>3} {:<18} {:<16} {:<20} {:>12} {:>12} {:<14} {:>10}",
        "", "State", "Category", "Line_Item", "Standard_Cr", "ONOE_Cr", "Impact", "Variance"
    )?;
    for (idx, r) in rows.iter().take(num_rows).enumerate() {
        writeln!(
            s,
            "{:>3} {:<18} {:<16} {:<20} {:>12.2} {:>12.2} {:<14} {:>10.2}",
            idx,
            r.state,
            r.category,
            r.line_item,
            r.standard_cost,
            r.onoe_cost,
            r.impact.label(),
            r.variance
        )?;
    }
    Ok(s)
}

pub fn state_summary_table(summary: &[StateSummary]) -> Result<String, fmt::Error> {
    let mut s = String::new();
    writeln!(
        s,
        "{:<18} {:>14} {:>14} {:>12}",
        "State", "Standard_Cr", "ONOE_Cr", "Net_Savings"
    )?;
    for st in summary {
        writeln!(
            s,
            "{:<18} {:>14.2} {:>14.2} {:>12.2}",
            st.state, st.standard_cost, st.onoe_cost, st.net_savings
        )?;
    }
    Ok(s)
}
