// Rendering of the national cost dashboard as a self-contained HTML page.

use std::f64::consts::PI;
use std::fmt::{self, Write};

use log::debug;
use onoe_costs::ledger::short_task_name;
use onoe_costs::{CostType, Ledger, LedgerRow, Scenario};

use crate::onoe::io_common::{format_crore, format_thousands};

const BLUE: &str = "#636EFA";
const RED: &str = "#EF553B";
const GREEN: &str = "#00CC96";
const GREY: &str = "#A0A0A0";
const GRID: &str = "#333333";
const TEXT: &str = "#FAFAFA";

const STYLE: &str = r#"
body { background-color: #0E1117; color: #FAFAFA; font-family: Arial, sans-serif; margin: 0 auto; max-width: 1200px; padding: 24px; }
h1 { margin-bottom: 4px; }
.caption { color: #A0A0A0; font-size: 14px; margin-top: 0; }
.cards { display: grid; grid-template-columns: repeat(4, 1fr); gap: 16px; }
.metric-container { background-color: #262730; padding: 20px; border-radius: 10px; box-shadow: 0 4px 6px rgba(0,0,0,0.3); text-align: center; border-left: 5px solid #4e73df; margin-bottom: 10px; }
.metric-value { font-size: 28px; font-weight: bold; color: #FFFFFF; }
.metric-label { font-size: 14px; color: #A0A0A0; text-transform: uppercase; letter-spacing: 1px; }
.metric-delta { font-size: 14px; font-weight: bold; margin-top: 5px; }
.positive { color: #00CC96; }
.negative { color: #EF553B; }
.neutral { color: #A0A0A0; }
.donuts { display: grid; grid-template-columns: 1fr 1fr; gap: 16px; }
svg text { font-family: Arial, sans-serif; }
details { background-color: #262730; border-radius: 10px; padding: 12px; margin-top: 24px; }
table { border-collapse: collapse; width: 100%; font-size: 13px; margin-top: 12px; }
th, td { border-bottom: 1px solid #333333; padding: 4px 6px; text-align: left; }
td.num { text-align: right; }
a.download { display: inline-block; margin-top: 12px; padding: 8px 14px; border: 1px solid #A0A0A0; border-radius: 6px; color: #FAFAFA; text-decoration: none; }
"#;

/// Text of the net-impact card: a saving when negative, a cost otherwise.
pub fn net_impact_text(net: f64) -> String {
    if net < 0.0 {
        format!("Savings: {}", format_crore(net.abs()))
    } else {
        format!("Cost: {}", format_crore(net))
    }
}

/// Renders the full page. `csv_link` is the location of the CSV export, relative to the page.
pub fn render(ledger: &Ledger, csv_link: &str) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html lang=\"en\">")?;
    writeln!(out, "<head>")?;
    writeln!(out, "<meta charset=\"utf-8\">")?;
    writeln!(out, "<title>ONOE Financial Dashboard</title>")?;
    writeln!(out, "<style>{}</style>", STYLE)?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;
    writeln!(out, "<h1>🇮🇳 One Nation One Election: Financial Impact</h1>")?;
    writeln!(out, "<h3>Executive Summary</h3>")?;

    write_cards(&mut out, ledger)?;

    writeln!(out, "<h2>1. The Financial Bridge</h2>")?;
    writeln!(
        out,
        "<p class=\"caption\">How do we get from Standard Cost to ONOE Cost? (Green = Savings, Red = New Expense)</p>"
    )?;
    write_waterfall(&mut out, ledger)?;

    writeln!(out, "<h2>2. Task-by-Task Comparison</h2>")?;
    writeln!(
        out,
        "<p class=\"caption\">Side-by-side cost comparison. Notice the massive drop in Operational tasks (Security, Staff) vs the spike in Capital (EVMs).</p>"
    )?;
    write_comparison_bars(&mut out, ledger)?;

    writeln!(out, "<h2>3. The Structural Shift</h2>")?;
    writeln!(
        out,
        "<p class=\"caption\">The nature of spending changes from 'Burning Money' (Operational) to 'Buying Assets' (Capital).</p>"
    )?;
    writeln!(out, "<div class=\"donuts\">")?;
    for (scenario, title) in [
        (Scenario::Standard, "Standard Cycle"),
        (Scenario::Onoe, "ONOE Cycle"),
    ] {
        let total = ledger.total(scenario);
        write_donut(
            &mut out,
            &format!("{} (Total: ₹{} Cr)", title, format_thousands(total)),
            &ledger.totals_by_type(scenario),
        )?;
    }
    writeln!(out, "</div>")?;

    write_table(&mut out, ledger, csv_link)?;

    writeln!(out, "</body>")?;
    writeln!(out, "</html>")?;
    Ok(out)
}

fn metric_card(
    out: &mut String,
    label: &str,
    value: &str,
    delta_text: &str,
    delta_class: &str,
) -> fmt::Result {
    writeln!(
        out,
        "<div class=\"metric-container\"><div class=\"metric-label\">{}</div><div class=\"metric-value\">{}</div><div class=\"metric-delta {}\">{}</div></div>",
        escape_html(label),
        escape_html(value),
        delta_class,
        escape_html(delta_text)
    )
}

fn write_cards(out: &mut String, ledger: &Ledger) -> fmt::Result {
    let net = ledger.net_impact();
    writeln!(out, "<div class=\"cards\">")?;
    metric_card(
        out,
        "Standard 5-Year Cost",
        &format_crore(ledger.total_normal()),
        "Benchmark",
        "neutral",
    )?;
    metric_card(
        out,
        "ONOE Cost",
        &format_crore(ledger.total_onoe()),
        "Simultaneous",
        "neutral",
    )?;
    metric_card(
        out,
        "Net Impact",
        &net_impact_text(net),
        &format!("{:.2}% Change", ledger.pct_change()),
        if net < 0.0 { "positive" } else { "negative" },
    )?;
    metric_card(
        out,
        "Operational Efficiency",
        &format!("{:.0}% Savings", ledger.operational_savings_pct()),
        "On Running Costs",
        "positive",
    )?;
    writeln!(out, "</div>")
}

fn kilo(x: f64) -> String {
    format!("{:.1}k", x / 1000.0)
}

// Standard total, savings, new expense, ONOE total.
fn write_waterfall(out: &mut String, ledger: &Ledger) -> fmt::Result {
    let total_normal = ledger.total_normal();
    let total_onoe = ledger.total_onoe();
    let savings = ledger.savings_total();
    let increase = ledger.increase_total();

    // (label, bottom, top, color, text)
    let steps: [(&str, f64, f64, &str, String); 4] = [
        (
            "Standard Cost",
            0.0,
            total_normal,
            BLUE,
            format!("₹{}", kilo(total_normal)),
        ),
        (
            "Operational Savings",
            total_normal + savings,
            total_normal,
            GREEN,
            format!("-₹{}", kilo(savings.abs())),
        ),
        (
            "Capital Spike",
            total_normal + savings,
            total_normal + savings + increase,
            RED,
            format!("+₹{}", kilo(increase)),
        ),
        (
            "ONOE Final Cost",
            0.0,
            total_onoe,
            BLUE,
            format!("₹{}", kilo(total_onoe)),
        ),
    ];

    let (width, height) = (900.0, 450.0);
    let (left, right, top, bottom) = (80.0, 20.0, 40.0, 50.0);
    let plot_h = height - top - bottom;
    let max_v = steps
        .iter()
        .map(|s| s.2.max(s.1))
        .fold(0.0_f64, f64::max)
        .max(1.0)
        * 1.15;
    let y = |v: f64| top + plot_h * (1.0 - v / max_v);
    let slot = (width - left - right) / steps.len() as f64;
    let bar_w = slot * 0.6;

    writeln!(
        out,
        "<svg viewBox=\"0 0 {} {}\" width=\"100%\" role=\"img\" aria-label=\"Financial bridge\">",
        width, height
    )?;
    write_y_grid(out, left, width - right, max_v, &y)?;
    writeln!(
        out,
        "<text x=\"18\" y=\"{}\" fill=\"{}\" font-size=\"12\" transform=\"rotate(-90 18 {})\" text-anchor=\"middle\">Cost (₹ Crores)</text>",
        top + plot_h / 2.0,
        TEXT,
        top + plot_h / 2.0
    )?;
    for (idx, (label, lo, hi, color, text)) in steps.iter().enumerate() {
        let x = left + slot * idx as f64 + (slot - bar_w) / 2.0;
        let (y_top, y_bottom) = (y(lo.max(*hi)), y(lo.min(*hi)));
        writeln!(
            out,
            "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"{}\"/>",
            x,
            y_top,
            bar_w,
            (y_bottom - y_top).max(0.5),
            color
        )?;
        writeln!(
            out,
            "<text x=\"{:.1}\" y=\"{:.1}\" fill=\"{}\" font-size=\"12\" text-anchor=\"middle\">{}</text>",
            x + bar_w / 2.0,
            y_top - 6.0,
            TEXT,
            escape_html(text)
        )?;
        writeln!(
            out,
            "<text x=\"{:.1}\" y=\"{:.1}\" fill=\"{}\" font-size=\"12\" text-anchor=\"middle\">{}</text>",
            x + bar_w / 2.0,
            height - bottom + 20.0,
            TEXT,
            escape_html(label)
        )?;
        // Connector to the next step, at the running level.
        if idx + 1 < steps.len() {
            let level = match idx {
                0 => total_normal,
                1 => total_normal + savings,
                _ => total_normal + savings + increase,
            };
            writeln!(
                out,
                "<line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{}\" stroke-dasharray=\"4 3\"/>",
                x + bar_w,
                y(level),
                x + slot,
                y(level),
                GREY
            )?;
        }
    }
    writeln!(out, "</svg>")
}

fn write_y_grid<F: Fn(f64) -> f64>(
    out: &mut String,
    x_start: f64,
    x_end: f64,
    max_v: f64,
    y: &F,
) -> fmt::Result {
    let step = nice_step(max_v / 5.0);
    if !step.is_finite() || step <= 0.0 || !max_v.is_finite() {
        return Ok(());
    }
    let mut v = 0.0;
    while v <= max_v {
        writeln!(
            out,
            "<line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{}\"/>",
            x_start,
            y(v),
            x_end,
            y(v),
            GRID
        )?;
        writeln!(
            out,
            "<text x=\"{:.1}\" y=\"{:.1}\" fill=\"{}\" font-size=\"11\" text-anchor=\"end\">{}</text>",
            x_start - 6.0,
            y(v) + 4.0,
            GREY,
            format_thousands(v)
        )?;
        v += step;
    }
    Ok(())
}

/// Rounds a raw axis step up to 1, 2 or 5 times a power of ten.
fn nice_step(raw: f64) -> f64 {
    if raw <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let norm = raw / magnitude;
    let nice = if norm <= 1.0 {
        1.0
    } else if norm <= 2.0 {
        2.0
    } else if norm <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Horizontal value axis spanning `min_v..max_v`, with zero inside the span.
struct BarAxis {
    start: f64,
    length: f64,
    min_v: f64,
    max_v: f64,
}

impl BarAxis {
    fn position(&self, v: f64) -> f64 {
        let span = self.max_v - self.min_v;
        if span > 0.0 {
            self.start + self.length * (v - self.min_v) / span
        } else {
            self.start
        }
    }

    /// Left edge and width of a bar drawn from zero to `v`.
    fn bar(&self, v: f64) -> (f64, f64) {
        let (zero, end) = (self.position(0.0), self.position(v));
        (zero.min(end), (end - zero).abs())
    }
}

// Grouped horizontal bars, one group per task in table order.
fn write_comparison_bars(out: &mut String, ledger: &Ledger) -> fmt::Result {
    let rows = ledger.rows();
    let (width, left, right, top) = (900.0, 200.0, 60.0, 40.0);
    let group_h = 40.0;
    let bar_h = 15.0;
    let height = top + group_h * rows.len() as f64 + 40.0;
    let max_v = rows
        .iter()
        .map(|r| r.normal_cycle_cost.max(r.item.cost_onoe))
        .fold(0.0_f64, f64::max)
        .max(1.0);
    let min_v = rows
        .iter()
        .map(|r| r.normal_cycle_cost.min(r.item.cost_onoe))
        .fold(0.0_f64, f64::min);
    let axis = BarAxis {
        start: left,
        length: width - left - right,
        min_v,
        max_v,
    };

    writeln!(
        out,
        "<svg viewBox=\"0 0 {} {}\" width=\"100%\" role=\"img\" aria-label=\"Task-by-task comparison\">",
        width, height
    )?;
    // Legend
    for (idx, (name, color)) in [("Standard Cycle", BLUE), ("ONOE Cycle", RED)]
        .iter()
        .enumerate()
    {
        let lx = width / 2.0 - 130.0 + 150.0 * idx as f64;
        writeln!(
            out,
            "<rect x=\"{:.1}\" y=\"12\" width=\"12\" height=\"12\" fill=\"{}\"/><text x=\"{:.1}\" y=\"22\" fill=\"{}\" font-size=\"12\">{}</text>",
            lx,
            color,
            lx + 18.0,
            TEXT,
            name
        )?;
    }
    for (idx, r) in rows.iter().enumerate() {
        let gy = top + group_h * idx as f64;
        writeln!(
            out,
            "<text x=\"{:.1}\" y=\"{:.1}\" fill=\"{}\" font-size=\"12\" text-anchor=\"end\">{}</text>",
            left - 8.0,
            gy + bar_h + 4.0,
            TEXT,
            escape_html(short_task_name(&r.item.task_name))
        )?;
        for (j, (v, color)) in [(r.normal_cycle_cost, BLUE), (r.item.cost_onoe, RED)]
            .iter()
            .enumerate()
        {
            let by = gy + 4.0 + bar_h * j as f64;
            let (bx, bw) = axis.bar(*v);
            writeln!(
                out,
                "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"{}\"/>",
                bx,
                by,
                bw,
                bar_h - 1.0,
                color
            )?;
            writeln!(
                out,
                "<text x=\"{:.1}\" y=\"{:.1}\" fill=\"{}\" font-size=\"11\">₹{}</text>",
                bx + bw + 4.0,
                by + bar_h - 4.0,
                TEXT,
                v
            )?;
        }
    }
    writeln!(
        out,
        "<text x=\"{:.1}\" y=\"{:.1}\" fill=\"{}\" font-size=\"12\" text-anchor=\"middle\">Cost (₹ Crores)</text>",
        left + (width - left - right) / 2.0,
        height - 10.0,
        TEXT
    )?;
    writeln!(out, "</svg>")
}

fn type_color(ct: CostType) -> &'static str {
    match ct {
        CostType::Capital => RED,
        CostType::Operational => BLUE,
    }
}

fn write_donut(out: &mut String, title: &str, slices: &[(CostType, f64)]) -> fmt::Result {
    let (cx, cy, r, stroke) = (160.0, 170.0, 90.0, 50.0);
    let circumference = 2.0 * PI * r;
    let total: f64 = slices.iter().map(|(_, v)| *v).sum();
    debug!("write_donut: {}: {:?}", title, slices);

    writeln!(
        out,
        "<svg viewBox=\"0 0 320 320\" width=\"100%\" role=\"img\" aria-label=\"{}\">",
        escape_html(title)
    )?;
    writeln!(
        out,
        "<text x=\"{}\" y=\"24\" fill=\"{}\" font-size=\"14\" text-anchor=\"middle\">{}</text>",
        cx,
        TEXT,
        escape_html(title)
    )?;
    let mut start = 0.0;
    for (ct, v) in slices {
        let share = if total > 0.0 { (v / total).max(0.0) } else { 0.0 };
        let len = share * circumference;
        // Slices start at the top and go clockwise.
        writeln!(
            out,
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" stroke-dasharray=\"{:.3} {:.3}\" stroke-dashoffset=\"{:.3}\" transform=\"rotate(-90 {} {})\"/>",
            cx,
            cy,
            r,
            type_color(*ct),
            stroke,
            len,
            circumference - len,
            -start * circumference,
            cx,
            cy
        )?;
        if share > 0.0 {
            let mid = 2.0 * PI * (start + share / 2.0) - PI / 2.0;
            writeln!(
                out,
                "<text x=\"{:.1}\" y=\"{:.1}\" fill=\"{}\" font-size=\"11\" text-anchor=\"middle\">{:.1}% {}</text>",
                cx + r * mid.cos(),
                cy + r * mid.sin(),
                TEXT,
                share * 100.0,
                escape_html(ct.label())
            )?;
        }
        start += share;
    }
    writeln!(out, "</svg>")
}

/// Background of a difference cell: green for the largest saving, red for the largest increase.
pub fn difference_color(v: f64, min: f64, max: f64) -> String {
    const STOPS: [(f64, (f64, f64, f64)); 3] = [
        (0.0, (26.0, 152.0, 80.0)),
        (0.5, (255.0, 255.0, 191.0)),
        (1.0, (215.0, 48.0, 39.0)),
    ];
    let t = if max > min {
        ((v - min) / (max - min)).clamp(0.0, 1.0)
    } else {
        0.5
    };
    let (lo, hi) = if t <= 0.5 {
        (STOPS[0], STOPS[1])
    } else {
        (STOPS[1], STOPS[2])
    };
    let f = (t - lo.0) / (hi.0 - lo.0);
    let mix = |a: f64, b: f64| (a + (b - a) * f).round() as u8;
    format!(
        "#{:02x}{:02x}{:02x}",
        mix(lo.1 .0, hi.1 .0),
        mix(lo.1 .1, hi.1 .1),
        mix(lo.1 .2, hi.1 .2)
    )
}

fn write_table(out: &mut String, ledger: &Ledger, csv_link: &str) -> fmt::Result {
    let rows = ledger.rows();
    let min = rows.iter().map(|r| r.difference).fold(f64::INFINITY, f64::min);
    let max = rows
        .iter()
        .map(|r| r.difference)
        .fold(f64::NEG_INFINITY, f64::max);

    writeln!(out, "<details>")?;
    writeln!(out, "<summary>📄 View &amp; Download Raw Data</summary>")?;
    writeln!(out, "<table>")?;
    writeln!(
        out,
        "<tr><th>Task_ID</th><th>Task_Name</th><th>Category</th><th>Sub_Unit_Details</th><th>Unit_Cost_INR</th><th>Cost_LS_Only_Cr</th><th>Cost_State_Only_Cr</th><th>Cost_ONOE_Cr</th><th>Normal_Cycle_Cost</th><th>Difference</th><th>Type</th><th>Impact_Note</th></tr>"
    )?;
    for r in rows {
        write_table_row(out, r, min, max)?;
    }
    writeln!(out, "</table>")?;
    writeln!(
        out,
        "<a class=\"download\" href=\"{}\" download=\"onoe_data.csv\" type=\"text/csv\">Download CSV Data</a>",
        escape_html(csv_link)
    )?;
    writeln!(out, "</details>")
}

fn write_table_row(out: &mut String, r: &LedgerRow, min: f64, max: f64) -> fmt::Result {
    let it = &r.item;
    writeln!(
        out,
        "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td><td class=\"num\" style=\"background-color: {}; color: #0E1117\">{}</td><td>{}</td><td>{}</td></tr>",
        it.task_id,
        escape_html(&it.task_name),
        it.category.label(),
        escape_html(&it.sub_unit_details),
        it.unit_cost_inr
            .map(format_thousands)
            .unwrap_or_else(|| "NA".to_string()),
        it.cost_ls_only,
        it.cost_state_only,
        it.cost_onoe,
        r.normal_cycle_cost,
        difference_color(r.difference, min, max),
        r.difference,
        r.cost_type.label(),
        escape_html(&it.impact_note)
    )
}

pub fn escape_html(s: &str) -> String {
    let mut res = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => res.push_str("&amp;"),
            '<' => res.push_str("&lt;"),
            '>' => res.push_str("&gt;"),
            '"' => res.push_str("&quot;"),
            '\'' => res.push_str("&#39;"),
            c => res.push(c),
        }
    }
    res
}
