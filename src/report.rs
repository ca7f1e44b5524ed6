use crate::summary::IncomeSummary;
use crate::table::CountedLabel;
use std::fmt::Write;

const RULE_WIDTH: usize = 40;

/// Banner plus the ranked languages as an aligned two-column table.
pub fn language_table(rows: &[CountedLabel]) -> String {
    let mut out = String::new();
    let rule = "=".repeat(RULE_WIDTH);
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "TOP {} NON-OFFICIAL MOTHER TONGUES", rows.len());
    let _ = writeln!(out, "(Manual Analysis Result)");
    let _ = writeln!(out, "{}", rule);
    out.push_str(&two_columns(rows, "Language", "Count"));
    out
}

/// The bracket distribution as an aligned two-column table.
pub fn income_table(rows: &[CountedLabel]) -> String {
    two_columns(rows, "Income_Bin", "Households")
}

pub fn income_summary(summary: &IncomeSummary) -> String {
    format!(
        "Total Households Analyzed: {:.0}\nLow Income (<$40k): {}\nHigh Income (>$100k): {}\n",
        summary.total_households,
        pct(summary.low_income_pct),
        pct(summary.high_income_pct),
    )
}

fn two_columns(rows: &[CountedLabel], label_header: &str, count_header: &str) -> String {
    let width = rows
        .iter()
        .map(|r| r.label.chars().count())
        .max()
        .unwrap_or(0)
        .max(label_header.len());

    let mut out = String::new();
    let _ = writeln!(out, "{: <width$} {:>12}", label_header, count_header, width = width);
    let _ = writeln!(out, "{:-<1$}", "", width + 13);
    for row in rows {
        let _ = writeln!(
            out,
            "{: <width$} {:>12}",
            row.label,
            count(row.count),
            width = width
        );
    }
    out
}

fn count(v: Option<f64>) -> String {
    match v {
        Some(v) => format!("{:.0}", v),
        None => "n/a".to_string(),
    }
}

fn pct(v: Option<f64>) -> String {
    match v {
        Some(v) => format!("{:.1}%", v),
        None => "n/a".to_string(),
    }
}
