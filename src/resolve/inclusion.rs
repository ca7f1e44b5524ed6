use crate::table::{parse_count, CountedLabel, TopicRow, TopicTable};
use crate::taxonomy::IncomeTaxonomy;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Rebuild the income distribution as exactly one row per bracket, in
/// taxonomy order:
/// 1. keep rows whose label is a bracket
/// 2. drop repeated labels, first occurrence wins
/// 3. lay the survivors out in bracket order, absent brackets get no count
/// 4. parse counts
pub fn resolve_brackets(table: &TopicTable, taxonomy: &IncomeTaxonomy) -> Vec<CountedLabel> {
    let kept = keep_brackets(table, taxonomy);
    let before = kept.len();
    let unique = dedup_keep_first(kept);
    debug!(
        kept = before,
        duplicates = before - unique.len(),
        "filtered to bracket rows"
    );

    reindex(&unique, taxonomy.brackets)
        .into_iter()
        .map(|(label, count)| {
            if count.is_none() {
                warn!(bracket = label, "bracket absent from table; count left missing");
            }
            CountedLabel::new(label, count.and_then(parse_count))
        })
        .collect()
}

/// Rows whose label is one of the taxonomy's brackets. Other levels of the
/// topic (totals, medians, after-tax headers) are dropped.
pub fn keep_brackets(table: &TopicTable, taxonomy: &IncomeTaxonomy) -> Vec<TopicRow> {
    table
        .rows
        .iter()
        .filter(|r| taxonomy.contains(&r.label))
        .cloned()
        .collect()
}

/// Keep the first row seen for each label.
///
/// The export lists every bracket twice, total income first and after-tax
/// income second, under identical labels. Taking the first occurrence
/// therefore selects total income. This depends on the export's row order;
/// replace this function if a column ever distinguishes the two blocks.
pub fn dedup_keep_first(rows: Vec<TopicRow>) -> Vec<TopicRow> {
    let mut seen = HashSet::with_capacity(rows.len());
    rows.into_iter()
        .filter(|r| seen.insert(r.label.clone()))
        .collect()
}

/// One entry per bracket, in bracket order, paired with the count text of
/// the first row carrying that label (or `None`).
pub fn reindex<'a>(
    rows: &'a [TopicRow],
    brackets: &[&'a str],
) -> Vec<(&'a str, Option<&'a str>)> {
    let mut by_label: HashMap<&str, &str> = HashMap::with_capacity(rows.len());
    for row in rows {
        by_label
            .entry(row.label.as_str())
            .or_insert(row.count.as_str());
    }
    brackets
        .iter()
        .map(|b| (*b, by_label.get(b).copied()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::INCOME_BRACKETS;

    fn row(label: &str, count: &str) -> TopicRow {
        TopicRow {
            label: label.to_string(),
            count: count.to_string(),
        }
    }

    /// Both income blocks, the way the export lays them out.
    fn full_export(pre_tax: u32, after_tax: u32) -> TopicTable {
        let mut rows = vec![row("Total - Household total income groups in 2020", "5000")];
        let (pre_tax, after_tax) = (pre_tax.to_string(), after_tax.to_string());
        rows.extend(INCOME_BRACKETS.iter().map(|b| row(b, &pre_tax)));
        rows.push(row("Total - Household after-tax income groups in 2020", "5000"));
        rows.extend(INCOME_BRACKETS.iter().map(|b| row(b, &after_tax)));
        rows.push(row("Median total income of household in 2020 ($)", "82000"));
        TopicTable { rows }
    }

    #[test]
    fn always_sixteen_rows_in_bracket_order() {
        let tax = IncomeTaxonomy::census_2021();
        let out = resolve_brackets(&full_export(10, 20), &tax);
        assert_eq!(out.len(), 16);
        let labels: Vec<&str> = out.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, INCOME_BRACKETS.to_vec());
        assert!(out.iter().all(|r| r.count == Some(10.0)));
    }

    #[test]
    fn duplicate_bracket_takes_first_occurrence() {
        let table = TopicTable {
            rows: vec![row("$20,000 to $24,999", "100"), row("$20,000 to $24,999", "250")],
        };
        let out = resolve_brackets(&table, &IncomeTaxonomy::census_2021());
        assert_eq!(out.len(), 16);
        assert_eq!(out[4].label, "$20,000 to $24,999");
        assert_eq!(out[4].count, Some(100.0));
    }

    #[test]
    fn absent_bracket_becomes_missing_row() {
        let mut table = full_export(10, 20);
        table.rows.retain(|r| r.label != "$100,000 and over");
        let out = resolve_brackets(&table, &IncomeTaxonomy::census_2021());
        assert_eq!(out.len(), 16);
        assert_eq!(out[15].label, "$100,000 and over");
        assert_eq!(out[15].count, None);
    }

    #[test]
    fn unparseable_count_keeps_its_row() {
        let table = TopicTable {
            rows: vec![row("Under $5,000", "x"), row("$5,000 to $9,999", "12")],
        };
        let out = resolve_brackets(&table, &IncomeTaxonomy::census_2021());
        assert_eq!(out.len(), 16);
        assert_eq!(out[0], CountedLabel::new("Under $5,000", None));
        assert_eq!(out[1].count, Some(12.0));
    }

    #[test]
    fn reversed_input_is_put_back_in_order() {
        let table = TopicTable {
            rows: INCOME_BRACKETS
                .iter()
                .rev()
                .enumerate()
                .map(|(i, b)| row(b, &i.to_string()))
                .collect(),
        };
        let out = resolve_brackets(&table, &IncomeTaxonomy::census_2021());
        assert_eq!(out[0].label, "Under $5,000");
        assert_eq!(out[0].count, Some(15.0));
        assert_eq!(out[15].count, Some(0.0));
    }

    #[test]
    fn dedup_is_idempotent() {
        let rows = vec![
            row("a", "1"),
            row("b", "2"),
            row("a", "3"),
            row("c", "4"),
            row("b", "5"),
        ];
        let once = dedup_keep_first(rows);
        let twice = dedup_keep_first(once.clone());
        assert_eq!(once, twice);
        assert_eq!(once, vec![row("a", "1"), row("b", "2"), row("c", "4")]);
    }

    #[test]
    fn reindex_is_total_for_zero_one_and_many_occurrences() {
        let brackets = ["x", "y", "z"];
        // x twice, y once, z never
        let rows = vec![row("x", "1"), row("y", "2"), row("x", "9")];
        let out = reindex(&rows, &brackets);
        assert_eq!(out, vec![("x", Some("1")), ("y", Some("2")), ("z", None)]);
    }

    #[test]
    fn keep_brackets_drops_other_levels() {
        let kept = keep_brackets(&full_export(1, 2), &IncomeTaxonomy::census_2021());
        assert_eq!(kept.len(), 32);
        assert!(kept.iter().all(|r| !r.label.starts_with("Total")));
    }
}
