use crate::table::{parse_count, CountedLabel, TopicTable};
use crate::taxonomy::LanguageTaxonomy;
use std::cmp::Ordering;
use tracing::debug;

/// Rank the labels not in `taxonomy.exclusions` by count and keep the top
/// `taxonomy.top_n`.
///
/// The sort is stable, so equal counts keep table order. Missing counts rank
/// below every number.
pub fn top_languages(table: &TopicTable, taxonomy: &LanguageTaxonomy) -> Vec<CountedLabel> {
    let mut kept: Vec<CountedLabel> = table
        .rows
        .iter()
        .filter(|r| !taxonomy.is_excluded(&r.label))
        .map(|r| CountedLabel::new(r.label.clone(), parse_count(&r.count)))
        .collect();
    debug!(
        kept = kept.len(),
        excluded = table.len() - kept.len(),
        "applied exclusion list"
    );

    kept.sort_by(|a, b| descending_missing_last(a.count, b.count));
    kept.truncate(taxonomy.top_n);
    kept
}

fn descending_missing_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
