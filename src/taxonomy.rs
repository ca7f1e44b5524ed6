//! Hand-curated reference lists for the 2021 Census Profile export.
//!
//! These encode subject-matter knowledge that cannot be derived from the
//! data: which "Mother tongue" rows are aggregates rather than languages,
//! and the canonical order of the household income brackets.

use once_cell::sync::Lazy;
use std::collections::HashSet;

pub const MOTHER_TONGUE_TOPIC: &str = "Mother tongue";
pub const HOUSEHOLD_INCOME_TOPIC: &str = "Income of households in 2020";

/// Labels under "Mother tongue" that are totals, official languages or
/// language families rather than individual languages.
pub const LANGUAGE_EXCLUSIONS: &[&str] = &[
    // top-level totals
    "Total - Mother tongue for the total population excluding institutional residents - 100% data",
    "Single responses",
    "Multiple responses",
    "English and non-official language(s)",
    // official / non-official groupings
    "Official languages",
    "Non-official languages",
    "English",
    "French",
    "Non-Indigenous languages",
    "Indigenous languages",
    // language families
    "Sino-Tibetan languages",
    "Chinese languages",
    "Indo-European languages",
    "Indo-Iranian languages",
    "Italic (Romance) languages",
    "Iranian languages",
    "Persian languages",
    "Indo-Aryan languages",
    "Balto-Slavic languages",
    "Slavic languages",
    "Afro-Asiatic languages",
    "Semitic languages",
    "Germanic languages",
    "Turkic languages",
    "Dravidian languages",
    "Austronesian languages",
    "Tai-Kadai languages",
];

/// Household income brackets, lowest first.
pub const INCOME_BRACKETS: [&str; 16] = [
    "Under $5,000",
    "$5,000 to $9,999",
    "$10,000 to $14,999",
    "$15,000 to $19,999",
    "$20,000 to $24,999",
    "$25,000 to $29,999",
    "$30,000 to $34,999",
    "$35,000 to $39,999",
    "$40,000 to $44,999",
    "$45,000 to $49,999",
    "$50,000 to $59,999",
    "$60,000 to $69,999",
    "$70,000 to $79,999",
    "$80,000 to $89,999",
    "$90,000 to $99,999",
    "$100,000 and over",
];

/// The first 8 brackets cover $0 - $39,999.
pub const LOW_INCOME_BRACKETS: usize = 8;

pub const TOP_LANGUAGES: usize = 5;

static EXCLUSION_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| LANGUAGE_EXCLUSIONS.iter().copied().collect());

/// Reference data for the mother-tongue ranking.
#[derive(Debug, Clone)]
pub struct LanguageTaxonomy {
    pub topic: &'static str,
    pub exclusions: &'static HashSet<&'static str>,
    pub top_n: usize,
}

impl LanguageTaxonomy {
    pub fn census_2021() -> Self {
        Self {
            topic: MOTHER_TONGUE_TOPIC,
            exclusions: &*EXCLUSION_SET,
            top_n: TOP_LANGUAGES,
        }
    }

    pub fn is_excluded(&self, label: &str) -> bool {
        self.exclusions.contains(label)
    }
}

/// Reference data for the household income distribution.
#[derive(Debug, Clone)]
pub struct IncomeTaxonomy {
    pub topic: &'static str,
    pub brackets: &'static [&'static str],
    /// How many leading brackets count as low income.
    pub low_income_brackets: usize,
}

impl IncomeTaxonomy {
    pub fn census_2021() -> Self {
        Self {
            topic: HOUSEHOLD_INCOME_TOPIC,
            brackets: &INCOME_BRACKETS,
            low_income_brackets: LOW_INCOME_BRACKETS,
        }
    }

    pub fn contains(&self, label: &str) -> bool {
        self.brackets.iter().any(|b| *b == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exclusion_list_has_no_duplicates() {
        assert_eq!(EXCLUSION_SET.len(), LANGUAGE_EXCLUSIONS.len());
    }

    #[test]
    fn official_languages_and_families_are_excluded() {
        let tax = LanguageTaxonomy::census_2021();
        assert!(tax.is_excluded("English"));
        assert!(tax.is_excluded("French"));
        assert!(tax.is_excluded("Chinese languages"));
        assert!(!tax.is_excluded("Mandarin"));
        assert!(!tax.is_excluded(" English "));
    }

    #[test]
    fn brackets_are_unique_and_low_group_ends_below_40k() {
        let unique: HashSet<_> = INCOME_BRACKETS.iter().collect();
        assert_eq!(unique.len(), 16);
        let tax = IncomeTaxonomy::census_2021();
        assert_eq!(tax.brackets[tax.low_income_brackets - 1], "$35,000 to $39,999");
        assert_eq!(tax.brackets[tax.low_income_brackets], "$40,000 to $44,999");
        assert!(tax.contains("$100,000 and over"));
        assert!(!tax.contains("$100,000 and over "));
    }
}
