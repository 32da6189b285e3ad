//! Derived view: pure filtering, category enumeration and statistics over
//! the in-memory record set.
//!
//! Everything here is synchronous and side-effect free; the TUI recomputes
//! these projections whenever the record set revision or the filter inputs
//! change (see `tui::state::ViewCache`).

use std::collections::BTreeSet;

use crate::model::Record;

/// Category selector. `All` is the sentinel that disables the category
/// predicate entirely.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Is(String),
}

/// Distinct non-empty category values across all records, sorted
/// lexicographically ascending.
pub fn category_set(records: &[Record]) -> Vec<String> {
    let set: BTreeSet<&str> = records
        .iter()
        .filter_map(|r| r.category.as_deref())
        .filter(|c| !c.is_empty())
        .collect();
    set.into_iter().map(|c| c.to_string()).collect()
}

/// A record matches when the category selector passes AND the search text
/// (case-insensitive simple substring, no tokenization) is found in any of
/// `name`, `category` or `notes`. Empty search text matches everything.
pub fn matches(record: &Record, query: &str, filter: &CategoryFilter) -> bool {
    match filter {
        CategoryFilter::All => {}
        CategoryFilter::Is(selected) => {
            if record.category.as_deref() != Some(selected.as_str()) {
                return false;
            }
        }
    }

    if query.is_empty() {
        return true;
    }
    let query = query.to_lowercase();

    record.name.to_lowercase().contains(&query)
        || record
            .category
            .as_deref()
            .is_some_and(|c| c.to_lowercase().contains(&query))
        || record
            .notes
            .as_deref()
            .is_some_and(|n| n.to_lowercase().contains(&query))
}

/// Indices (into `records`) of the records matching the query and category
/// selector, in the record set's own order.
pub fn filter_records(records: &[Record], query: &str, filter: &CategoryFilter) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| matches(r, query, filter))
        .map(|(i, _)| i)
        .collect()
}

/// Aggregate statistics over a record set.
///
/// Means are computed only over records where the value is present; a
/// record with an absent value never shifts a mean toward zero. When no
/// record carries the value the mean is defined as 0 (the display shows
/// "0.0%" / "0" rather than "undefined").
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Stats {
    pub count: usize,
    pub mean_abv: f64,
    pub mean_ibu: f64,
    /// Most frequent category; ties broken by the category seen first in
    /// record-set order. `None` when no record has a category.
    pub top_category: Option<String>,
}

impl Stats {
    pub fn compute(records: &[Record]) -> Self {
        let mut abv_sum = 0.0;
        let mut abv_n = 0usize;
        let mut ibu_sum = 0i64;
        let mut ibu_n = 0usize;
        // First-seen order is significant for the tie break, so counts are
        // kept in a Vec rather than a map.
        let mut categories: Vec<(&str, usize)> = Vec::new();

        for record in records {
            if let Some(abv) = record.abv {
                abv_sum += abv;
                abv_n += 1;
            }
            if let Some(ibu) = record.ibu {
                ibu_sum += ibu;
                ibu_n += 1;
            }
            if let Some(category) = record.category.as_deref()
                && !category.is_empty()
            {
                match categories.iter_mut().find(|(c, _)| *c == category) {
                    Some((_, n)) => *n += 1,
                    None => categories.push((category, 1)),
                }
            }
        }

        let mut top: Option<(&str, usize)> = None;
        for (category, n) in &categories {
            // Strict comparison keeps the first-seen category on ties.
            if top.is_none_or(|(_, best)| *n > best) {
                top = Some((category, *n));
            }
        }

        Self {
            count: records.len(),
            mean_abv: if abv_n > 0 { abv_sum / abv_n as f64 } else { 0.0 },
            mean_ibu: if ibu_n > 0 {
                ibu_sum as f64 / ibu_n as f64
            } else {
                0.0
            },
            top_category: top.map(|(c, _)| c.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str, category: Option<&str>, abv: Option<f64>) -> Record {
        Record {
            id: id.to_string(),
            owner: "alice".to_string(),
            name: name.to_string(),
            brewery: None,
            category: category.map(|c| c.to_string()),
            abv,
            ibu: None,
            notes: None,
            created_at: 0,
        }
    }

    fn sample() -> Vec<Record> {
        vec![
            record("1", "Pale Ale", Some("IPA"), Some(6.0)),
            record("2", "Stout Night", Some("Stout"), None),
        ]
    }

    #[test]
    fn test_empty_query_and_all_filter_is_identity() {
        let records = sample();
        let filtered = filter_records(&records, "", &CategoryFilter::All);
        assert_eq!(filtered, vec![0, 1]);
    }

    #[test]
    fn test_category_set_is_distinct_and_sorted() {
        let records = vec![
            record("1", "a", Some("Stout"), None),
            record("2", "b", Some("IPA"), None),
            record("3", "c", Some("Stout"), None),
            record("4", "d", None, None),
            record("5", "e", Some(""), None),
        ];
        assert_eq!(category_set(&records), vec!["IPA", "Stout"]);
    }

    #[test]
    fn test_query_matches_name_category_or_notes() {
        let mut records = sample();
        records[0].notes = Some("Bought at the harbour market".to_string());

        // name match, case-insensitive
        let hits = filter_records(&records, "PALE", &CategoryFilter::All);
        assert_eq!(hits, vec![0]);

        // category match
        let hits = filter_records(&records, "stout", &CategoryFilter::All);
        assert_eq!(hits, vec![1]);

        // notes match
        let hits = filter_records(&records, "harbour", &CategoryFilter::All);
        assert_eq!(hits, vec![0]);

        // no match anywhere
        let hits = filter_records(&records, "lager", &CategoryFilter::All);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_category_filter_requires_exact_value() {
        let records = sample();
        let hits = filter_records(&records, "", &CategoryFilter::Is("IPA".to_string()));
        assert_eq!(hits, vec![0]);

        // Records without a category never match a specific selector.
        let hits = filter_records(&records, "", &CategoryFilter::Is("Lager".to_string()));
        assert!(hits.is_empty());
    }

    #[test]
    fn test_query_and_category_combine() {
        let records = vec![
            record("1", "West Coast", Some("IPA"), None),
            record("2", "Hazy Day", Some("IPA"), None),
            record("3", "West Pier", Some("Stout"), None),
        ];
        let hits = filter_records(&records, "west", &CategoryFilter::Is("IPA".to_string()));
        assert_eq!(hits, vec![0]);
    }

    #[test]
    fn test_means_ignore_absent_values() {
        let records = sample();
        let stats = Stats::compute(&records);
        // The record with abv = None must not drag the mean toward zero.
        assert_eq!(stats.mean_abv, 6.0);
        assert_eq!(stats.count, 2);
    }

    #[test]
    fn test_means_default_to_zero_when_no_value_present() {
        let records = vec![record("1", "a", None, None)];
        let stats = Stats::compute(&records);
        assert_eq!(stats.mean_abv, 0.0);
        assert_eq!(stats.mean_ibu, 0.0);

        let stats = Stats::compute(&[]);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.mean_abv, 0.0);
    }

    #[test]
    fn test_mean_ibu_over_present_values() {
        let mut records = sample();
        records[0].ibu = Some(40);
        records[1].ibu = Some(50);
        let stats = Stats::compute(&records);
        assert_eq!(stats.mean_ibu, 45.0);
    }

    #[test]
    fn test_top_category_tie_breaks_on_first_seen() {
        let records = sample();
        let stats = Stats::compute(&records);
        // IPA and Stout both occur once; IPA was seen first.
        assert_eq!(stats.top_category.as_deref(), Some("IPA"));
    }

    #[test]
    fn test_top_category_counts_duplicates() {
        let records = vec![
            record("1", "a", Some("IPA"), None),
            record("2", "b", Some("Stout"), None),
            record("3", "c", Some("Stout"), None),
        ];
        let stats = Stats::compute(&records);
        assert_eq!(stats.top_category.as_deref(), Some("Stout"));
    }

    #[test]
    fn test_top_category_none_without_categories() {
        let records = vec![record("1", "a", None, None)];
        let stats = Stats::compute(&records);
        assert_eq!(stats.top_category, None);
    }
}
