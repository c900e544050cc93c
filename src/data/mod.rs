//! Static GDP dataset and display helpers.
//!
//! The dataset is loaded once at startup and never mutated. It is shared
//! behind an `Arc` so the map can detect a dataset swap by pointer identity.

mod states;

pub use states::US_GDP_2024;

use crate::state::SortOrder;
use std::cmp::Ordering;

/// GDP of a single state, in billions of US dollars.
#[derive(Debug, Clone, PartialEq)]
pub struct StateRecord {
    /// State name; unique within a dataset and the join key against map shapes.
    pub name: String,
    /// GDP in billions USD, never negative.
    pub gdp: f64,
}

impl StateRecord {
    /// Creates a record, clamping negative or non-finite GDP to zero.
    pub fn new(name: impl Into<String>, gdp: f64) -> Self {
        let name = name.into();
        let gdp = if gdp.is_finite() && gdp >= 0.0 {
            gdp
        } else {
            log::warn!("Clamping invalid GDP {} for {} to 0", gdp, name);
            0.0
        };
        Self { name, gdp }
    }

    /// Simulated year-over-year growth shown in the rankings list.
    ///
    /// Deterministic per name so the list is stable between frames.
    pub fn simulated_growth(&self) -> f64 {
        (self.name.chars().count() % 5) as f64 + 1.2
    }
}

/// Immutable collection of state records with unique names.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<StateRecord>,
}

impl Dataset {
    /// Builds a dataset, keeping the first record when a name repeats.
    pub fn new(records: impl IntoIterator<Item = StateRecord>) -> Self {
        let mut unique: Vec<StateRecord> = Vec::new();
        for record in records {
            if unique.iter().any(|r| r.name == record.name) {
                log::warn!("Duplicate record for {} ignored", record.name);
                continue;
            }
            unique.push(record);
        }
        Self { records: unique }
    }

    /// The bundled 2024 estimates.
    pub fn us_2024() -> Self {
        Self::new(
            US_GDP_2024
                .iter()
                .map(|(name, gdp)| StateRecord::new(*name, *gdp)),
        )
    }

    pub fn records(&self) -> &[StateRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Looks up a record by exact name.
    pub fn find(&self, name: &str) -> Option<&StateRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    /// Largest GDP in the dataset, or `None` when empty.
    pub fn max_gdp(&self) -> Option<f64> {
        self.records.iter().map(|r| r.gdp).reduce(f64::max)
    }

    /// Sum of all state GDP values.
    pub fn total_gdp(&self) -> f64 {
        self.records.iter().map(|r| r.gdp).sum()
    }

    /// Record with the largest GDP. Ties go to the earlier record.
    pub fn top_contributor(&self) -> Option<&StateRecord> {
        self.records.iter().fold(None, |best, r| match best {
            Some(b) if b.gdp >= r.gdp => Some(b),
            _ => Some(r),
        })
    }

    /// All records in display order for the rankings list.
    pub fn ranked(&self, sort: SortOrder) -> Vec<&StateRecord> {
        let mut out: Vec<&StateRecord> = self.records.iter().collect();
        match sort {
            SortOrder::Gdp => out.sort_by(|a, b| by_gdp_desc(a, b)),
            SortOrder::Alpha => out.sort_by(|a, b| a.name.cmp(&b.name)),
        }
        out
    }

    /// Records for the given names, sorted by GDP descending.
    ///
    /// Names without a record are skipped.
    pub fn comparison<'a, I>(&self, names: I) -> Vec<&StateRecord>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut out: Vec<&StateRecord> = names.into_iter().filter_map(|n| self.find(n)).collect();
        out.sort_by(|a, b| by_gdp_desc(a, b));
        out
    }
}

fn by_gdp_desc(a: &StateRecord, b: &StateRecord) -> Ordering {
    b.gdp.partial_cmp(&a.gdp).unwrap_or(Ordering::Equal)
}

/// Formats a GDP value in billions as currency, e.g. `$3,900B` or `$40.5B`.
pub fn format_currency(billions: f64) -> String {
    format!("${}B", format_grouped(billions))
}

/// Formats a number with thousands separators and at most one decimal.
pub fn format_grouped(value: f64) -> String {
    let negative = value < 0.0;
    let tenths = (value.abs() * 10.0).round() as u64;
    let whole = tenths / 10;
    let frac = tenths % 10;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative && tenths > 0 { "-" } else { "" };
    if frac == 0 {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::new([
            StateRecord::new("Vermont", 40.0),
            StateRecord::new("California", 3900.0),
            StateRecord::new("Texas", 2400.0),
        ])
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(3900.0), "$3,900B");
        assert_eq!(format_currency(40.5), "$40.5B");
        assert_eq!(format_currency(0.0), "$0B");
        assert_eq!(format_currency(1_234_567.0), "$1,234,567B");
    }

    #[test]
    fn test_format_grouped_rounding() {
        assert_eq!(format_grouped(999.96), "1,000");
        assert_eq!(format_grouped(12.04), "12");
        assert_eq!(format_grouped(-1500.0), "-1,500");
    }

    #[test]
    fn test_negative_gdp_is_clamped() {
        let record = StateRecord::new("Nowhere", -5.0);
        assert_eq!(record.gdp, 0.0);
        let record = StateRecord::new("Nowhere", f64::NAN);
        assert_eq!(record.gdp, 0.0);
    }

    #[test]
    fn test_duplicate_names_keep_first() {
        let ds = Dataset::new([
            StateRecord::new("Ohio", 900.0),
            StateRecord::new("Ohio", 1.0),
        ]);
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.find("Ohio").map(|r| r.gdp), Some(900.0));
    }

    #[test]
    fn test_summary_values() {
        let ds = sample();
        assert_eq!(ds.total_gdp(), 6340.0);
        assert_eq!(ds.max_gdp(), Some(3900.0));
        assert_eq!(ds.top_contributor().map(|r| r.name.as_str()), Some("California"));
        assert_eq!(Dataset::default().max_gdp(), None);
    }

    #[test]
    fn test_ranked_orders() {
        let ds = sample();
        let by_gdp: Vec<&str> = ds.ranked(SortOrder::Gdp).iter().map(|r| r.name.as_str()).collect();
        assert_eq!(by_gdp, ["California", "Texas", "Vermont"]);

        let alpha: Vec<&str> = ds.ranked(SortOrder::Alpha).iter().map(|r| r.name.as_str()).collect();
        assert_eq!(alpha, ["California", "Texas", "Vermont"]);

        let ds = Dataset::new([
            StateRecord::new("Alaska", 65.0),
            StateRecord::new("Wyoming", 50.0),
            StateRecord::new("Texas", 2400.0),
        ]);
        let alpha: Vec<&str> = ds.ranked(SortOrder::Alpha).iter().map(|r| r.name.as_str()).collect();
        assert_eq!(alpha, ["Alaska", "Texas", "Wyoming"]);
    }

    #[test]
    fn test_comparison_sorted_and_skips_unknown() {
        let ds = sample();
        let cmp: Vec<&str> = ds
            .comparison(["Vermont", "Atlantis", "California"])
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(cmp, ["California", "Vermont"]);
    }

    #[test]
    fn test_bundled_dataset() {
        let ds = Dataset::us_2024();
        assert_eq!(ds.len(), 51);
        assert!(ds.records().iter().all(|r| r.gdp >= 0.0));
        assert_eq!(ds.top_contributor().map(|r| r.name.as_str()), Some("California"));
    }

    #[test]
    fn test_simulated_growth() {
        // "Texas" has 5 characters
        assert!((StateRecord::new("Texas", 1.0).simulated_growth() - 1.2).abs() < 1e-9);
        // "Ohio" has 4 characters
        assert!((StateRecord::new("Ohio", 1.0).simulated_growth() - 5.2).abs() < 1e-9);
    }
}
