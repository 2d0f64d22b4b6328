//! Due date extraction.

use chrono::{Datelike, NaiveDate};
use tracing::trace;

use super::{ExtractionMatch, FieldExtractor};
use super::patterns::DATE_DMY;

/// Date format used both for parsing and for rendering due dates.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Due date extractor.
///
/// Every `DD/MM/YYYY` token inside the year window is a candidate; the latest
/// one is taken as the due date.
pub struct DueDateExtractor {
    min_year: i32,
    max_year: i32,
}

impl DueDateExtractor {
    /// Create a new extractor with the 2020-2030 window.
    pub fn new() -> Self {
        Self {
            min_year: 2020,
            max_year: 2030,
        }
    }

    /// Set the accepted year window (inclusive on both ends).
    pub fn with_year_window(mut self, min_year: i32, max_year: i32) -> Self {
        self.min_year = min_year;
        self.max_year = max_year;
        self
    }
}

impl Default for DueDateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DueDateExtractor {
    type Output = ExtractionMatch<NaiveDate>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().max_by_key(|m| m.value)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();

        for m in DATE_DMY.find_iter(text) {
            let date = match NaiveDate::parse_from_str(m.as_str(), DATE_FORMAT) {
                Ok(date) => date,
                Err(e) => {
                    trace!("Discarding date candidate {:?}: {}", m.as_str(), e);
                    continue;
                }
            };

            if !(self.min_year..=self.max_year).contains(&date.year()) {
                trace!("Discarding date {} outside {}-{}", date, self.min_year, self.max_year);
                continue;
            }

            results.push(
                ExtractionMatch::new(date, m.as_str()).with_position(m.start(), m.end()),
            );
        }

        results
    }
}

/// Extract the due date using the default year window.
pub fn extract_due_date(text: &str) -> Option<NaiveDate> {
    DueDateExtractor::new().extract(text).map(|m| m.value)
}

/// Render a date as `DD/MM/YYYY`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_date_in_window_wins() {
        let text = "Emissão 10/01/2019  Vencimento 15/06/2024  Limite 20/03/2031";
        let date = extract_due_date(text);
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 6, 15));
        assert_eq!(format_date(date.unwrap()), "15/06/2024");
    }

    #[test]
    fn test_latest_not_first() {
        let text = "Documento 02/01/2025\nVencimento 28/02/2025\nProcessamento 05/01/2025";
        assert_eq!(extract_due_date(text), NaiveDate::from_ymd_opt(2025, 2, 28));
    }

    #[test]
    fn test_invalid_calendar_dates_are_skipped() {
        let text = "31/02/2024 45/13/2025 10/10/2023";
        assert_eq!(extract_due_date(text), NaiveDate::from_ymd_opt(2023, 10, 10));
    }

    #[test]
    fn test_window_bounds_inclusive() {
        let extractor = DueDateExtractor::new();
        let all = extractor.extract_all("01/01/2020 31/12/2030 31/12/2019 01/01/2031");
        let values: Vec<NaiveDate> = all.iter().map(|m| m.value).collect();
        assert_eq!(
            values,
            [
                NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2030, 12, 31).unwrap(),
            ]
        );
    }

    #[test]
    fn test_custom_window() {
        let extractor = DueDateExtractor::new().with_year_window(2031, 2035);
        let result = extractor.extract("15/06/2024 20/03/2031");
        assert_eq!(result.map(|m| m.value), NaiveDate::from_ymd_opt(2031, 3, 20));
    }

    #[test]
    fn test_no_dates() {
        assert_eq!(extract_due_date("sem datas aqui 2024-06-15"), None);
    }
}
