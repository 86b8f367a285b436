//! Reporting-period resolution from flags and configuration.

use crate::analytics::ReportingPeriod;
use crate::config::ReportConfig;
use crate::error::{InsightError, InsightResult};
use chrono::{Days, NaiveDate};

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(field: &str, raw: &str) -> InsightResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|e| {
        InsightError::invalid_value(field, &format!("Expected YYYY-MM-DD, got '{}'", raw))
            .with_details(e.to_string())
    })
}

/// Work out the reporting period.
///
/// Explicit dates win; a single date stands for both ends. Without dates,
/// `period_days` yields the last N days ending `today`. Otherwise there is
/// no period.
pub fn resolve_period(
    from: Option<&str>,
    to: Option<&str>,
    report: &ReportConfig,
    today: NaiveDate,
) -> InsightResult<Option<ReportingPeriod>> {
    let from = from.map(|raw| parse_date("from", raw)).transpose()?;
    let to = to.map(|raw| parse_date("to", raw)).transpose()?;

    let range = match (from, to) {
        (Some(start), Some(end)) => Some((start, end)),
        (Some(day), None) | (None, Some(day)) => Some((day, day)),
        (None, None) => report.period_days.map(|days| {
            let start = today
                .checked_sub_days(Days::new(u64::from(days.saturating_sub(1))))
                .unwrap_or(NaiveDate::MIN);
            (start, today)
        }),
    };

    Ok(range.map(|(start, end)| {
        ReportingPeriod::new(start, end).with_utc_offset_minutes(report.utc_offset_minutes)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_explicit_dates() {
        let period = resolve_period(
            Some("2024-03-01"),
            Some("2024-03-31"),
            &ReportConfig::default(),
            day(2024, 6, 1),
        )
        .unwrap()
        .unwrap();
        assert_eq!(period.start, day(2024, 3, 1));
        assert_eq!(period.end, day(2024, 3, 31));
    }

    #[test]
    fn test_single_date_covers_one_day() {
        let period = resolve_period(
            None,
            Some("2024-03-05"),
            &ReportConfig::default(),
            day(2024, 6, 1),
        )
        .unwrap()
        .unwrap();
        assert_eq!((period.start, period.end), (day(2024, 3, 5), day(2024, 3, 5)));
    }

    #[test]
    fn test_period_days_from_config() {
        let report = ReportConfig {
            period_days: Some(7),
            utc_offset_minutes: -300,
            ..Default::default()
        };
        let period = resolve_period(None, None, &report, day(2024, 6, 10)).unwrap().unwrap();
        assert_eq!(period.start, day(2024, 6, 4));
        assert_eq!(period.end, day(2024, 6, 10));
        assert_eq!(period.utc_offset_minutes, -300);
    }

    #[test]
    fn test_no_period() {
        assert!(resolve_period(None, None, &ReportConfig::default(), day(2024, 1, 1))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_bad_date() {
        let err = resolve_period(
            Some("03/01/2024"),
            None,
            &ReportConfig::default(),
            day(2024, 1, 1),
        )
        .unwrap_err();
        assert_eq!(err.field.as_deref(), Some("from"));
    }

    #[test]
    fn test_inverted_dates_are_kept() {
        let period = resolve_period(
            Some("2024-03-31"),
            Some("2024-03-01"),
            &ReportConfig::default(),
            day(2024, 6, 1),
        )
        .unwrap()
        .unwrap();
        assert!(period.is_inverted());
    }
}
