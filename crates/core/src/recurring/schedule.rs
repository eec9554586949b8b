//! Calendar arithmetic for recurrence.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::RecurringError;

/// How often a template fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// Every 7 days.
    Weekly,
    /// Every calendar month, clamping to the last valid day
    /// (Jan 31 -> Feb 28).
    Monthly,
    /// Every 3 calendar months, with the same clamping.
    Quarterly,
    /// Every 12 calendar months; Feb 29 clamps to Feb 28 in non-leap
    /// years.
    Yearly,
}

impl Frequency {
    /// Advances a run date by one period.
    ///
    /// # Errors
    ///
    /// Returns `DateOverflow` if the result leaves chrono's date range.
    pub fn advance(self, from: NaiveDate) -> Result<NaiveDate, RecurringError> {
        let next = match self {
            Self::Weekly => from.checked_add_days(Days::new(7)),
            Self::Monthly => from.checked_add_months(Months::new(1)),
            Self::Quarterly => from.checked_add_months(Months::new(3)),
            Self::Yearly => from.checked_add_months(Months::new(12)),
        };
        next.ok_or(RecurringError::DateOverflow)
    }

    /// Returns the string representation used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(Frequency::Weekly, date(2025, 6, 25), date(2025, 7, 2))]
    #[case(Frequency::Monthly, date(2025, 6, 15), date(2025, 7, 15))]
    #[case(Frequency::Monthly, date(2025, 1, 31), date(2025, 2, 28))]
    #[case(Frequency::Monthly, date(2024, 1, 31), date(2024, 2, 29))]
    #[case(Frequency::Monthly, date(2025, 3, 31), date(2025, 4, 30))]
    #[case(Frequency::Quarterly, date(2025, 11, 30), date(2026, 2, 28))]
    #[case(Frequency::Yearly, date(2024, 2, 29), date(2025, 2, 28))]
    #[case(Frequency::Yearly, date(2025, 7, 4), date(2026, 7, 4))]
    fn test_advance(
        #[case] frequency: Frequency,
        #[case] from: NaiveDate,
        #[case] expected: NaiveDate,
    ) {
        assert_eq!(frequency.advance(from).unwrap(), expected);
    }

    #[test]
    fn test_clamped_date_does_not_stick() {
        // After clamping to Feb 28, the next advance lands on Mar 28;
        // the original day-of-month is not restored.
        let feb = Frequency::Monthly.advance(date(2025, 1, 31)).unwrap();
        assert_eq!(feb, date(2025, 2, 28));
        let mar = Frequency::Monthly.advance(feb).unwrap();
        assert_eq!(mar, date(2025, 3, 28));
    }

    #[test]
    fn test_overflow_is_an_error() {
        assert!(matches!(
            Frequency::Yearly.advance(NaiveDate::MAX),
            Err(RecurringError::DateOverflow)
        ));
    }
}
