// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::OffsetDateTime;
use time::macros::format_description;

use crate::{Locale, TriageError, TriageResult};

const SECONDS_PER_DAY: i64 = 86_400;

/// Whole days elapsed from `date` to `now`, floored. Fails when `date` is
/// later than `now`.
pub fn elapsed_days(date: OffsetDateTime, now: OffsetDateTime) -> TriageResult<i64> {
    if date > now {
        return Err(TriageError::InvalidTimestamp { date, now });
    }
    Ok((now - date).whole_seconds().div_euclid(SECONDS_PER_DAY))
}

/// Human-relative label for a creation date as seen from `now`.
///
/// Same elapsed day is "today", one day is "yesterday", two to six days
/// render as "N days ago", anything older falls back to `DD/MM/YYYY`.
pub fn format_relative(
    date: OffsetDateTime,
    now: OffsetDateTime,
    locale: Locale,
) -> TriageResult<String> {
    let strings = locale.strings();
    let label = match elapsed_days(date, now)? {
        0 => strings.today.to_owned(),
        1 => strings.yesterday.to_owned(),
        days @ 2..=6 => strings.days_ago(days),
        _ => format_absolute(date),
    };
    Ok(label)
}

pub fn format_absolute(date: OffsetDateTime) -> String {
    date.format(&format_description!("[day]/[month]/[year]"))
        .expect("date format is valid")
}

#[cfg(test)]
mod tests {
    use super::{elapsed_days, format_absolute, format_relative};
    use crate::{Locale, TriageError};
    use time::Duration;
    use time::macros::datetime;

    const NOW: time::OffsetDateTime = datetime!(2025-10-24 15:30 UTC);

    #[test]
    fn same_instant_is_today() -> anyhow::Result<()> {
        assert_eq!(format_relative(NOW, NOW, Locale::Es)?, "Hoy");
        assert_eq!(format_relative(NOW, NOW, Locale::En)?, "today");
        Ok(())
    }

    #[test]
    fn one_day_back_is_yesterday() -> anyhow::Result<()> {
        let date = NOW - Duration::days(1);
        assert_eq!(format_relative(date, NOW, Locale::Es)?, "Ayer");
        assert_eq!(format_relative(date, NOW, Locale::En)?, "yesterday");
        Ok(())
    }

    #[test]
    fn three_days_back_counts_days() -> anyhow::Result<()> {
        let date = NOW - Duration::days(3);
        assert_eq!(format_relative(date, NOW, Locale::Es)?, "Hace 3 días");
        assert_eq!(format_relative(date, NOW, Locale::En)?, "3 days ago");
        Ok(())
    }

    #[test]
    fn six_days_is_relative_and_seven_is_absolute() -> anyhow::Result<()> {
        let six = NOW - Duration::days(6);
        assert_eq!(format_relative(six, NOW, Locale::En)?, "6 days ago");

        let seven = NOW - Duration::days(7);
        assert_eq!(format_relative(seven, NOW, Locale::En)?, "17/10/2025");
        Ok(())
    }

    #[test]
    fn ten_days_back_is_zero_padded_absolute() -> anyhow::Result<()> {
        let date = datetime!(2025-10-05 0:00 UTC);
        let now = datetime!(2025-10-15 0:00 UTC);
        assert_eq!(format_relative(date, now, Locale::Es)?, "05/10/2025");
        Ok(())
    }

    #[test]
    fn day_difference_is_elapsed_time_not_calendar_days() -> anyhow::Result<()> {
        // 23 hours apart but on different calendar days.
        let date = datetime!(2025-10-23 16:00 UTC);
        let now = datetime!(2025-10-24 15:00 UTC);
        assert_eq!(elapsed_days(date, now)?, 0);
        assert_eq!(format_relative(date, now, Locale::Es)?, "Hoy");

        let now = datetime!(2025-10-25 15:59 UTC);
        assert_eq!(elapsed_days(date, now)?, 1);
        Ok(())
    }

    #[test]
    fn future_date_is_rejected() {
        let date = NOW + Duration::seconds(1);
        let error = format_relative(date, NOW, Locale::Es).expect_err("future date should fail");
        assert_eq!(error, TriageError::InvalidTimestamp { date, now: NOW });
    }

    #[test]
    fn absolute_format_is_day_month_year() {
        assert_eq!(format_absolute(datetime!(2025-01-02 0:00 UTC)), "02/01/2025");
    }
}
