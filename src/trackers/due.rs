//! Decides which calendar dates a tracker is due on.
//!
//! Interval rules count from the tracker's start date with plain date arithmetic:
//! weeks are 7-day buckets from the start (not calendar weeks), and month/year
//! intervals ignore the day-of-month entirely. These rollover rules are relied on
//! by stored trackers and must not be "corrected" here.

use chrono::{Datelike, NaiveDate};

use super::data::{DueKind, DueRule, IntervalUnit};
use super::dates::weekday_name;

/// `candidate_weekday` is the lowercase English name of `candidate_date`.
/// Malformed rules are never due.
pub fn is_due(
    rule: &DueRule,
    start_date: NaiveDate,
    candidate_date: NaiveDate,
    candidate_weekday: &str,
) -> bool {
    if start_date > candidate_date {
        return false;
    }

    match &rule.kind {
        DueKind::SpecificDays => rule
            .specific_days
            .iter()
            .any(|day| day.eq_ignore_ascii_case(candidate_weekday)),
        DueKind::Interval => is_interval_due(rule, start_date, candidate_date),
        DueKind::Unrecognized(_) => false,
    }
}

fn is_interval_due(rule: &DueRule, start_date: NaiveDate, candidate_date: NaiveDate) -> bool {
    let step = rule.interval_value;
    if step <= 0 {
        return false;
    }

    let elapsed = match &rule.interval_type {
        Some(IntervalUnit::Day) => days_between(start_date, candidate_date),
        Some(IntervalUnit::Week) => days_between(start_date, candidate_date) / 7,
        Some(IntervalUnit::Month) => {
            i64::from(candidate_date.year() - start_date.year()) * 12
                + i64::from(candidate_date.month())
                - i64::from(start_date.month())
        }
        Some(IntervalUnit::Year) => i64::from(candidate_date.year() - start_date.year()),
        Some(IntervalUnit::Unrecognized(_)) | None => return false,
    };

    elapsed % step == 0
}

fn days_between(start_date: NaiveDate, candidate_date: NaiveDate) -> i64 {
    (candidate_date - start_date).num_days()
}

/// Shared shape of habit and target trackers as far as scheduling goes.
pub trait Scheduled {
    fn start_date(&self) -> NaiveDate;
    fn due(&self) -> &DueRule;

    fn is_due_on(&self, date: NaiveDate) -> bool {
        is_due(self.due(), self.start_date(), date, weekday_name(date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trackers::dates::parse_calendar_date;

    fn date(text: &str) -> NaiveDate {
        parse_calendar_date(text).unwrap()
    }

    fn due_on(rule: &DueRule, start: &str, candidate: &str) -> bool {
        let candidate = date(candidate);
        is_due(rule, date(start), candidate, weekday_name(candidate))
    }

    #[test]
    fn never_due_before_start() {
        let daily = DueRule::every(1, IntervalUnit::Day);
        let every_day = DueRule::specific_days(&[
            "monday",
            "tuesday",
            "wednesday",
            "thursday",
            "friday",
            "saturday",
            "sunday",
        ]);

        assert!(!due_on(&daily, "2024-01-10", "2024-01-09"));
        assert!(!due_on(&every_day, "2024-01-10", "2024-01-09"));
        assert!(due_on(&daily, "2024-01-10", "2024-01-10"));
    }

    #[test]
    fn specific_days_match_weekday_ignoring_case() {
        let rule = DueRule::specific_days(&["Monday", "wednesday"]);

        assert!(due_on(&rule, "2024-01-01", "2024-01-01"));
        assert!(due_on(&rule, "2024-01-01", "2024-01-03"));
        assert!(!due_on(&rule, "2024-01-01", "2024-01-02"));
        assert!(!due_on(&rule, "2024-01-01", "2024-01-07"));
    }

    #[test]
    fn empty_specific_days_are_never_due() {
        let rule = DueRule::specific_days(&[]);

        assert!(!due_on(&rule, "2024-01-01", "2024-01-01"));
    }

    #[test]
    fn every_three_days() {
        let rule = DueRule::every(3, IntervalUnit::Day);

        for candidate in ["2024-01-01", "2024-01-04", "2024-01-07"] {
            assert!(due_on(&rule, "2024-01-01", candidate), "{}", candidate);
        }
        for candidate in ["2024-01-02", "2024-01-03", "2024-01-05", "2024-01-06"] {
            assert!(!due_on(&rule, "2024-01-01", candidate), "{}", candidate);
        }
    }

    #[test]
    fn daily_interval_matches_day_count_across_month_boundaries() {
        let rule = DueRule::every(5, IntervalUnit::Day);
        let start = date("2024-01-28");

        for offset in 0..60 {
            let candidate = start + chrono::Duration::days(offset);
            assert_eq!(
                is_due(&rule, start, candidate, weekday_name(candidate)),
                offset % 5 == 0,
                "offset {}",
                offset
            );
        }
    }

    #[test]
    fn weeks_are_seven_day_buckets_from_start() {
        // Started on a Wednesday: days 0-6 fall in bucket 0, days 7-13 in bucket 1
        let rule = DueRule::every(2, IntervalUnit::Week);

        assert!(due_on(&rule, "2024-01-03", "2024-01-03"));
        assert!(due_on(&rule, "2024-01-03", "2024-01-09"));
        assert!(!due_on(&rule, "2024-01-03", "2024-01-10"));
        assert!(!due_on(&rule, "2024-01-03", "2024-01-16"));
        assert!(due_on(&rule, "2024-01-03", "2024-01-17"));
    }

    #[test]
    fn weekly_interval_of_one_is_due_every_day() {
        let rule = DueRule::every(1, IntervalUnit::Week);

        assert!(due_on(&rule, "2024-01-03", "2024-01-04"));
        assert!(due_on(&rule, "2024-01-03", "2024-01-12"));
    }

    #[test]
    fn months_ignore_day_of_month() {
        let rule = DueRule::every(1, IntervalUnit::Month);
        let mut candidate = date("2024-02-01");

        while candidate <= date("2024-02-29") {
            assert!(
                is_due(&rule, date("2024-01-31"), candidate, weekday_name(candidate)),
                "{}",
                candidate
            );
            candidate = candidate.succ_opt().unwrap();
        }
    }

    #[test]
    fn every_two_months_skips_odd_months() {
        let rule = DueRule::every(2, IntervalUnit::Month);

        assert!(due_on(&rule, "2024-11-15", "2024-11-20"));
        assert!(!due_on(&rule, "2024-11-15", "2024-12-15"));
        assert!(due_on(&rule, "2024-11-15", "2025-01-01"));
        assert!(due_on(&rule, "2024-11-15", "2025-03-31"));
    }

    #[test]
    fn years_ignore_month_and_day() {
        let rule = DueRule::every(2, IntervalUnit::Year);

        assert!(due_on(&rule, "2024-06-15", "2024-12-31"));
        assert!(!due_on(&rule, "2024-06-15", "2025-06-15"));
        assert!(due_on(&rule, "2024-06-15", "2026-01-01"));
    }

    #[test]
    fn malformed_rules_are_not_due() {
        let unknown_kind = DueRule {
            kind: DueKind::Unrecognized("lunar".to_string()),
            specific_days: vec!["monday".to_string()],
            interval_type: Some(IntervalUnit::Day),
            interval_value: 1,
        };
        let unknown_unit = DueRule::every(1, IntervalUnit::Unrecognized("hour".to_string()));
        let missing_unit = DueRule {
            interval_type: None,
            ..DueRule::every(1, IntervalUnit::Day)
        };
        let zero_step = DueRule::every(0, IntervalUnit::Day);
        let negative_step = DueRule::every(-2, IntervalUnit::Month);

        for rule in [
            unknown_kind,
            unknown_unit,
            missing_unit,
            zero_step,
            negative_step,
        ] {
            assert!(!due_on(&rule, "2024-01-01", "2024-01-01"), "{:?}", rule);
        }
    }

    #[test]
    fn inactive_branch_is_ignored() {
        let rule = DueRule {
            specific_days: vec!["tuesday".to_string()],
            ..DueRule::every(1, IntervalUnit::Day)
        };

        // 2024-01-01 is a Monday
        assert!(due_on(&rule, "2024-01-01", "2024-01-01"));
    }
}
