//! Next indexing time
//!
//! The index rebuild runs on a fixed UTC cadence. The site shows the next
//! run in the viewer's zone and in UTC, refreshed once a minute.

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveTime, Offset, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How often the displayed time is recomputed
pub const REFRESH_INTERVAL: std::time::Duration = std::time::Duration::from_secs(60);

/// Text used when no specific time can be shown
pub const FALLBACK_DETAIL: &str = "Could not display specific time.";

/// Indexing cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum IndexingSchedule {
    /// Every five minutes on the UTC clock
    EveryFiveMinutes,
    /// Once a day at a fixed UTC time
    Daily {
        /// Time of day, UTC
        at: NaiveTime,
    },
}

impl Default for IndexingSchedule {
    fn default() -> Self {
        Self::Daily {
            at: NaiveTime::from_hms_opt(14, 30, 0).unwrap_or_default(),
        }
    }
}

impl IndexingSchedule {
    /// Next run strictly after `now`, seconds zeroed
    ///
    /// `None` only if the date arithmetic overflows.
    #[must_use]
    pub fn next_run(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Self::EveryFiveMinutes => {
                // On a boundary minute the next run is the following boundary.
                let step = 5 - now.minute() % 5;
                let minute_start = now.with_second(0)?.with_nanosecond(0)?;
                minute_start.checked_add_signed(Duration::minutes(i64::from(step)))
            }
            Self::Daily { at } => {
                let at = at.with_nanosecond(0)?;
                let today = now.date_naive().and_time(at).and_utc();
                if today > now {
                    Some(today)
                } else {
                    today.checked_add_signed(Duration::days(1))
                }
            }
        }
    }

    /// Human description of the cadence
    #[must_use]
    pub fn cadence(&self) -> String {
        match self {
            Self::EveryFiveMinutes => "every 5 minutes".to_string(),
            Self::Daily { at } => format!("daily at {}", at.format("%H:%M")),
        }
    }
}

/// Zone used for the "local time" line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerZone {
    offset: FixedOffset,
}

impl ViewerZone {
    /// UTC
    #[must_use]
    pub fn utc() -> Self {
        Self {
            offset: Utc.fix(),
        }
    }

    /// Offset of the system clock right now
    #[must_use]
    pub fn system() -> Self {
        Self {
            offset: Local::now().offset().fix(),
        }
    }

    /// Fixed offset zone
    #[inline]
    #[must_use]
    pub fn fixed(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Configured `±HH:MM` offset, or the system zone when unset
    ///
    /// An unparseable offset is logged and UTC is used instead.
    #[must_use]
    pub fn resolve(configured: Option<&str>) -> Self {
        match configured {
            None => Self::system(),
            Some(raw) => Self::parse(raw).unwrap_or_else(|| {
                tracing::warn!(offset = raw, "could not read display offset, defaulting to UTC");
                Self::utc()
            }),
        }
    }

    /// Parse `±HH:MM`, `UTC` or `Z`
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("utc") || raw == "Z" {
            return Some(Self::utc());
        }
        raw.parse::<FixedOffset>().ok().map(Self::fixed)
    }

    /// Underlying offset
    #[inline]
    #[must_use]
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }
}

/// The two lines shown under the indexing heading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexingNotice {
    /// Line in the viewer's zone
    pub local_line: String,
    /// Line in UTC
    pub utc_line: String,
}

impl IndexingNotice {
    /// Render the notice for `now`
    #[must_use]
    pub fn render(schedule: &IndexingSchedule, now: DateTime<Utc>, zone: ViewerZone) -> Self {
        match schedule.next_run(now) {
            Some(next) => {
                let local = next.with_timezone(&zone.offset());
                Self {
                    local_line: format!("Next indexing at {} (local time)", local.format("%-H:%M")),
                    utc_line: format!("({} UTC)", next.format("%H:%M")),
                }
            }
            None => {
                tracing::error!(?schedule, %now, "could not compute next indexing time");
                Self::fallback(schedule)
            }
        }
    }

    /// Notice without a specific time
    #[must_use]
    pub fn fallback(schedule: &IndexingSchedule) -> Self {
        Self {
            local_line: format!("Next indexing runs {} (UTC).", schedule.cadence()),
            utc_line: FALLBACK_DETAIL.to_string(),
        }
    }
}

impl fmt::Display for IndexingNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.local_line, self.utc_line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, h, m, s).unwrap()
    }

    #[test]
    fn five_minutes_rounds_up() {
        let schedule = IndexingSchedule::EveryFiveMinutes;
        assert_eq!(schedule.next_run(at(10, 2, 31)), Some(at(10, 5, 0)));
        assert_eq!(schedule.next_run(at(10, 4, 59)), Some(at(10, 5, 0)));
    }

    #[test]
    fn five_minutes_on_boundary_skips_ahead() {
        let schedule = IndexingSchedule::EveryFiveMinutes;
        assert_eq!(schedule.next_run(at(10, 5, 0)), Some(at(10, 10, 0)));
        assert_eq!(schedule.next_run(at(10, 10, 42)), Some(at(10, 15, 0)));
    }

    #[test]
    fn five_minutes_rolls_over_day() {
        let schedule = IndexingSchedule::EveryFiveMinutes;
        let next = schedule.next_run(at(23, 58, 0)).unwrap();
        assert_eq!(next, Utc.with_ymd_and_hms(2024, 3, 11, 0, 0, 0).unwrap());
    }

    #[test]
    fn daily_before_and_after() {
        let schedule = IndexingSchedule::default();
        assert_eq!(schedule.next_run(at(9, 0, 0)), Some(at(14, 30, 0)));
        assert_eq!(
            schedule.next_run(at(14, 30, 0)),
            Some(Utc.with_ymd_and_hms(2024, 3, 11, 14, 30, 0).unwrap())
        );
        assert_eq!(
            schedule.next_run(at(20, 0, 0)),
            Some(Utc.with_ymd_and_hms(2024, 3, 11, 14, 30, 0).unwrap())
        );
    }

    #[test]
    fn notice_lines() {
        let zone = ViewerZone::parse("+02:00").unwrap();
        let notice = IndexingNotice::render(&IndexingSchedule::default(), at(9, 0, 0), zone);
        assert_eq!(notice.local_line, "Next indexing at 16:30 (local time)");
        assert_eq!(notice.utc_line, "(14:30 UTC)");
    }

    #[test]
    fn local_hour_is_not_padded() {
        let zone = ViewerZone::parse("-05:00").unwrap();
        let notice =
            IndexingNotice::render(&IndexingSchedule::EveryFiveMinutes, at(13, 1, 0), zone);
        assert_eq!(notice.local_line, "Next indexing at 8:05 (local time)");
        assert_eq!(notice.utc_line, "(13:05 UTC)");
    }

    #[test]
    fn fallback_notice() {
        let notice = IndexingNotice::fallback(&IndexingSchedule::EveryFiveMinutes);
        assert_eq!(notice.local_line, "Next indexing runs every 5 minutes (UTC).");
        assert_eq!(notice.utc_line, FALLBACK_DETAIL);
        assert_eq!(
            IndexingNotice::fallback(&IndexingSchedule::default()).local_line,
            "Next indexing runs daily at 14:30 (UTC)."
        );
    }

    #[test]
    fn zone_parsing() {
        assert_eq!(ViewerZone::parse("UTC"), Some(ViewerZone::utc()));
        assert_eq!(ViewerZone::parse("Z"), Some(ViewerZone::utc()));
        assert_eq!(
            ViewerZone::parse("+05:30").map(|z| z.offset().local_minus_utc()),
            Some(5 * 3600 + 30 * 60)
        );
        assert_eq!(ViewerZone::parse("Mars/Olympus"), None);
        assert_eq!(ViewerZone::resolve(Some("garbage")), ViewerZone::utc());
    }

    proptest! {
        #[test]
        fn next_run_is_future_aligned_boundary(secs in 0i64..4_000_000_000i64) {
            let now = Utc.timestamp_opt(secs, 0).unwrap();
            let next = IndexingSchedule::EveryFiveMinutes.next_run(now).unwrap();
            prop_assert!(next > now);
            prop_assert_eq!(next.second(), 0);
            prop_assert_eq!(next.minute() % 5, 0);
            prop_assert!(next - now <= Duration::minutes(5));
        }

        #[test]
        fn daily_run_is_within_a_day(secs in 0i64..4_000_000_000i64) {
            let now = Utc.timestamp_opt(secs, 0).unwrap();
            let next = IndexingSchedule::default().next_run(now).unwrap();
            prop_assert!(next > now);
            prop_assert!(next - now <= Duration::days(1));
            prop_assert_eq!((next.hour(), next.minute(), next.second()), (14, 30, 0));
        }
    }
}
