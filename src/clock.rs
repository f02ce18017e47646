//! Date and time labels for note file names, completion stamps, and the
//! thought log.
//!
//! Two date spellings coexist in note files written over the years:
//! zero-padded `MM-DD-YY` and unpadded-month `M-DD-YY`. Both are accepted
//! on read; writes use the single style selected by configuration.

use chrono::{DateTime, Datelike, Local};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Date spelling used when writing file names, headings, and stamps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DateStyle {
    /// Zero-padded `MM-DD-YY`
    #[default]
    Padded,
    /// Unpadded month `M-DD-YY`
    Plain,
}

impl DateStyle {
    /// Format a date in this style.
    pub fn date_label(self, dt: DateTime<Local>) -> String {
        match self {
            DateStyle::Padded => dt.format("%m-%d-%y").to_string(),
            DateStyle::Plain => format!("{}-{:02}-{:02}", dt.month(), dt.day(), dt.year() % 100),
        }
    }
}

/// Both accepted spellings of a date, padded first.
pub fn date_labels(dt: DateTime<Local>) -> [String; 2] {
    [
        DateStyle::Padded.date_label(dt),
        DateStyle::Plain.date_label(dt),
    ]
}

/// Time label `H:MM AM/PM` with no leading zero on the hour.
pub fn time_label(dt: DateTime<Local>) -> String {
    dt.format("%-I:%M %p").to_string()
}

/// Completion stamp appended to done tasks: `MM-DD-YY H:MM AM/PM`.
pub fn completion_stamp(dt: DateTime<Local>, style: DateStyle) -> String {
    format!("{} {}", style.date_label(dt), time_label(dt))
}

/// File name of the daily note for a given date: `MM-DD-YY.txt`.
pub fn note_file_name(dt: DateTime<Local>, style: DateStyle) -> String {
    format!("{}.txt", style.date_label(dt))
}

/// Today's stamp as the thought log needs it: every accepted heading
/// spelling for matching, the configured spelling for writing, and the
/// current time label.
#[derive(Debug, Clone)]
pub struct Today {
    pub labels: [String; 2],
    pub emit: String,
    pub time: String,
}

pub fn today(dt: DateTime<Local>, style: DateStyle) -> Today {
    Today {
        labels: date_labels(dt),
        emit: style.date_label(dt),
        time: time_label(dt),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_date_label_styles() {
        let cases = vec![
            (at(2026, 8, 7, 9, 5), DateStyle::Padded, "08-07-26"),
            (at(2026, 8, 7, 9, 5), DateStyle::Plain, "8-07-26"),
            (at(2026, 12, 31, 9, 5), DateStyle::Padded, "12-31-26"),
            (at(2026, 12, 31, 9, 5), DateStyle::Plain, "12-31-26"),
            (at(2027, 1, 2, 9, 5), DateStyle::Plain, "1-02-27"),
        ];

        for (dt, style, want) in cases {
            assert_eq!(style.date_label(dt), want);
        }
    }

    #[test]
    fn test_time_label_no_leading_zero() {
        let cases = vec![
            (at(2026, 8, 7, 9, 5), "9:05 AM"),
            (at(2026, 8, 7, 0, 30), "12:30 AM"),
            (at(2026, 8, 7, 12, 0), "12:00 PM"),
            (at(2026, 8, 7, 16, 55), "4:55 PM"),
            (at(2026, 8, 7, 23, 59), "11:59 PM"),
        ];

        for (dt, want) in cases {
            assert_eq!(time_label(dt), want);
        }
    }

    #[test]
    fn test_completion_stamp() {
        assert_eq!(
            completion_stamp(at(2026, 8, 7, 16, 55), DateStyle::Padded),
            "08-07-26 4:55 PM"
        );
    }

    #[test]
    fn test_note_file_name() {
        assert_eq!(
            note_file_name(at(2026, 8, 7, 0, 0), DateStyle::Padded),
            "08-07-26.txt"
        );
        assert_eq!(
            note_file_name(at(2026, 8, 7, 0, 0), DateStyle::Plain),
            "8-07-26.txt"
        );
    }
}
