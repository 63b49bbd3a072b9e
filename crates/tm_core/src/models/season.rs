//! Season labels derived from game dates.
//!
//! - Aug 1 .. Dec 31 of year Y: preseason Y-(Y+1)
//! - Jan 1 .. Feb 12 of year Y: preseason (Y-1)-Y
//! - Feb 14 .. Jul 1 of year Y: regular season Y
//!
//! Feb 13 and Jul 2 .. Jul 31 belong to no season.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum SeasonLabel {
    /// Fall/winter block spanning `start_year` and `start_year + 1`.
    Preseason { start_year: i32 },
    Regular { year: i32 },
}

impl SeasonLabel {
    pub fn from_date(date: NaiveDate) -> Option<Self> {
        let year = date.year();
        match (date.month(), date.day()) {
            (8..=12, _) => Some(SeasonLabel::Preseason { start_year: year }),
            (1, _) | (2, 1..=12) => Some(SeasonLabel::Preseason { start_year: year - 1 }),
            (2, 14..=29) | (3..=6, _) | (7, 1) => Some(SeasonLabel::Regular { year }),
            _ => None,
        }
    }

    /// Chronological key: a regular season precedes the preseason that
    /// starts the same August.
    fn sort_key(&self) -> (i32, u8) {
        match self {
            SeasonLabel::Regular { year } => (*year, 0),
            SeasonLabel::Preseason { start_year } => (*start_year, 1),
        }
    }
}

impl Ord for SeasonLabel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for SeasonLabel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SeasonLabel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SeasonLabel::Preseason { start_year } => {
                write!(f, "Preseason {}-{}", start_year, start_year + 1)
            }
            SeasonLabel::Regular { year } => write!(f, "{}", year),
        }
    }
}

impl FromStr for SeasonLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(span) = s.strip_prefix("Preseason ") {
            let (start, end) = span
                .split_once('-')
                .ok_or_else(|| format!("Invalid preseason label: {s}"))?;
            let start_year: i32 =
                start.parse().map_err(|_| format!("Invalid preseason label: {s}"))?;
            let end_year: i32 = end.parse().map_err(|_| format!("Invalid preseason label: {s}"))?;
            if end_year != start_year + 1 {
                return Err(format!("Preseason must span consecutive years: {s}"));
            }
            return Ok(SeasonLabel::Preseason { start_year });
        }
        s.parse::<i32>()
            .map(|year| SeasonLabel::Regular { year })
            .map_err(|_| format!("Invalid season label: {s}"))
    }
}

impl From<SeasonLabel> for String {
    fn from(label: SeasonLabel) -> Self {
        label.to_string()
    }
}

impl TryFrom<String> for SeasonLabel {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_preseason_spans_two_years() {
        let fall = SeasonLabel::from_date(d(2023, 9, 15)).unwrap();
        let winter = SeasonLabel::from_date(d(2024, 2, 12)).unwrap();
        assert_eq!(fall, winter);
        assert_eq!(fall.to_string(), "Preseason 2023-2024");
    }

    #[test]
    fn test_regular_season_bounds() {
        assert_eq!(SeasonLabel::from_date(d(2024, 2, 14)), Some(SeasonLabel::Regular { year: 2024 }));
        assert_eq!(SeasonLabel::from_date(d(2024, 7, 1)), Some(SeasonLabel::Regular { year: 2024 }));
        assert_eq!(SeasonLabel::from_date(d(2024, 8, 1)), Some(SeasonLabel::Preseason { start_year: 2024 }));
    }

    #[test]
    fn test_offseason_dates_have_no_label() {
        assert_eq!(SeasonLabel::from_date(d(2024, 2, 13)), None);
        assert_eq!(SeasonLabel::from_date(d(2024, 7, 2)), None);
        assert_eq!(SeasonLabel::from_date(d(2024, 7, 31)), None);
    }

    #[test]
    fn test_chronological_order() {
        let mut labels = vec![
            SeasonLabel::Preseason { start_year: 2024 },
            SeasonLabel::Regular { year: 2025 },
            SeasonLabel::Regular { year: 2024 },
            SeasonLabel::Preseason { start_year: 2023 },
        ];
        labels.sort();
        let shown: Vec<String> = labels.iter().map(|l| l.to_string()).collect();
        assert_eq!(shown, vec!["Preseason 2023-2024", "2024", "Preseason 2024-2025", "2025"]);
    }

    #[test]
    fn test_label_parse_matches_display() {
        for label in [SeasonLabel::Regular { year: 2025 }, SeasonLabel::Preseason { start_year: 2024 }] {
            assert_eq!(label.to_string().parse::<SeasonLabel>(), Ok(label));
        }
        assert!("Preseason 2024-2026".parse::<SeasonLabel>().is_err());
    }
}
