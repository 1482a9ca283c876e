use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result, bail};

/// A win/loss pair parsed once from a `"W-L"` string.
///
/// Every record string coming off the nitty table or a team sheet is parsed
/// into one of these at construction time; comparisons never re-parse text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Record {
    pub wins: u32,
    pub losses: u32,
}

impl Record {
    pub fn new(wins: u32, losses: u32) -> Self {
        Self { wins, losses }
    }

    /// Games over .500. Negative when the team is under water.
    pub fn margin(&self) -> i64 {
        i64::from(self.wins) - i64::from(self.losses)
    }

    /// Sum of two sub-records, e.g. road + neutral.
    pub fn combined(&self, other: &Record) -> Record {
        Record {
            wins: self.wins + other.wins,
            losses: self.losses + other.losses,
        }
    }

    pub fn games(&self) -> u32 {
        self.wins + self.losses
    }

    pub fn winning_pct(&self) -> f64 {
        if self.games() == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(self.games())
        }
    }
}

impl FromStr for Record {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let Some((wins, losses)) = s.split_once('-') else {
            bail!("malformed record {s:?}: expected \"W-L\"");
        };
        let wins = wins
            .trim()
            .parse::<u32>()
            .with_context(|| format!("malformed wins in record {s:?}"))?;
        let losses = losses
            .trim()
            .parse::<u32>()
            .with_context(|| format!("malformed losses in record {s:?}"))?;
        Ok(Record { wins, losses })
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.wins, self.losses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_record() {
        let r: Record = "20-5".parse().unwrap();
        assert_eq!(r, Record::new(20, 5));
        assert_eq!(r.to_string(), "20-5");
    }

    #[test]
    fn parses_record_with_whitespace() {
        let r: Record = " 3 - 11 ".parse().unwrap();
        assert_eq!(r, Record::new(3, 11));
    }

    #[test]
    fn rejects_malformed_records() {
        assert!("".parse::<Record>().is_err());
        assert!("20".parse::<Record>().is_err());
        assert!("a-b".parse::<Record>().is_err());
        assert!("20-5-1".parse::<Record>().is_err());
    }

    #[test]
    fn margin_can_go_negative() {
        assert_eq!(Record::new(10, 15).margin(), -5);
        assert_eq!(Record::new(15, 14).margin(), 1);
    }

    #[test]
    fn combined_sums_components() {
        let road = Record::new(6, 4);
        let neutral = Record::new(2, 1);
        assert_eq!(road.combined(&neutral), Record::new(8, 5));
    }
}
