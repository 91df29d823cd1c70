//! Query form of the historical graph.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use log::debug;
use serde::{Deserialize, Serialize};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMATS: [&str; 2] = ["%H:%M", "%H:%M:%S"];

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HistoryRange {
    pub start_date: String,
    pub start_time: String,
    pub end_date: String,
    pub end_time: String,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct HistoryRangeValidation {
    pub date: bool,
    pub time: bool,
    pub range: bool,
}

impl HistoryRangeValidation {
    pub fn is_valid(&self) -> bool {
        self.date && self.time && self.range
    }

    pub fn first_error(&self) -> Option<&'static str> {
        if !self.date {
            return Some("history.errors.date");
        }
        if !self.time {
            return Some("history.errors.time");
        }
        if !self.range {
            return Some("history.errors.range");
        }
        None
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

fn parse_time(value: &str) -> Option<NaiveTime> {
    TIME_FORMATS
        .iter()
        .find_map(|f| NaiveTime::parse_from_str(value.trim(), f).ok())
}

impl HistoryRange {
    /// Start and end of the range when both ends parse
    pub fn to_bounds(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let start = parse_date(&self.start_date)?.and_time(parse_time(&self.start_time)?);
        let end = parse_date(&self.end_date)?.and_time(parse_time(&self.end_time)?);
        Some((start, end))
    }
}

pub fn validate_history_range(range: &HistoryRange) -> HistoryRangeValidation {
    let date = parse_date(&range.start_date).is_some() && parse_date(&range.end_date).is_some();
    let time = parse_time(&range.start_time).is_some() && parse_time(&range.end_time).is_some();
    let valid_range = match range.to_bounds() {
        Some((start, end)) => start < end,
        None => false,
    };

    let validation = HistoryRangeValidation { date, time, range: valid_range };
    if let Some(key) = validation.first_error() {
        debug!("History range {:?} is invalid: {}", range, key);
    }
    validation
}
