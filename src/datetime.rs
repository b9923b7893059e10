use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

/// Accepted user input forms for a full date-time, tried in order.
pub const DATE_TIME_INPUT_FORMATS: [&str; 2] = ["%Y-%m-%d %H%M", "%d/%m/%Y %H%M"];

/// Accepted user input forms for a date on its own (used by `view`).
pub const DATE_INPUT_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

pub const STORAGE_FORMAT: &str = "%Y-%m-%d %H:%M";
pub const DISPLAY_FORMAT: &str = "%b %d %Y %H%M";
pub const DATE_DISPLAY_FORMAT: &str = "%b %d %Y";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateTimeError {
    #[error("Ugh, I can't understand that date. Try 'yyyy-MM-dd HHmm' or 'd/M/yyyy HHmm' format.")]
    InvalidDateTime(String),
    #[error("Ugh, I can't understand that date. Try 'yyyy-MM-dd' or 'd/M/yyyy' format.")]
    InvalidDate(String),
    #[error("stored date '{0}' is not in yyyy-MM-dd HH:mm form")]
    InvalidStorage(String),
}

pub fn parse_date_time(s: &str) -> Result<NaiveDateTime, DateTimeError> {
    let s = s.trim();
    DATE_TIME_INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| DateTimeError::InvalidDateTime(s.to_string()))
}

pub fn parse_date(s: &str) -> Result<NaiveDate, DateTimeError> {
    let s = s.trim();
    DATE_INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .ok_or_else(|| DateTimeError::InvalidDate(s.to_string()))
}

pub fn to_storage(dt: &NaiveDateTime) -> String {
    dt.format(STORAGE_FORMAT).to_string()
}

pub fn from_storage(s: &str) -> Result<NaiveDateTime, DateTimeError> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, STORAGE_FORMAT)
        .map_err(|_| DateTimeError::InvalidStorage(s.to_string()))
}

pub fn to_display(dt: &NaiveDateTime) -> String {
    dt.format(DISPLAY_FORMAT).to_string()
}

pub fn date_to_display(date: &NaiveDate) -> String {
    date.format(DATE_DISPLAY_FORMAT).to_string()
}
