//! Input validation
//!
//! [`Validator`] collects every failing field as `field: message` and turns
//! them into one [`ApiError::Validation`] joined with `"; "`.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;

pub const REQUIRED: &str = "value is required";
pub const NON_BLANK: &str = "value must not be empty or whitespace";
pub const INVALID_DATE: &str = "invalid date";
pub const DATE_IN_PAST: &str = "date must be in the past";
pub const NOT_NUMBER: &str = "must be a number";
pub const GREATER_THAN_ZERO: &str = "must be greater than 0";
pub const EMAIL_REQUIRED: &str = "email is required";
pub const INVALID_CREDENTIALS: &str = "invalid credentials";

const MAX_INDUSTRY_LEN: usize = 255;

/// Accumulates field errors in the order they are found.
#[derive(Debug, Default)]
pub struct Validator {
    issues: Vec<String>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl std::fmt::Display) {
        self.issues.push(format!("{field}: {message}"));
    }

    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// `Ok(())` when nothing failed, otherwise all issues in one error.
    pub fn finish(self) -> Result<(), ApiError> {
        if self.issues.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(self.issues.join("; ")))
        }
    }

    /// Required string, trimmed, not blank.
    pub fn required_text(&mut self, field: &str, value: Option<&str>) -> Option<String> {
        match value {
            None => {
                self.push(field, REQUIRED);
                None
            }
            Some(raw) => self.text(field, raw),
        }
    }

    /// Optional string; when present it must not be blank.
    pub fn optional_text(&mut self, field: &str, value: Option<&str>) -> Option<String> {
        value.and_then(|raw| self.text(field, raw))
    }

    fn text(&mut self, field: &str, raw: &str) -> Option<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            self.push(field, NON_BLANK);
            return None;
        }
        Some(trimmed.to_string())
    }

    /// Non-empty, untrimmed string, as for emails.
    pub fn non_empty(&mut self, field: &str, value: Option<&str>) -> Option<String> {
        match value {
            Some(raw) if !raw.is_empty() => Some(raw.to_string()),
            _ => {
                self.push(field, REQUIRED);
                None
            }
        }
    }

    /// Nullable industry: trimmed and at most 255 characters.
    pub fn industry(&mut self, field: &str, value: Option<&str>) -> Option<String> {
        let trimmed = value?.trim();
        if trimmed.chars().count() > MAX_INDUSTRY_LEN {
            self.push(
                field,
                format!("must contain at most {MAX_INDUSTRY_LEN} characters"),
            );
            return None;
        }
        Some(trimmed.to_string())
    }

    /// A date strictly before now.
    pub fn past_date(&mut self, field: &str, raw: &str) -> Option<DateTime<Utc>> {
        let Some(date) = parse_date(raw) else {
            self.push(field, INVALID_DATE);
            return None;
        };
        if date >= Utc::now() {
            self.push(field, DATE_IN_PAST);
            return None;
        }
        Some(date)
    }

    pub fn required_past_date(&mut self, field: &str, raw: Option<&str>) -> Option<DateTime<Utc>> {
        match raw {
            Some(raw) => self.past_date(field, raw),
            None => {
                self.push(field, REQUIRED);
                None
            }
        }
    }

    /// Finite number greater than zero, from a JSON number or numeric string.
    pub fn positive_amount(&mut self, field: &str, value: &Value) -> Option<f64> {
        let number = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        match number {
            Some(n) if n.is_finite() => {
                if n > 0.0 {
                    Some(n)
                } else {
                    self.push(field, GREATER_THAN_ZERO);
                    None
                }
            }
            _ => {
                self.push(field, NOT_NUMBER);
                None
            }
        }
    }

    /// A present id; returns it parsed when it is a well-formed UUID.
    pub fn required_id(&mut self, field: &str, value: Option<&str>) -> Option<Uuid> {
        let raw = self.non_empty(field, value)?;
        self.id(field, &raw)
    }

    pub fn optional_id(&mut self, field: &str, value: Option<&str>) -> Option<Uuid> {
        match value {
            None => None,
            Some(_) => self.required_id(field, value),
        }
    }

    fn id(&mut self, field: &str, raw: &str) -> Option<Uuid> {
        match Uuid::parse_str(raw) {
            Ok(id) => Some(id),
            Err(_) => {
                self.push(field, "must be a valid id");
                None
            }
        }
    }
}

/// Accepts RFC 3339 timestamps and plain `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
