//! Form field validation.
//!
//! Each field runs an ordered chain of [`Rule`]s. A rule either passes the
//! (possibly rewritten) value on to the next one or stops the chain with a
//! message. Errors are collected per form so every failing field is reported
//! at once.

use chrono::NaiveDate;
use serde::Serialize;
use validator::ValidateLength;

/// One error attached to a form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub param: &'static str,
    pub msg: String,
}

pub trait Rule: Send + Sync {
    fn check(&self, value: String) -> Result<String, String>;
}

/// Strip surrounding whitespace
pub struct Trim;

impl Rule for Trim {
    fn check(&self, value: String) -> Result<String, String> {
        Ok(value.trim().to_string())
    }
}

pub struct MinLength {
    pub min: u64,
    pub message: String,
}

impl Rule for MinLength {
    fn check(&self, value: String) -> Result<String, String> {
        if value.validate_length(Some(self.min), None, None) {
            Ok(value)
        } else {
            Err(self.message.clone())
        }
    }
}

/// ASCII letters and digits only
pub struct Alphanumeric {
    pub message: String,
}

impl Rule for Alphanumeric {
    fn check(&self, value: String) -> Result<String, String> {
        if value.chars().all(|c| c.is_ascii_alphanumeric()) {
            Ok(value)
        } else {
            Err(self.message.clone())
        }
    }
}

/// Calendar date written as `YYYY-MM-DD`
pub struct IsoDate {
    pub message: String,
}

impl Rule for IsoDate {
    fn check(&self, value: String) -> Result<String, String> {
        match parse_date(&value) {
            Some(_) => Ok(value),
            None => Err(self.message.clone()),
        }
    }
}

pub struct OneOf {
    pub allowed: Vec<&'static str>,
    pub message: String,
}

impl Rule for OneOf {
    fn check(&self, value: String) -> Result<String, String> {
        if self.allowed.contains(&value.as_str()) {
            Ok(value)
        } else {
            Err(self.message.clone())
        }
    }
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Validation chain for a single named field
pub struct FieldValidator {
    param: &'static str,
    optional: bool,
    rules: Vec<Box<dyn Rule>>,
}

impl FieldValidator {
    pub fn new(param: &'static str) -> Self {
        Self {
            param,
            optional: false,
            rules: Vec::new(),
        }
    }

    pub fn rule(mut self, rule: impl Rule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn trim(self) -> Self {
        self.rule(Trim)
    }

    pub fn min_length(self, min: u64, message: impl Into<String>) -> Self {
        self.rule(MinLength {
            min,
            message: message.into(),
        })
    }

    pub fn alphanumeric(self, message: impl Into<String>) -> Self {
        self.rule(Alphanumeric {
            message: message.into(),
        })
    }

    pub fn iso_date(self, message: impl Into<String>) -> Self {
        self.rule(IsoDate {
            message: message.into(),
        })
    }

    pub fn one_of(self, allowed: Vec<&'static str>, message: impl Into<String>) -> Self {
        self.rule(OneOf {
            allowed,
            message: message.into(),
        })
    }

    /// Skip the remaining rules once the value is empty
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn validate(&self, input: &str) -> Result<String, FieldError> {
        let mut value = input.to_string();
        for rule in &self.rules {
            if self.optional && value.is_empty() {
                break;
            }
            value = rule.check(value).map_err(|msg| FieldError {
                param: self.param,
                msg,
            })?;
        }
        Ok(value)
    }
}

/// Collects field errors while a form is being validated
#[derive(Debug, Default)]
pub struct Validation {
    errors: Vec<FieldError>,
}

impl Validation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `validator` on `input`.
    ///
    /// On failure the error is recorded and the trimmed input is returned so
    /// the form can be shown again with what the user typed.
    pub fn field(&mut self, validator: &FieldValidator, input: &str) -> String {
        match validator.validate(input) {
            Ok(value) => value,
            Err(error) => {
                self.errors.push(error);
                input.trim().to_string()
            }
        }
    }

    pub fn finish(self) -> Result<(), Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}
