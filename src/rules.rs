//! Validation rules, structured error tags, and the error-message formatter seam

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Structured validation failure tag.
///
/// The engine never interprets these; they are forwarded to the injected
/// [`ErrorFormatter`] at the render boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum ErrorTag {
    #[error("value is required")]
    Empty,
    #[error("invalid format")]
    InvalidFormat,
    #[error("too short (minimum {0} characters)")]
    TooShort(usize),
    #[error("too long (maximum {0} characters)")]
    TooLong(usize),
    #[error("below minimum ({0})")]
    BelowMinimum(i64),
    #[error("above maximum ({0})")]
    AboveMaximum(i64),
    #[error("invalid date")]
    InvalidDate,
    #[error("invalid time")]
    InvalidTime,
    #[error("invalid phone number")]
    InvalidPhone,
    #[error("invalid name")]
    InvalidName,
    #[error("terms must be accepted")]
    NotAccepted,
    #[error("{0}")]
    Custom(String),
}

/// Maps error tags to display text.
///
/// Message sets are locale/domain-specific, so the formatter is supplied by
/// the caller rather than baked into the engine.
#[cfg_attr(test, mockall::automock)]
pub trait ErrorFormatter {
    /// Display text for a validation error tag
    fn message(&self, tag: &ErrorTag) -> String;
}

/// English fallback formatter using each tag's `Display` text
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMessages;

impl ErrorFormatter for DefaultMessages {
    fn message(&self, tag: &ErrorTag) -> String {
        tag.to_string()
    }
}

type RuleFn = dyn Fn(&str) -> Result<(), ErrorTag> + Send + Sync;

/// A validation rule over a field's raw text value.
///
/// An absent store value is checked as the empty string. Rules attached to a
/// field run in order; the first failure wins.
#[derive(Clone)]
pub struct Rule(Arc<RuleFn>);

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Rule(..)")
    }
}

impl Rule {
    /// Wrap a checking function as a rule
    pub fn new(check: impl Fn(&str) -> Result<(), ErrorTag> + Send + Sync + 'static) -> Self {
        Rule(Arc::new(check))
    }

    /// Run the rule against a raw value
    pub fn check(&self, raw: &str) -> Result<(), ErrorTag> {
        (self.0)(raw)
    }
}

/// Run rules in order, returning the first failure
pub fn check_all(rules: &[Rule], raw: &str) -> Result<(), ErrorTag> {
    for rule in rules {
        rule.check(raw)?;
    }
    Ok(())
}

/// The value must be non-empty after trimming
pub fn required() -> Rule {
    Rule::new(|raw| {
        if raw.trim().is_empty() {
            Err(ErrorTag::Empty)
        } else {
            Ok(())
        }
    })
}

/// Minimum character count (empty values pass; combine with `required`)
pub fn min_len(min: usize) -> Rule {
    Rule::new(move |raw| {
        if !raw.is_empty() && raw.chars().count() < min {
            Err(ErrorTag::TooShort(min))
        } else {
            Ok(())
        }
    })
}

/// Maximum character count
pub fn max_len(max: usize) -> Rule {
    Rule::new(move |raw| {
        if raw.chars().count() > max {
            Err(ErrorTag::TooLong(max))
        } else {
            Ok(())
        }
    })
}

/// Integer lower bound (non-numeric input fails as invalid format)
pub fn min_value(min: i64) -> Rule {
    Rule::new(move |raw| {
        if raw.is_empty() {
            return Ok(());
        }
        match raw.trim().parse::<i64>() {
            Ok(n) if n < min => Err(ErrorTag::BelowMinimum(min)),
            Ok(_) => Ok(()),
            Err(_) => Err(ErrorTag::InvalidFormat),
        }
    })
}

/// Integer upper bound (non-numeric input fails as invalid format)
pub fn max_value(max: i64) -> Rule {
    Rule::new(move |raw| {
        if raw.is_empty() {
            return Ok(());
        }
        match raw.trim().parse::<i64>() {
            Ok(n) if n > max => Err(ErrorTag::AboveMaximum(max)),
            Ok(_) => Ok(()),
            Err(_) => Err(ErrorTag::InvalidFormat),
        }
    })
}

/// Calendar date in `YYYY-MM-DD` form
pub fn date() -> Rule {
    Rule::new(|raw| {
        if raw.is_empty() {
            return Ok(());
        }
        NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map(|_| ())
            .map_err(|_| ErrorTag::InvalidDate)
    })
}

/// Wall-clock time in `HH:MM` form
pub fn time() -> Rule {
    Rule::new(|raw| {
        if raw.is_empty() {
            return Ok(());
        }
        NaiveTime::parse_from_str(raw.trim(), "%H:%M")
            .map(|_| ())
            .map_err(|_| ErrorTag::InvalidTime)
    })
}

/// Phone number: digits plus `+ - ( )` and spaces, at least seven digits
pub fn phone() -> Rule {
    Rule::new(|raw| {
        if raw.is_empty() {
            return Ok(());
        }
        let allowed = raw
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | ' '));
        let digits = raw.chars().filter(char::is_ascii_digit).count();
        if allowed && digits >= 7 {
            Ok(())
        } else {
            Err(ErrorTag::InvalidPhone)
        }
    })
}

/// Person name: letters, spaces, hyphens, and apostrophes
pub fn person_name() -> Rule {
    Rule::new(|raw| {
        if raw.is_empty() {
            return Ok(());
        }
        let ok = raw
            .chars()
            .all(|c| c.is_alphabetic() || matches!(c, ' ' | '-' | '\''));
        if ok {
            Ok(())
        } else {
            Err(ErrorTag::InvalidName)
        }
    })
}

/// Domain-specific rule producing a custom tag on failure
pub fn custom(
    tag: impl Into<String>,
    check: impl Fn(&str) -> bool + Send + Sync + 'static,
) -> Rule {
    let tag = tag.into();
    Rule::new(move |raw| {
        if check(raw) {
            Ok(())
        } else {
            Err(ErrorTag::Custom(tag.clone()))
        }
    })
}
