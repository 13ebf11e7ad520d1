//! Field validation run before any write reaches storage.
//!
//! Each entity declares an ordered list of [`FieldRule`]s. Checking a request
//! body walks that list in declaration order and yields at most one message
//! per failing field, so clients always see violations in a stable order.
//!
//! # Example
//!
//! ```ignore
//! use catalog_core::validation::{FieldRule, collect_violations};
//!
//! const TITLE: FieldRule = FieldRule::required("Title");
//! const DESCRIPTION: FieldRule = FieldRule::required("Description");
//!
//! let violations = collect_violations([(&TITLE, None), (&DESCRIPTION, Some(""))]);
//! assert_eq!(violations.len(), 2);
//! ```

use validator::ValidateEmail;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Text,
    Email,
}

/// Presence, non-emptiness and format rule for a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    label: &'static str,
    format: Format,
}

impl FieldRule {
    /// A field that must be present and contain non-whitespace text.
    pub const fn required(label: &'static str) -> Self {
        Self {
            label,
            format: Format::Text,
        }
    }

    /// A required field that must also be a well-formed email address.
    pub const fn email(label: &'static str) -> Self {
        Self {
            label,
            format: Format::Email,
        }
    }

    /// Returns the violation message for `value`, if any.
    pub fn check(&self, value: Option<&str>) -> Option<String> {
        match value {
            None => Some(format!("Please provide a value for \"{}\"", self.label)),
            Some(text) if text.trim().is_empty() => Some(format!("\"{}\" is required", self.label)),
            Some(text) if self.format == Format::Email && !text.validate_email() => {
                Some("Please provide a valid email address".to_string())
            }
            Some(_) => None,
        }
    }
}

/// Runs every check in order and returns the messages of the failing ones.
pub fn collect_violations<'a, I>(checks: I) -> Vec<String>
where
    I: IntoIterator<Item = (&'a FieldRule, Option<&'a str>)>,
{
    checks
        .into_iter()
        .filter_map(|(rule, value)| rule.check(value))
        .collect()
}

/// A request body that can be checked against its entity's field rules.
///
/// Validation consumes the raw body and produces the typed value a service
/// writes, or the ordered list of violations.
pub trait FieldValidation: Sized {
    type Validated;

    fn validate_fields(self) -> Result<Self::Validated, Vec<String>>;
}
