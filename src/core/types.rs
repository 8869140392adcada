//! core::types
//!
//! Value classification for stored strings.
//!
//! # Types
//!
//! - [`ValueKind`] - Whether a stored string takes part in numeric accumulation
//!
//! # Classification
//!
//! A value is numeric iff it matches `-?[0-9]+`: an optional leading minus
//! followed by at least one ASCII digit. Leading zeros are allowed, a leading
//! `+` is not. Classification is a property of the string itself and is
//! recomputed on every merge; nothing about it is stored.
//!
//! # Examples
//!
//! ```
//! use keytally::core::types::ValueKind;
//!
//! assert_eq!(ValueKind::of("42"), ValueKind::Numeric);
//! assert_eq!(ValueKind::of("-007"), ValueKind::Numeric);
//! assert_eq!(ValueKind::of("+1"), ValueKind::Text);
//! assert_eq!(ValueKind::of("-"), ValueKind::Text);
//! ```

/// How a stored value behaves when merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Matches `-?[0-9]+`; accumulates with other numeric values.
    Numeric,
    /// Anything else; always overwritten.
    Text,
}

impl ValueKind {
    /// Classify a value string.
    pub fn of(value: &str) -> Self {
        let digits = value.strip_prefix('-').unwrap_or(value);
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            ValueKind::Numeric
        } else {
            ValueKind::Text
        }
    }

    /// Check if this is the numeric kind.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ValueKind::Numeric)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_are_numeric() {
        assert!(ValueKind::of("0").is_numeric());
        assert!(ValueKind::of("314159").is_numeric());
        assert!(ValueKind::of("0007").is_numeric());
    }

    #[test]
    fn negative_digits_are_numeric() {
        assert!(ValueKind::of("-1").is_numeric());
        assert!(ValueKind::of("-0").is_numeric());
    }

    #[test]
    fn out_of_range_digits_are_still_numeric() {
        // Range checking happens at merge time, not classification time.
        assert!(ValueKind::of("21474836470").is_numeric());
    }

    #[test]
    fn everything_else_is_text() {
        for value in ["", "-", "+1", "1.5", " 1", "1 ", "B52", "--1", "1-", "one"] {
            assert_eq!(ValueKind::of(value), ValueKind::Text, "{value:?}");
        }
    }

    #[test]
    fn non_ascii_digits_are_text() {
        assert_eq!(ValueKind::of("١٢"), ValueKind::Text);
    }
}
