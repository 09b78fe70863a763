//! Built-in validation rules

use serde_json::Value;

/// A single field-level validation rule.
///
/// Every rule except [`Required`] passes vacuously when the field is
/// absent, so optional inputs are only checked once they are supplied.
pub trait Rule: Send + Sync {
    /// Identifier used for custom message lookup (`"field.name"`).
    fn name(&self) -> &'static str;

    /// Whether `value` satisfies the rule. `None` means the field is absent.
    fn check(&self, value: Option<&Value>) -> bool;

    /// Default failure message; `attribute` is the human-readable field name.
    fn message(&self, attribute: &str) -> String;
}

/// The field must be present and non-empty.
pub struct Required;

impl Rule for Required {
    fn name(&self) -> &'static str {
        "required"
    }

    fn check(&self, value: Option<&Value>) -> bool {
        match value {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.is_empty(),
            Some(_) => true,
        }
    }

    fn message(&self, attribute: &str) -> String {
        format!("The {attribute} field is required.")
    }
}

pub struct IsBoolean;

impl Rule for IsBoolean {
    fn name(&self) -> &'static str {
        "boolean"
    }

    fn check(&self, value: Option<&Value>) -> bool {
        matches!(value, None | Some(Value::Bool(_)))
    }

    fn message(&self, attribute: &str) -> String {
        format!("The {attribute} field must be true or false.")
    }
}

pub struct IsInteger;

impl Rule for IsInteger {
    fn name(&self) -> &'static str {
        "integer"
    }

    fn check(&self, value: Option<&Value>) -> bool {
        match value {
            None => true,
            Some(Value::Number(n)) => n.is_i64() || n.is_u64(),
            Some(_) => false,
        }
    }

    fn message(&self, attribute: &str) -> String {
        format!("The {attribute} field must be an integer.")
    }
}

pub struct IsString;

impl Rule for IsString {
    fn name(&self) -> &'static str {
        "string"
    }

    fn check(&self, value: Option<&Value>) -> bool {
        matches!(value, None | Some(Value::String(_)))
    }

    fn message(&self, attribute: &str) -> String {
        format!("The {attribute} field must be a string.")
    }
}

/// Minimum string length, in characters.
pub struct MinLen(pub usize);

impl Rule for MinLen {
    fn name(&self) -> &'static str {
        "min_len"
    }

    fn check(&self, value: Option<&Value>) -> bool {
        match value {
            None => true,
            Some(Value::String(s)) => s.chars().count() >= self.0,
            Some(_) => false,
        }
    }

    fn message(&self, attribute: &str) -> String {
        format!("The {attribute} field must be at least {} characters.", self.0)
    }
}

/// Maximum string length, in characters.
pub struct MaxLen(pub usize);

impl Rule for MaxLen {
    fn name(&self) -> &'static str {
        "max_len"
    }

    fn check(&self, value: Option<&Value>) -> bool {
        match value {
            None => true,
            Some(Value::String(s)) => s.chars().count() <= self.0,
            Some(_) => false,
        }
    }

    fn message(&self, attribute: &str) -> String {
        format!(
            "The {attribute} field must not be longer than {} characters.",
            self.0
        )
    }
}

/// The value must match one of the listed strings.
pub struct OneOf(pub Vec<String>);

impl OneOf {
    pub fn of(values: &[&str]) -> Self {
        Self(values.iter().map(|v| v.to_string()).collect())
    }
}

impl Rule for OneOf {
    fn name(&self) -> &'static str {
        "one_of"
    }

    fn check(&self, value: Option<&Value>) -> bool {
        match value {
            None => true,
            Some(Value::String(s)) => self.0.iter().any(|candidate| candidate == s),
            Some(_) => false,
        }
    }

    fn message(&self, attribute: &str) -> String {
        format!("The {attribute} field must be one of: {}.", self.0.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn required_rejects_absent_null_and_empty() {
        assert!(!Required.check(None));
        assert!(!Required.check(Some(&Value::Null)));
        assert!(!Required.check(Some(&json!(""))));
        assert!(Required.check(Some(&json!("x"))));
        assert!(Required.check(Some(&json!(0))));
        assert!(Required.check(Some(&json!(false))));
    }

    #[test]
    fn type_rules_pass_when_field_is_absent() {
        assert!(IsBoolean.check(None));
        assert!(IsInteger.check(None));
        assert!(IsString.check(None));
        assert!(MinLen(3).check(None));
        assert!(OneOf::of(&["a"]).check(None));
    }

    #[test]
    fn integer_rejects_floats_and_strings() {
        assert!(IsInteger.check(Some(&json!(42))));
        assert!(IsInteger.check(Some(&json!(-7))));
        assert!(!IsInteger.check(Some(&json!(4.2))));
        assert!(!IsInteger.check(Some(&json!("42"))));
    }

    #[test]
    fn length_rules_count_characters() {
        assert!(MinLen(2).check(Some(&json!("ab"))));
        assert!(!MinLen(3).check(Some(&json!("ab"))));
        assert!(MaxLen(2).check(Some(&json!("ab"))));
        assert!(!MaxLen(1).check(Some(&json!("ab"))));
        // multi-byte characters count once
        assert!(MaxLen(2).check(Some(&json!("日本"))));
    }

    #[test]
    fn one_of_matches_exact_strings() {
        let rule = OneOf::of(&["daily", "weekly"]);
        assert!(rule.check(Some(&json!("daily"))));
        assert!(!rule.check(Some(&json!("monthly"))));
        assert!(!rule.check(Some(&json!(1))));
    }

    #[test]
    fn default_messages_name_the_attribute() {
        assert_eq!(Required.message("name"), "The name field is required.");
        assert_eq!(
            OneOf::of(&["a", "b"]).message("kind"),
            "The kind field must be one of: a, b."
        );
    }
}
