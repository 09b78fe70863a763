//! Rule-based validation over a command's merged arguments and options

mod rules;

pub use rules::{IsBoolean, IsInteger, IsString, MaxLen, MinLen, OneOf, Required, Rule};

use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde_json::Value;

/// Field → rules mapping, kept in declaration order.
#[derive(Default)]
pub struct Rules(IndexMap<String, Vec<Box<dyn Rule>>>);

impl Rules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule for `field`.
    pub fn rule(mut self, field: impl Into<String>, rule: impl Rule + 'static) -> Self {
        self.0.entry(field.into()).or_default().push(Box::new(rule));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn iter(&self) -> impl Iterator<Item = (&String, &Vec<Box<dyn Rule>>)> {
        self.0.iter()
    }
}

/// Custom failure messages keyed `"field.rule_name"`.
pub type Messages = IndexMap<String, String>;

/// Human-readable field names substituted into default messages.
pub type Attributes = IndexMap<String, String>;

/// The validated subset of the input, in rule declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedData(IndexMap<String, Value>);

impl ValidatedData {
    /// Value for `key`, or [`Error::NotFound`] when it was not validated.
    pub fn get(&self, key: &str) -> Result<&Value> {
        self.0.get(key).ok_or_else(|| Error::NotFound(key.to_string()))
    }

    pub fn all(&self) -> &IndexMap<String, Value> {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

struct Outcome {
    errors: Vec<String>,
    validated: IndexMap<String, Value>,
}

/// Evaluates a rule set over one flat input mapping.
///
/// Every failing rule contributes a message; failures are collected in
/// field declaration order, then rule order, never just the first.
pub struct Validator {
    data: IndexMap<String, Value>,
    rules: Rules,
    messages: Messages,
    attributes: Attributes,
    outcome: Option<Outcome>,
}

impl Validator {
    pub fn make(data: IndexMap<String, Value>, rules: Rules) -> Self {
        Self {
            data,
            rules,
            messages: Messages::new(),
            attributes: Attributes::new(),
            outcome: None,
        }
    }

    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn fails(&mut self) -> bool {
        !self.run().errors.is_empty()
    }

    /// All failure messages from the pass.
    pub fn errors(&mut self) -> &[String] {
        &self.run().errors
    }

    /// Fields under validation that were present in the input and
    /// error-free. Meaningful only when the pass succeeded.
    pub fn validated(&mut self) -> ValidatedData {
        ValidatedData(self.run().validated.clone())
    }

    // The pass runs once; later accessors reuse the outcome.
    fn run(&mut self) -> &Outcome {
        let Self {
            data,
            rules,
            messages,
            attributes,
            outcome,
        } = self;

        outcome.get_or_insert_with(|| evaluate(data, rules, messages, attributes))
    }
}

fn evaluate(
    data: &IndexMap<String, Value>,
    rules: &Rules,
    messages: &Messages,
    attributes: &Attributes,
) -> Outcome {
    let mut errors = Vec::new();
    let mut validated = IndexMap::new();

    for (field, field_rules) in rules.iter() {
        let value = data.get(field);
        let mut clean = true;

        for rule in field_rules {
            if rule.check(value) {
                continue;
            }
            clean = false;
            errors.push(message_for(field, rule.as_ref(), messages, attributes));
        }

        if clean {
            if let Some(value) = value {
                validated.insert(field.clone(), value.clone());
            }
        }
    }

    Outcome { errors, validated }
}

fn message_for(field: &str, rule: &dyn Rule, messages: &Messages, attributes: &Attributes) -> String {
    let key = format!("{field}.{}", rule.name());
    if let Some(custom) = messages.get(&key) {
        return custom.clone();
    }

    let attribute = attributes.get(field).map(String::as_str).unwrap_or(field);
    rule.message(attribute)
}
