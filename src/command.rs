//! The extension point application commands implement

use crate::error::Result;
use crate::record::Output;
use crate::validate::{Attributes, Messages, Rules, ValidatedData};
use indexmap::IndexMap;
use serde_json::Value;

/// Flat name → value mapping for a command's declared inputs.
pub type Inputs = IndexMap<String, Value>;

/// A single CLI-invokable unit of work.
///
/// Only [`signature`](Command::signature) and [`process`](Command::process)
/// are required. Commands that want their inputs checked before `process`
/// runs declare [`rules`](Command::rules), and may refine the resulting
/// messages with [`messages`](Command::messages) and
/// [`attributes`](Command::attributes).
pub trait Command {
    /// Human-identifying string recorded with every run outcome.
    fn signature(&self) -> &str;

    /// Positional inputs by name.
    fn arguments(&self) -> Inputs {
        Inputs::new()
    }

    /// Flag and option inputs by name. On a name collision with an
    /// argument, the option wins.
    fn options(&self) -> Inputs {
        Inputs::new()
    }

    fn rules(&self) -> Rules {
        Rules::new()
    }

    fn messages(&self) -> Messages {
        Messages::new()
    }

    fn attributes(&self) -> Attributes {
        Attributes::new()
    }

    /// The command's actual work.
    ///
    /// The returned error is re-propagated to the caller unchanged after
    /// the failure record is written.
    fn process(&mut self, ctx: &Context) -> anyhow::Result<Output>;
}

/// Per-invocation state handed to `process`. Strictly local to one run.
#[derive(Debug, Default)]
pub struct Context {
    validated: ValidatedData,
    validation_errors: Vec<String>,
}

impl Context {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set_validated(&mut self, validated: ValidatedData) {
        self.validated = validated;
    }

    pub(crate) fn set_validation_errors(&mut self, errors: Vec<String>) {
        self.validation_errors = errors;
    }

    /// Validated value for `key`.
    ///
    /// Fails with [`Error::NotFound`](crate::Error::NotFound) when the key
    /// was not part of the validated output, including when no validation
    /// ran at all.
    pub fn validated(&self, key: &str) -> Result<&Value> {
        self.validated.get(key)
    }

    /// The whole validated mapping.
    pub fn validated_all(&self) -> &ValidatedData {
        &self.validated
    }

    /// Failure messages from the validation pass; empty when it passed.
    pub fn validation_errors(&self) -> &[String] {
        &self.validation_errors
    }
}
