//! Drives one command invocation: validation, execution, outcome journaling

use crate::command::{Command, Context, Inputs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logger::{FileLogger, LogSink};
use crate::record::{LogRecord, Output, RunMeta};
use crate::validate::Validator;
use std::any::type_name;
use tracing::debug;

/// A pre-invocation step.
///
/// Returning `Err` aborts the pipeline before the command's `process` step
/// starts; the error becomes the run's outcome.
trait Step<C: Command> {
    fn name(&self) -> &'static str;

    fn run(&mut self, command: &C, ctx: &mut Context) -> Result<()>;
}

/// Validates the merged arguments and options against the command's rules.
///
/// On failure, all messages are joined with newlines into one
/// [`Error::Validation`] and the run aborts; on success the validated
/// subset is stored on the context for `process` to read.
struct ValidateStep;

impl<C: Command> Step<C> for ValidateStep {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn run(&mut self, command: &C, ctx: &mut Context) -> Result<()> {
        let mut data = Inputs::new();
        data.extend(command.arguments());
        // last write wins on a name collision
        data.extend(command.options());

        let mut validator = Validator::make(data, command.rules())
            .with_messages(command.messages())
            .with_attributes(command.attributes());

        if validator.fails() {
            let errors = validator.errors().to_vec();
            ctx.set_validation_errors(errors.clone());
            return Err(Error::Validation(errors.join("\n")));
        }

        ctx.set_validated(validator.validated());
        Ok(())
    }
}

/// Runs commands and writes one outcome record per invocation.
pub struct Runner<L: LogSink = FileLogger> {
    config: Config,
    logger: L,
}

impl Runner<FileLogger> {
    /// Resolve config from disk and environment; journal to the configured
    /// log file.
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        let logger = FileLogger::from_config(&config.logging);
        Ok(Self { config, logger })
    }

    pub fn with_config(config: Config) -> Self {
        let logger = FileLogger::from_config(&config.logging);
        Self { config, logger }
    }
}

impl<L: LogSink> Runner<L> {
    /// Journal through an injected sink instead of the file logger.
    pub fn with_logger(config: Config, logger: L) -> Self {
        Self { config, logger }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn logger(&self) -> &L {
        &self.logger
    }

    /// Run one command start to finish.
    ///
    /// Exactly one record is written per invocation when logging is
    /// enabled, success or failure. A sink failure is not caught here: it
    /// replaces the run's outcome, and no second write is attempted.
    pub fn run<C: Command>(&mut self, command: &mut C) -> Result<()> {
        let meta = RunMeta::new(type_name::<C>(), command.signature());
        let mut ctx = Context::new();

        let outcome = dispatch(command, &mut ctx);

        let record = match &outcome {
            Ok(output) => LogRecord::success(&meta, output),
            Err(err) => LogRecord::failure(&meta, err.to_string()),
        };

        if self.config.logging.enable {
            self.logger.add(record);
            self.logger.flush()?;
        }

        outcome.map(|_| ())
    }
}

fn dispatch<C: Command>(command: &mut C, ctx: &mut Context) -> Result<Output> {
    let mut steps: Vec<Box<dyn Step<C>>> = vec![Box::new(ValidateStep)];
    for step in &mut steps {
        debug!("running pre-step {}", step.name());
        step.run(command, ctx)?;
    }

    Ok(command.process(ctx)?)
}
