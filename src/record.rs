//! Run outcomes and the structured records written for them

use crate::error::Result;
use chrono::Local;
use indexmap::IndexMap;
use serde_json::Value;

/// Successful return value of a command's `process` step.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// A single human-readable message.
    Message(String),
    /// A field-structured payload, logged field by field.
    Fields(IndexMap<String, Value>),
}

impl From<String> for Output {
    fn from(message: String) -> Self {
        Output::Message(message)
    }
}

impl From<&str> for Output {
    fn from(message: &str) -> Self {
        Output::Message(message.to_string())
    }
}

impl From<IndexMap<String, Value>> for Output {
    fn from(fields: IndexMap<String, Value>) -> Self {
        Output::Fields(fields)
    }
}

/// Fixed metadata attached to every log record.
#[derive(Debug, Clone)]
pub struct RunMeta {
    pub datetime: String,
    pub command: String,
    pub signature: String,
}

impl RunMeta {
    /// Capture the wall clock now for the given command identity.
    pub fn new(command: impl Into<String>, signature: impl Into<String>) -> Self {
        Self {
            datetime: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            command: command.into(),
            signature: signature.into(),
        }
    }
}

/// One structured entry describing the outcome of a single run.
///
/// Insertion order is preserved for the file output: metadata first, then
/// the command's payload, with the boolean `result` always last.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct LogRecord(IndexMap<String, Value>);

impl LogRecord {
    /// Record for a run whose `process` step returned `output`.
    pub fn success(meta: &RunMeta, output: &Output) -> Self {
        let mut map = Self::base(meta);
        match output {
            Output::Message(message) => {
                map.insert("message".to_string(), Value::String(message.clone()));
            }
            Output::Fields(fields) => {
                for (key, value) in fields {
                    map.insert(key.clone(), value.clone());
                }
            }
        }
        Self::seal(map, true)
    }

    /// Record for a run that failed; `message` is the error's display text.
    pub fn failure(meta: &RunMeta, message: impl Into<String>) -> Self {
        let mut map = Self::base(meta);
        map.insert("message".to_string(), Value::String(message.into()));
        Self::seal(map, false)
    }

    fn base(meta: &RunMeta) -> IndexMap<String, Value> {
        let mut map = IndexMap::new();
        map.insert("datetime".to_string(), Value::String(meta.datetime.clone()));
        map.insert("command".to_string(), Value::String(meta.command.clone()));
        map.insert("signature".to_string(), Value::String(meta.signature.clone()));
        map
    }

    // The injected flag wins over any payload field named `result` and
    // always sits last.
    fn seal(mut map: IndexMap<String, Value>, result: bool) -> Self {
        map.shift_remove("result");
        map.insert("result".to_string(), Value::Bool(result));
        LogRecord(map)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn fields(&self) -> &IndexMap<String, Value> {
        &self.0
    }

    /// Single-line JSON rendering used by the file sink.
    pub fn to_line(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.0)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn meta() -> RunMeta {
        RunMeta {
            datetime: "2026-01-02 03:04:05".to_string(),
            command: "app::SyncCommand".to_string(),
            signature: "sync {--force}".to_string(),
        }
    }

    #[test]
    fn success_message_record() {
        let record = LogRecord::success(&meta(), &Output::from("synced 3 items"));

        assert_eq!(record.get("datetime"), Some(&json!("2026-01-02 03:04:05")));
        assert_eq!(record.get("command"), Some(&json!("app::SyncCommand")));
        assert_eq!(record.get("signature"), Some(&json!("sync {--force}")));
        assert_eq!(record.get("message"), Some(&json!("synced 3 items")));
        assert_eq!(record.get("result"), Some(&json!(true)));
    }

    #[test]
    fn success_fields_record_keeps_order_and_puts_result_last() {
        let mut fields = IndexMap::new();
        fields.insert("count".to_string(), json!(3));
        fields.insert("skipped".to_string(), json!(1));
        let record = LogRecord::success(&meta(), &Output::Fields(fields));

        let keys: Vec<&str> = record.fields().keys().map(|k| k.as_str()).collect();
        assert_eq!(
            keys,
            vec!["datetime", "command", "signature", "count", "skipped", "result"]
        );
        assert_eq!(record.get("result"), Some(&json!(true)));
    }

    #[test]
    fn payload_result_field_is_overwritten() {
        let mut fields = IndexMap::new();
        fields.insert("result".to_string(), json!("bogus"));
        let record = LogRecord::success(&meta(), &Output::Fields(fields));

        assert_eq!(record.get("result"), Some(&json!(true)));
        assert_eq!(record.fields().keys().last().map(|k| k.as_str()), Some("result"));
    }

    #[test]
    fn failure_record_carries_error_text() {
        let record = LogRecord::failure(&meta(), "disk full");

        assert_eq!(record.get("message"), Some(&json!("disk full")));
        assert_eq!(record.get("result"), Some(&json!(false)));
    }

    #[test]
    fn to_line_is_single_json_line() {
        let line = LogRecord::failure(&meta(), "disk full").to_line().unwrap();

        assert!(!line.contains('\n'));
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["result"], json!(false));
    }
}
