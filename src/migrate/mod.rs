//! # Alarm migration engine
//!
//! Moves one raw alarm and its dependents from the source database to the
//! destination database. Dependents are resolved against destination-side
//! equivalents first and only created when none exists; the assembled alarm
//! is written last, once every link is known.

pub mod alarm_type;
pub mod alarm_update;
pub mod assembler;
pub mod door;
pub mod duplicate_guard;
pub mod employee;
pub mod media;
pub mod ml;
pub mod orchestrator;
pub mod resolver;
pub mod user;

use serde_json::Value as JsonValue;

pub use assembler::{AlarmDraft, ResolvedLinks};
pub use orchestrator::{AlarmMigrator, MigrationOutcome, MigrationReport, run_migration};
pub use resolver::{Resolution, Resolvable, resolve_or_create};

/// Drops structured values that carry no information.
///
/// `null`, empty strings, empty arrays and empty objects are written as SQL NULL.
pub fn non_empty_json(value: Option<JsonValue>) -> Option<JsonValue> {
    match value {
        None | Some(JsonValue::Null) => None,
        Some(JsonValue::String(s)) if s.is_empty() => None,
        Some(JsonValue::Array(items)) if items.is_empty() => None,
        Some(JsonValue::Object(map)) if map.is_empty() => None,
        Some(other) => Some(other),
    }
}

pub(crate) fn record_dependency_failure(entity: &'static str) {
    metrics::counter!("alarm_dependency_failures_total", "entity" => entity).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_empty_json() {
        assert_eq!(non_empty_json(None), None);
        assert_eq!(non_empty_json(Some(JsonValue::Null)), None);
        assert_eq!(non_empty_json(Some(json!(""))), None);
        assert_eq!(non_empty_json(Some(json!([]))), None);
        assert_eq!(non_empty_json(Some(json!({}))), None);
        assert_eq!(
            non_empty_json(Some(json!({"zone": "A"}))),
            Some(json!({"zone": "A"}))
        );
        assert_eq!(non_empty_json(Some(json!(0))), Some(json!(0)));
    }
}
