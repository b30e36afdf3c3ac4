//! Alarm type mapping.
//!
//! The source type id is turned into a type name in the source database and
//! that name is looked up in the destination. Mapping never fails the alarm:
//! every miss falls back to a configured value with a warning.

use sea_orm::DatabaseConnection;

use crate::config::DestinationConfig;
use crate::repositories::AlarmTypeRepository;

/// How the destination alarm type was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeMatch {
    /// Exactly one destination type carries the name
    Exact,
    /// Several destination types carry the name; the first was taken
    Ambiguous,
    /// No destination type carries the name; the fallback id was used
    Fallback,
}

/// Result of mapping a source alarm type onto the destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlarmTypeMapping {
    pub source_type_name: String,
    pub alarm_type_id: String,
    pub matched: TypeMatch,
}

/// Name of the source alarm type `alarm_type_id`.
///
/// Unknown ids (and lookup errors) yield the configured fallback type name.
pub async fn source_type_name(
    source: &DatabaseConnection,
    alarm_type_id: &str,
    target: &DestinationConfig,
) -> String {
    match AlarmTypeRepository::new(source).get_by_id(alarm_type_id).await {
        Ok(Some(alarm_type)) => alarm_type.alarm_type,
        Ok(None) => {
            tracing::warn!(
                alarm_type_id,
                fallback = %target.fallback_alarm_type_name,
                "Unknown source alarm type, using fallback type name"
            );
            target.fallback_alarm_type_name.clone()
        }
        Err(err) => {
            tracing::error!(
                alarm_type_id,
                error = %err,
                fallback = %target.fallback_alarm_type_name,
                "Failed to fetch source alarm type, using fallback type name"
            );
            target.fallback_alarm_type_name.clone()
        }
    }
}

/// Destination alarm type id for the type named `type_name`.
pub async fn map_type_name(
    dest: &DatabaseConnection,
    type_name: &str,
    target: &DestinationConfig,
) -> AlarmTypeMapping {
    let fallback = || AlarmTypeMapping {
        source_type_name: type_name.to_string(),
        alarm_type_id: target.fallback_alarm_type_id.clone(),
        matched: TypeMatch::Fallback,
    };

    let candidates = match AlarmTypeRepository::new(dest).find_by_name(type_name).await {
        Ok(candidates) => candidates,
        Err(err) => {
            tracing::error!(
                alarm_type = type_name,
                error = %err,
                "Failed to look up destination alarm type, using fallback id"
            );
            return fallback();
        }
    };

    let matched = match candidates.len() {
        0 => {
            tracing::warn!(
                alarm_type = type_name,
                fallback_id = %target.fallback_alarm_type_id,
                "No mapped alarm type, using fallback id"
            );
            return fallback();
        }
        1 => TypeMatch::Exact,
        count => {
            tracing::warn!(
                alarm_type = type_name,
                count,
                "Multiple destination alarm types share this name, using the first"
            );
            TypeMatch::Ambiguous
        }
    };

    let first = candidates.into_iter().next().map(|t| t.id);
    match first {
        Some(alarm_type_id) => AlarmTypeMapping {
            source_type_name: type_name.to_string(),
            alarm_type_id,
            matched,
        },
        None => fallback(),
    }
}

/// Map the source alarm type `alarm_type_id` onto a destination type id.
pub async fn map_alarm_type(
    source: &DatabaseConnection,
    dest: &DatabaseConnection,
    alarm_type_id: &str,
    target: &DestinationConfig,
) -> AlarmTypeMapping {
    let type_name = source_type_name(source, alarm_type_id, target).await;
    map_type_name(dest, &type_name, target).await
}
