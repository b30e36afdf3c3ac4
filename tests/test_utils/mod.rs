//! Test utilities for migration testing.
//!
//! Every test works against a pair of SQLite databases (source and
//! destination) with all migrations applied, seeded through the crate's own
//! repositories.

#![allow(dead_code)]

use std::path::Path;

use alarm_migrator::config::{AppConfig, DestinationConfig};
use alarm_migrator::models::{
    alarm_media, alarm_type, alarm_update, camera, door, employee, location_alarm, ml_output,
    raw_alarm, user, video_tag,
};
use alarm_migrator::repositories::{
    AlarmUpdateRepository, DoorRepository, EmployeeRepository, MlOutputRepository,
    RawAlarmRepository, UserRepository,
};
use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use migration::{Migrator, MigratorTrait};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, Database, DatabaseConnection, NotSet, Set, Statement,
};

pub const SOURCE_TENANT: &str = "acme-legacy";

/// Tables written by a migration, used to prove that nothing was written.
pub const MIGRATED_TABLES: &[&str] = &[
    "raw_alarms_v2",
    "doors",
    "employees",
    "users",
    "alarm_media",
    "alarm_updates",
    "ml_outputs",
    "video_tags",
];

/// Sets up an in-memory SQLite database with all migrations applied.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

/// Source and destination databases for one test.
pub async fn setup_source_and_destination() -> Result<(DatabaseConnection, DatabaseConnection)> {
    Ok((setup_test_db().await?, setup_test_db().await?))
}

/// Creates a file-backed SQLite database with migrations applied and returns its URL.
pub async fn setup_file_db(path: &Path) -> Result<(String, DatabaseConnection)> {
    let url = format!("sqlite://{}?mode=rwc", path.display());
    let db = Database::connect(&url).await?;
    Migrator::up(&db, None).await?;
    Ok((url, db))
}

/// Destination constants used across tests (the production defaults).
pub fn test_target() -> DestinationConfig {
    DestinationConfig::default()
}

/// Application config pointing at the given databases and log folder.
pub fn test_app_config(source_url: &str, destination_url: &str, log_dir: &Path) -> AppConfig {
    AppConfig {
        source_database_url: source_url.to_string(),
        destination_database_url: destination_url.to_string(),
        log_dir: log_dir.to_path_buf(),
        db_connect_attempts: 1,
        db_acquire_timeout_ms: 2000,
        ..AppConfig::default()
    }
}

pub fn ts(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTimeWithTimeZone {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_else(|| panic!("invalid fixture timestamp"))
        .fixed_offset()
}

/// Count rows of `table`.
pub async fn count_rows(db: &DatabaseConnection, table: &str) -> Result<i64> {
    let row = db
        .query_one(Statement::from_string(
            db.get_database_backend(),
            format!("SELECT COUNT(*) AS n FROM {table}"),
        ))
        .await?
        .context("count query returned no row")?;
    Ok(row.try_get::<i64>("", "n")?)
}

/// Row counts of every migrated table, in `MIGRATED_TABLES` order.
pub async fn snapshot_counts(db: &DatabaseConnection) -> Result<Vec<i64>> {
    let mut counts = Vec::with_capacity(MIGRATED_TABLES.len());
    for table in MIGRATED_TABLES {
        counts.push(count_rows(db, table).await?);
    }
    Ok(counts)
}

/// Makes inserts into `table` abort whenever `condition` holds for the new row.
pub async fn reject_inserts_when(
    db: &DatabaseConnection,
    table: &str,
    condition: &str,
) -> Result<()> {
    let trigger = format!(
        "CREATE TRIGGER reject_{table}_insert BEFORE INSERT ON {table} \
         WHEN {condition} BEGIN SELECT RAISE(ABORT, 'rejected by test trigger'); END;"
    );
    db.execute(Statement::from_string(db.get_database_backend(), trigger))
        .await?;
    Ok(())
}

pub fn raw_alarm_fixture(id: &str, source_id: &str) -> raw_alarm::Model {
    let occurred = ts(2024, 11, 3, 8, 15);
    raw_alarm::Model {
        id: id.to_string(),
        source_id: source_id.to_string(),
        tenant_id: SOURCE_TENANT.to_string(),
        partition_key: 202411,
        alarm_type_id: "src-type-motion".to_string(),
        source_entity_type: "CAMERA".to_string(),
        source_entity_id: Some("src-camera-1".to_string()),
        door_id: None,
        employee_id: None,
        user_id: Some("src-user-1".to_string()),
        latest_alarm_media_id: None,
        alarm_update_id: None,
        ml_output_id: None,
        alarm_state: "PROCESSED".to_string(),
        current_status: Some("Closed".to_string()),
        true_alarm_probability: Some(0.87),
        alarm_description: Some("Motion in loading bay".to_string()),
        alarm_details: Some(serde_json::json!({"zone": "loading-bay"})),
        alarm_timestamp_utc: occurred,
        created_at_utc: occurred,
        updated_at_utc: occurred,
    }
}

pub async fn insert_alarm(db: &DatabaseConnection, alarm: raw_alarm::Model) -> Result<String> {
    Ok(RawAlarmRepository::new(db).insert(alarm).await?)
}

pub fn door_fixture(id: &str, tenant_id: &str, location_id: &str, name: &str) -> door::Model {
    door::Model {
        id: id.to_string(),
        tenant_id: tenant_id.to_string(),
        location_id: location_id.to_string(),
        door_name: name.to_string(),
        door_type: Some("badge".to_string()),
        description: Some(format!("{name} entrance")),
        created_at_utc: ts(2023, 5, 1, 9, 0),
        updated_at_utc: ts(2023, 5, 1, 9, 0),
    }
}

pub async fn insert_door(db: &DatabaseConnection, door: door::Model) -> Result<door::Model> {
    Ok(DoorRepository::new(db).insert(door).await?)
}

pub fn employee_fixture(
    id: &str,
    tenant_id: &str,
    first: &str,
    last: &str,
    phone: Option<&str>,
) -> employee::Model {
    employee::Model {
        id: id.to_string(),
        tenant_id: tenant_id.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        phone_number: phone.map(str::to_string),
        email: Some(format!("{}.{}@example.com", first, last).to_lowercase()),
        created_at_utc: ts(2023, 6, 1, 9, 0),
        updated_at_utc: ts(2023, 6, 1, 9, 0),
    }
}

pub async fn insert_employee(
    db: &DatabaseConnection,
    employee: employee::Model,
) -> Result<employee::Model> {
    Ok(EmployeeRepository::new(db).insert(employee).await?)
}

pub fn user_fixture(id: &str, email: &str, tenant_id: &str) -> user::Model {
    user::Model {
        id: id.to_string(),
        name: Some("Dana Operator".to_string()),
        email: email.to_string(),
        is_enabled: true,
        password: Some("$2b$12$hash".to_string()),
        tenant_id: tenant_id.to_string(),
        created_at_utc: ts(2023, 1, 10, 12, 0),
        updated_at_utc: ts(2023, 1, 10, 12, 0),
        refresh_token: None,
        refresh_token_expires: None,
        role_id: Some("operator".to_string()),
        msp_tenants: Some(serde_json::json!(["acme-legacy"])),
        msp_locations: Some(serde_json::json!([])),
        vision_tenants: None,
    }
}

pub async fn insert_user(db: &DatabaseConnection, user: user::Model) -> Result<user::Model> {
    Ok(UserRepository::new(db).insert(user).await?)
}

pub async fn insert_alarm_type(db: &DatabaseConnection, id: &str, name: &str) -> Result<()> {
    alarm_type::ActiveModel {
        id: Set(id.to_string()),
        alarm_type: Set(name.to_string()),
    }
    .insert(db)
    .await?;
    Ok(())
}

pub async fn insert_media(db: &DatabaseConnection, alarm_id: &str, url: &str) -> Result<i32> {
    let media = alarm_media::ActiveModel {
        id: NotSet,
        alarm_id: Set(alarm_id.to_string()),
        media_type: Set("video/mp4".to_string()),
        media_url: Set(url.to_string()),
        created_at_utc: Set(ts(2024, 11, 3, 8, 16)),
        updated_at_utc: Set(ts(2024, 11, 3, 8, 16)),
    }
    .insert(db)
    .await?;
    Ok(media.id)
}

pub fn update_fixture(
    id: &str,
    alarm_id: &str,
    at: DateTimeWithTimeZone,
    user_id: Option<&str>,
    comment: &str,
) -> alarm_update::Model {
    alarm_update::Model {
        id: id.to_string(),
        alarm_id: alarm_id.to_string(),
        update_timestamp_utc: at,
        event: "COMMENT".to_string(),
        user_id: user_id.map(str::to_string),
        plain_text_comment: Some(comment.to_string()),
        current_status: Some("Reviewing".to_string()),
        tenant_id: SOURCE_TENANT.to_string(),
        update_details: Some(serde_json::json!({"source": "console"})),
    }
}

pub async fn insert_update(
    db: &DatabaseConnection,
    update: alarm_update::Model,
) -> Result<alarm_update::Model> {
    Ok(AlarmUpdateRepository::new(db).insert(update).await?)
}

pub async fn insert_ml_output(
    db: &DatabaseConnection,
    id: &str,
    alarm_id: &str,
    tags: &[&str],
) -> Result<()> {
    let repo = MlOutputRepository::new(db);
    repo.insert(ml_output::Model {
        id: id.to_string(),
        alarm_id: alarm_id.to_string(),
        true_alarm_probability: Some(0.91),
        haie_ml_version: Some("4.2.0".to_string()),
        tenant_id: SOURCE_TENANT.to_string(),
        created_at_utc: ts(2024, 11, 3, 8, 17),
        updated_at_utc: ts(2024, 11, 3, 8, 17),
        ml_output_timestamp_utc: Some(ts(2024, 11, 3, 8, 17)),
        processed_frames: Some(serde_json::json!([12, 13, 14])),
        deadzone_detections: Some(0),
    })
    .await?;

    for (index, tag) in tags.iter().enumerate() {
        repo.insert_tag(video_tag::Model {
            id: format!("{id}-tag-{index}"),
            video_tag: tag.to_string(),
            ml_output_id: id.to_string(),
            tenant_id: SOURCE_TENANT.to_string(),
            created_at_utc: ts(2024, 11, 3, 8, 18),
            updated_at_utc: ts(2024, 11, 3, 8, 18),
        })
        .await?;
    }
    Ok(())
}

pub async fn insert_camera(
    db: &DatabaseConnection,
    id: &str,
    name: &str,
    location_id: &str,
) -> Result<()> {
    camera::ActiveModel {
        id: Set(id.to_string()),
        tenant_id: Set("demo-sales".to_string()),
        location_id: Set(location_id.to_string()),
        camera_name: Set(name.to_string()),
    }
    .insert(db)
    .await?;
    Ok(())
}

pub async fn insert_location_alarm(
    db: &DatabaseConnection,
    id: &str,
    location_id: &str,
    raw_alarm_id: Option<&str>,
) -> Result<()> {
    location_alarm::ActiveModel {
        id: Set(id.to_string()),
        tenant_id: Set("demo-sales".to_string()),
        location_id: Set(location_id.to_string()),
        raw_alarm_id: Set(raw_alarm_id.map(str::to_string)),
        created_at_utc: Set(ts(2024, 11, 3, 9, 0)),
    }
    .insert(db)
    .await?;
    Ok(())
}
