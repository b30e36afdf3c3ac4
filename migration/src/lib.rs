//! Database migrations for the alarm migrator.
//!
//! Source and destination databases share this schema. Tests apply it to
//! in-memory SQLite databases; deployments apply it to MySQL or Postgres.

pub use sea_orm_migration::prelude::*;

mod m2025_01_01_000001_create_alarm_types;
mod m2025_01_01_000002_create_cameras_and_location_alarms;
mod m2025_01_01_000003_create_doors;
mod m2025_01_01_000004_create_employees;
mod m2025_01_01_000005_create_users;
mod m2025_01_01_000006_create_raw_alarms;
mod m2025_01_01_000007_create_alarm_media;
mod m2025_01_01_000008_create_alarm_updates;
mod m2025_01_01_000009_create_ml_outputs_and_video_tags;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m2025_01_01_000001_create_alarm_types::Migration),
            Box::new(m2025_01_01_000002_create_cameras_and_location_alarms::Migration),
            Box::new(m2025_01_01_000003_create_doors::Migration),
            Box::new(m2025_01_01_000004_create_employees::Migration),
            Box::new(m2025_01_01_000005_create_users::Migration),
            Box::new(m2025_01_01_000006_create_raw_alarms::Migration),
            Box::new(m2025_01_01_000007_create_alarm_media::Migration),
            Box::new(m2025_01_01_000008_create_alarm_updates::Migration),
            Box::new(m2025_01_01_000009_create_ml_outputs_and_video_tags::Migration),
        ]
    }
}
