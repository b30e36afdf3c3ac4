//! Media migration.
//!
//! One media record per alarm is expected. Missing media never blocks the
//! alarm: it is migrated without `latest_alarm_media_id`. When several
//! records exist the oldest one is copied.

use sea_orm::DatabaseConnection;

use crate::models::alarm_media;
use crate::repositories::AlarmMediaRepository;

const ENTITY: &str = "alarm_media";

/// Copy the source alarm's media onto `new_alarm_id`, returning the new media id.
pub async fn migrate_media(
    source: &DatabaseConnection,
    dest: &DatabaseConnection,
    source_alarm_id: &str,
    new_alarm_id: &str,
) -> Option<i32> {
    let records = match AlarmMediaRepository::new(source)
        .list_for_alarm(source_alarm_id)
        .await
    {
        Ok(records) => records,
        Err(err) => {
            tracing::error!(alarm_id = source_alarm_id, error = %err, "Failed to fetch source media");
            super::record_dependency_failure(ENTITY);
            return None;
        }
    };

    let media = select_media(&records, source_alarm_id)?;

    match AlarmMediaRepository::new(dest)
        .insert_for_alarm(media, new_alarm_id)
        .await
    {
        Ok(media_id) => {
            tracing::info!(media_id, media_type = %media.media_type, "Inserted alarm media");
            Some(media_id)
        }
        Err(err) => {
            tracing::warn!(
                alarm_id = new_alarm_id,
                media_url = %media.media_url,
                error = %err,
                "Media insert failed, alarm continues without media"
            );
            super::record_dependency_failure(ENTITY);
            None
        }
    }
}

fn select_media<'m>(
    records: &'m [alarm_media::Model],
    source_alarm_id: &str,
) -> Option<&'m alarm_media::Model> {
    match records.len() {
        1 => {}
        0 => tracing::warn!(
            alarm_id = source_alarm_id,
            "No media record found, alarm will be migrated without media"
        ),
        count => tracing::warn!(
            alarm_id = source_alarm_id,
            count,
            "Expected one media record, using the first"
        ),
    }
    records.first()
}
