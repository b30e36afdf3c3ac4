//! Batch semantics of alarm updates and video tags.

#[path = "test_utils/mod.rs"]
mod test_utils;

use alarm_migrator::error::MigrationError;
use alarm_migrator::migrate::alarm_update::{insert_updates, migrate_updates};
use alarm_migrator::migrate::ml::{insert_tags, migrate_ml_output};
use alarm_migrator::models::video_tag;
use alarm_migrator::repositories::{AlarmUpdateRepository, MlOutputRepository};
use test_utils::*;

const SOURCE_ALARM: &str = "src-alarm-1";
const NEW_ALARM: &str = "new-alarm-1";

#[tokio::test]
async fn test_updates_are_copied_in_order_and_last_id_returned() {
    let (source, dest) = setup_source_and_destination().await.unwrap();
    let target = test_target();

    insert_update(
        &source,
        update_fixture("u-2", SOURCE_ALARM, ts(2024, 11, 3, 9, 0), None, "second"),
    )
    .await
    .unwrap();
    insert_update(
        &source,
        update_fixture("u-1", SOURCE_ALARM, ts(2024, 11, 3, 8, 30), None, "first"),
    )
    .await
    .unwrap();
    insert_update(
        &source,
        update_fixture("u-other", "another-alarm", ts(2024, 11, 3, 8, 0), None, "unrelated"),
    )
    .await
    .unwrap();

    let last_id = migrate_updates(&source, &dest, SOURCE_ALARM, NEW_ALARM, &target)
        .await
        .unwrap();

    let copied = AlarmUpdateRepository::new(&dest)
        .list_for_alarm(NEW_ALARM)
        .await
        .unwrap();
    assert_eq!(copied.len(), 2);
    assert_eq!(copied[0].plain_text_comment.as_deref(), Some("first"));
    assert_eq!(copied[1].plain_text_comment.as_deref(), Some("second"));
    assert_eq!(copied[1].id, last_id);

    for update in &copied {
        assert_ne!(update.id, "u-1");
        assert_ne!(update.id, "u-2");
        assert_eq!(update.tenant_id, target.tenant_id);
        assert_eq!(update.alarm_id, NEW_ALARM);
        assert_eq!(update.user_id, None);
    }
}

#[tokio::test]
async fn test_no_updates_yields_none() {
    let (source, dest) = setup_source_and_destination().await.unwrap();
    assert_eq!(
        migrate_updates(&source, &dest, SOURCE_ALARM, NEW_ALARM, &test_target()).await,
        None
    );
    assert_eq!(count_rows(&dest, "alarm_updates").await.unwrap(), 0);
}

#[tokio::test]
async fn test_update_authors_are_resolved_once() {
    let (source, dest) = setup_source_and_destination().await.unwrap();
    let target = test_target();

    insert_user(&source, user_fixture("src-user-1", "dana@example.com", SOURCE_TENANT))
        .await
        .unwrap();
    insert_user(&dest, user_fixture("dest-user-1", "dana@example.com", &target.tenant_id))
        .await
        .unwrap();

    for (id, minute) in [("u-1", 10), ("u-2", 20)] {
        insert_update(
            &source,
            update_fixture(id, SOURCE_ALARM, ts(2024, 11, 3, 9, minute), Some("src-user-1"), id),
        )
        .await
        .unwrap();
    }
    insert_update(
        &source,
        update_fixture("u-3", SOURCE_ALARM, ts(2024, 11, 3, 9, 30), Some("ghost"), "u-3"),
    )
    .await
    .unwrap();

    migrate_updates(&source, &dest, SOURCE_ALARM, NEW_ALARM, &target)
        .await
        .unwrap();

    let copied = AlarmUpdateRepository::new(&dest)
        .list_for_alarm(NEW_ALARM)
        .await
        .unwrap();
    let authors: Vec<Option<&str>> = copied.iter().map(|u| u.user_id.as_deref()).collect();
    assert_eq!(authors, vec![Some("dest-user-1"), Some("dest-user-1"), None]);
    assert_eq!(count_rows(&dest, "users").await.unwrap(), 1);
}

#[tokio::test]
async fn test_one_failing_update_rolls_back_the_batch() {
    let (source, dest) = setup_source_and_destination().await.unwrap();
    let target = test_target();

    for (id, minute, comment) in [("u-1", 10, "ok"), ("u-2", 20, "poison"), ("u-3", 30, "ok")] {
        insert_update(
            &source,
            update_fixture(id, SOURCE_ALARM, ts(2024, 11, 3, 9, minute), None, comment),
        )
        .await
        .unwrap();
    }
    reject_inserts_when(&dest, "alarm_updates", "NEW.plain_text_comment = 'poison'")
        .await
        .unwrap();

    let last_id = migrate_updates(&source, &dest, SOURCE_ALARM, NEW_ALARM, &target).await;

    assert_eq!(last_id, None);
    assert_eq!(count_rows(&dest, "alarm_updates").await.unwrap(), 0);
}

#[tokio::test]
async fn test_insert_updates_reports_batch_failure() {
    let dest = setup_test_db().await.unwrap();
    reject_inserts_when(&dest, "alarm_updates", "NEW.id = 'bad'")
        .await
        .unwrap();

    let batch = vec![
        update_fixture("good", NEW_ALARM, ts(2024, 11, 3, 9, 0), None, "a"),
        update_fixture("bad", NEW_ALARM, ts(2024, 11, 3, 9, 5), None, "b"),
    ];
    let err = insert_updates(&dest, batch).await.unwrap_err();

    assert!(matches!(
        err,
        MigrationError::BatchInsertFailure {
            batch: "alarm_updates",
            ..
        }
    ));
    assert_eq!(count_rows(&dest, "alarm_updates").await.unwrap(), 0);
}

fn tag(id: &str, name: &str) -> video_tag::Model {
    video_tag::Model {
        id: id.to_string(),
        video_tag: name.to_string(),
        ml_output_id: "src-ml-1".to_string(),
        tenant_id: SOURCE_TENANT.to_string(),
        created_at_utc: ts(2024, 11, 3, 8, 18),
        updated_at_utc: ts(2024, 11, 3, 8, 18),
    }
}

#[tokio::test]
async fn test_ml_output_and_tags_are_copied() {
    let (source, dest) = setup_source_and_destination().await.unwrap();
    let target = test_target();
    insert_ml_output(&source, "src-ml-1", SOURCE_ALARM, &["person", "vehicle"])
        .await
        .unwrap();

    let new_id = migrate_ml_output(&source, &dest, Some("src-ml-1"), NEW_ALARM, &target)
        .await
        .unwrap();
    assert_ne!(new_id, "src-ml-1");

    let repo = MlOutputRepository::new(&dest);
    let output = repo.get_by_id(&new_id).await.unwrap().unwrap();
    assert_eq!(output.alarm_id, NEW_ALARM);
    assert_eq!(output.tenant_id, target.tenant_id);
    assert_eq!(output.haie_ml_version.as_deref(), Some("4.2.0"));

    let mut tags: Vec<String> = repo
        .list_tags(&new_id)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.video_tag)
        .collect();
    tags.sort();
    assert_eq!(tags, vec!["person", "vehicle"]);
}

#[tokio::test]
async fn test_failing_tag_keeps_ml_output_without_tags() {
    let (source, dest) = setup_source_and_destination().await.unwrap();
    let target = test_target();
    insert_ml_output(&source, "src-ml-1", SOURCE_ALARM, &["person", "poison", "vehicle"])
        .await
        .unwrap();
    reject_inserts_when(&dest, "video_tags", "NEW.video_tag = 'poison'")
        .await
        .unwrap();

    let new_id = migrate_ml_output(&source, &dest, Some("src-ml-1"), NEW_ALARM, &target).await;

    assert!(new_id.is_some());
    assert_eq!(count_rows(&dest, "ml_outputs").await.unwrap(), 1);
    assert_eq!(count_rows(&dest, "video_tags").await.unwrap(), 0);
}

#[tokio::test]
async fn test_insert_tags_is_all_or_nothing() {
    let (_source, dest) = setup_source_and_destination().await.unwrap();
    let target = test_target();
    insert_ml_output(&dest, "dest-ml-1", NEW_ALARM, &[]).await.unwrap();
    reject_inserts_when(&dest, "video_tags", "NEW.video_tag = 'poison'")
        .await
        .unwrap();

    let ok = insert_tags(&dest, &[tag("t-1", "person")], "dest-ml-1", &target)
        .await
        .unwrap();
    assert_eq!(ok, 1);

    let err = insert_tags(
        &dest,
        &[tag("t-2", "vehicle"), tag("t-3", "poison")],
        "dest-ml-1",
        &target,
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        MigrationError::BatchInsertFailure {
            batch: "video_tags",
            ..
        }
    ));
    assert_eq!(count_rows(&dest, "video_tags").await.unwrap(), 1);
}

#[tokio::test]
async fn test_missing_ml_output_yields_none() {
    let (source, dest) = setup_source_and_destination().await.unwrap();
    let target = test_target();

    assert_eq!(
        migrate_ml_output(&source, &dest, None, NEW_ALARM, &target).await,
        None
    );
    assert_eq!(
        migrate_ml_output(&source, &dest, Some("missing"), NEW_ALARM, &target).await,
        None
    );
    assert_eq!(count_rows(&dest, "ml_outputs").await.unwrap(), 0);
}
