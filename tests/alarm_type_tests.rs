#[path = "test_utils/mod.rs"]
mod test_utils;

use alarm_migrator::migrate::alarm_type::{
    TypeMatch, map_alarm_type, map_type_name, source_type_name,
};
use test_utils::*;

#[tokio::test]
async fn test_exact_name_match() {
    let (source, dest) = setup_source_and_destination().await.unwrap();
    let target = test_target();
    insert_alarm_type(&source, "src-type-tamper", "Camera Tamper").await.unwrap();
    insert_alarm_type(&dest, "dest-type-tamper", "Camera Tamper").await.unwrap();

    let mapping = map_alarm_type(&source, &dest, "src-type-tamper", &target).await;

    assert_eq!(mapping.alarm_type_id, "dest-type-tamper");
    assert_eq!(mapping.source_type_name, "Camera Tamper");
    assert_eq!(mapping.matched, TypeMatch::Exact);
}

#[tokio::test]
async fn test_ambiguous_name_takes_first() {
    let dest = setup_test_db().await.unwrap();
    insert_alarm_type(&dest, "type-b", "Loitering").await.unwrap();
    insert_alarm_type(&dest, "type-a", "Loitering").await.unwrap();

    let mapping = map_type_name(&dest, "Loitering", &test_target()).await;

    assert_eq!(mapping.alarm_type_id, "type-a");
    assert_eq!(mapping.matched, TypeMatch::Ambiguous);
}

#[tokio::test]
async fn test_unmapped_name_uses_fallback_id() {
    let (source, dest) = setup_source_and_destination().await.unwrap();
    let target = test_target();
    insert_alarm_type(&source, "src-type-smoke", "Smoke").await.unwrap();

    let mapping = map_alarm_type(&source, &dest, "src-type-smoke", &target).await;

    assert_eq!(mapping.alarm_type_id, target.fallback_alarm_type_id);
    assert_eq!(mapping.matched, TypeMatch::Fallback);
}

#[tokio::test]
async fn test_unknown_source_type_maps_through_fallback_name() {
    let (source, dest) = setup_source_and_destination().await.unwrap();
    let target = test_target();
    insert_alarm_type(&dest, "dest-type-motion", &target.fallback_alarm_type_name)
        .await
        .unwrap();

    assert_eq!(
        source_type_name(&source, "no-such-type", &target).await,
        target.fallback_alarm_type_name
    );

    let mapping = map_alarm_type(&source, &dest, "no-such-type", &target).await;
    assert_eq!(mapping.alarm_type_id, "dest-type-motion");
    assert_eq!(mapping.matched, TypeMatch::Exact);
}
