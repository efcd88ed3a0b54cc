// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use bn_core::BusEvent;

#[tokio::test]
async fn fake_platform_records_calls() {
    let platform = FakePlatform::new();

    platform.permission_state().await.unwrap();
    platform.request_consent().await.unwrap();
    platform.delivery_token("proj").await.unwrap();

    assert_eq!(
        platform.calls(),
        vec![
            PlatformCall::PermissionState,
            PlatformCall::RequestConsent,
            PlatformCall::DeliveryToken {
                project_id: "proj".to_string()
            },
        ]
    );
}

#[tokio::test]
async fn immediate_requests_present_only_when_granted() {
    let platform = FakePlatform::new();
    let id = platform.schedule(&BusEvent::Test.render()).await.unwrap();
    assert_eq!(platform.state_of(&id), Some(DeliveryState::Created));
    assert!(platform.presented().is_empty());

    platform.set_permission(PermissionState::Granted);
    let id = platform.schedule(&BusEvent::Test.render()).await.unwrap();
    assert_eq!(platform.state_of(&id), Some(DeliveryState::Presented));
    assert_eq!(platform.presented().len(), 1);
}

#[tokio::test]
async fn deferred_requests_fire_on_advance_unless_canceled() {
    let platform = FakePlatform::new();
    platform.set_permission(PermissionState::Granted);

    let reminder = BusEvent::DailyReminder {
        after: Duration::from_secs(60),
    }
    .render();
    let kept = platform.schedule(&reminder).await.unwrap();
    platform.advance(Duration::from_secs(59));
    assert_eq!(platform.state_of(&kept), Some(DeliveryState::Scheduled));
    platform.advance(Duration::from_secs(1));
    assert_eq!(platform.state_of(&kept), Some(DeliveryState::Presented));

    let dropped = platform.schedule(&reminder).await.unwrap();
    platform.cancel_all_scheduled().await.unwrap();
    platform.advance(Duration::from_secs(600));
    assert_eq!(platform.state_of(&dropped), Some(DeliveryState::Canceled));
}

#[tokio::test]
async fn schedule_failure_is_reported() {
    let platform = FakePlatform::new();
    platform.set_schedule_fails(true);
    let err = platform
        .schedule(&BusEvent::Test.render())
        .await
        .unwrap_err();
    assert!(matches!(err, PlatformError::Rejected(_)));
    assert_eq!(platform.scheduled_requests().len(), 1);
}

#[tokio::test]
async fn tap_emits_event_for_presented_only() {
    let platform = FakePlatform::new();
    platform.set_permission(PermissionState::Granted);
    let mut events = platform.subscribe();

    let id = platform.schedule(&BusEvent::Test.render()).await.unwrap();
    assert!(matches!(events.recv().await.unwrap(), TrayEvent::Received(_)));

    assert!(platform.tap(&id));
    assert!(matches!(
        events.recv().await.unwrap(),
        TrayEvent::Tapped(n) if n.id == id
    ));
    assert!(!platform.tap(&NotificationId::new("missing")));
}
