// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use bn_core::{BusEvent, DevicePlatform, EventCategory, Priority};

fn granted_platform() -> LocalPlatform {
    LocalPlatform::new(DeviceProfile::default(), ConsentMode::Grant)
}

#[tokio::test]
async fn consent_follows_configured_mode() {
    let platform = granted_platform();
    assert_eq!(
        platform.permission_state().await.unwrap(),
        PermissionState::Undetermined
    );
    assert_eq!(
        platform.request_consent().await.unwrap(),
        PermissionState::Granted
    );

    let denied = LocalPlatform::new(DeviceProfile::default(), ConsentMode::Deny);
    assert_eq!(
        denied.request_consent().await.unwrap(),
        PermissionState::Denied
    );
    // Asking again does not re-prompt
    assert_eq!(
        denied.permission_state().await.unwrap(),
        PermissionState::Denied
    );
}

#[tokio::test]
async fn token_requires_permission_and_is_stable() {
    let platform = granted_platform();
    assert!(matches!(
        platform.delivery_token("proj").await,
        Err(PlatformError::TokenUnavailable(_))
    ));

    platform.request_consent().await.unwrap();
    let first = platform.delivery_token("proj").await.unwrap();
    let second = platform.delivery_token("proj").await.unwrap();
    assert_eq!(first, second);
    assert!(first.as_str().starts_with("LocalPushToken[proj:"));
}

#[tokio::test]
async fn channel_registration_is_idempotent() {
    let platform = LocalPlatform::new(
        DeviceProfile::new(DevicePlatform::Android, true),
        ConsentMode::Grant,
    );
    let channel = ChannelConfig::bus_updates();
    platform.register_channel(&channel).await.unwrap();
    platform.register_channel(&channel).await.unwrap();
    assert_eq!(platform.channels(), vec![channel]);
}

#[tokio::test]
async fn immediate_request_is_broadcast_when_granted() {
    let platform = granted_platform();
    platform.request_consent().await.unwrap();
    let mut events = platform.subscribe();

    let request = BusEvent::TripEnded { bus: "B-1".into() }.render();
    let id = platform.schedule(&request).await.unwrap();

    match events.recv().await.unwrap() {
        TrayEvent::Received(n) => {
            assert_eq!(n.id, id);
            assert_eq!(n.body, "Bus B-1 has completed the trip.");
            assert_eq!(n.payload.category(), Some(EventCategory::TripEnded));
            assert_eq!(n.presentation.priority, Priority::High);
            assert!(n.presentation.sound);
        }
        other => panic!("unexpected event: {:?}", other),
    }
    assert_eq!(platform.badge_count(), 1);
}

#[tokio::test]
async fn requests_are_dropped_without_permission() {
    let platform = LocalPlatform::new(DeviceProfile::default(), ConsentMode::Deny);
    platform.request_consent().await.unwrap();
    let mut events = platform.subscribe();

    platform.schedule(&BusEvent::Test.render()).await.unwrap();
    assert!(matches!(
        events.try_recv(),
        Err(broadcast::error::TryRecvError::Empty)
    ));
    assert_eq!(platform.badge_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn deferred_request_fires_after_delay() {
    let platform = granted_platform();
    platform.request_consent().await.unwrap();
    let mut events = platform.subscribe();

    let request = BusEvent::DailyReminder {
        after: Duration::from_secs(3600),
    }
    .render();
    platform.schedule(&request).await.unwrap();
    assert_eq!(platform.pending_count(), 1);

    tokio::time::sleep(Duration::from_secs(3599)).await;
    assert!(events.try_recv().is_err());

    let event = events.recv().await.unwrap();
    assert_eq!(
        event.notification().payload.category(),
        Some(EventCategory::DailyReminder)
    );
    assert_eq!(
        event.notification().presentation.priority,
        Priority::Default
    );
    assert_eq!(platform.pending_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn cancel_all_withdraws_pending_requests() {
    let platform = granted_platform();
    platform.request_consent().await.unwrap();
    let mut events = platform.subscribe();

    let request = BusEvent::DailyReminder {
        after: Duration::from_secs(3600),
    }
    .render();
    platform.schedule(&request).await.unwrap();
    platform.cancel_all_scheduled().await.unwrap();
    assert_eq!(platform.pending_count(), 0);

    tokio::time::sleep(Duration::from_secs(7200)).await;
    assert!(matches!(
        events.try_recv(),
        Err(broadcast::error::TryRecvError::Empty)
    ));
}

#[tokio::test]
async fn tap_is_reported() {
    let platform = granted_platform();
    let mut events = platform.subscribe();
    let notification =
        PresentedNotification::from_request(NotificationId::new("n-1"), &BusEvent::Test.render());

    platform.tap(notification.clone());
    assert_eq!(
        events.recv().await.unwrap(),
        TrayEvent::Tapped(notification)
    );
}
