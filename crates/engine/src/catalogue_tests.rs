// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use bn_adapters::{FakePlatform, PlatformCall};
use bn_core::{EventCategory, FakeClock, PermissionState, DEFAULT_COOLDOWN};
use serde_json::json;
use std::collections::HashSet;

struct Harness {
    platform: FakePlatform,
    clock: FakeClock,
    catalogue: Catalogue<FakePlatform, FakeClock>,
}

fn setup() -> Harness {
    let platform = FakePlatform::new();
    platform.set_permission(PermissionState::Granted);
    let latch = PermissionLatch::new();
    latch.record(PermissionState::Granted);
    let clock = FakeClock::new();
    let catalogue = Catalogue::new(
        Delivery::new(platform.clone()),
        Arc::new(ThrottlePolicy::new()),
        clock.clone(),
        DEFAULT_COOLDOWN,
        latch,
    );
    Harness {
        platform,
        clock,
        catalogue,
    }
}

#[tokio::test]
async fn nearby_formats_distance_and_payload() {
    let h = setup();
    let outcome = h
        .catalogue
        .notify_bus_nearby("KA-05-1234", 0.85)
        .await
        .unwrap();
    assert!(matches!(outcome, Outcome::Delivered(_)));

    let shown = h.platform.presented();
    assert_eq!(shown.len(), 1);
    assert!(shown[0].body.contains("0.9 km away"), "{}", shown[0].body);
    similar_asserts::assert_eq!(
        shown[0].payload.clone().into_value(),
        json!({ "type": "bus_nearby", "busNumber": "KA-05-1234", "distance": 0.85 })
    );
}

#[tokio::test]
async fn nearby_respects_cooldown_boundaries() {
    let h = setup();

    assert!(matches!(
        h.catalogue.notify_bus_nearby("B", 1.0).await.unwrap(),
        Outcome::Delivered(_)
    ));

    h.clock.set_offset(Duration::from_secs(30));
    assert_eq!(
        h.catalogue.notify_bus_nearby("B", 0.8).await.unwrap(),
        Outcome::Throttled
    );

    h.clock.set_offset(Duration::from_secs(61));
    assert!(matches!(
        h.catalogue.notify_bus_nearby("B", 0.5).await.unwrap(),
        Outcome::Delivered(_)
    ));

    assert_eq!(h.platform.scheduled_requests().len(), 2);
}

#[tokio::test]
async fn proximity_categories_throttle_independently() {
    let h = setup();
    h.catalogue.notify_bus_nearby("B", 1.0).await.unwrap();
    let outcome = h.catalogue.notify_bus_very_close("B", 2).await.unwrap();
    assert!(matches!(outcome, Outcome::Delivered(_)));
    assert_eq!(
        h.catalogue.notify_bus_very_close("B", 1).await.unwrap(),
        Outcome::Throttled
    );
}

#[tokio::test]
async fn one_shot_categories_are_never_throttled() {
    let h = setup();
    for _ in 0..5 {
        h.catalogue.notify_trip_started("B", "R1").await.unwrap();
        h.catalogue.notify_trip_ended("B").await.unwrap();
        h.catalogue.notify_delay("B", "Traffic").await.unwrap();
        h.catalogue.notify_route_change("B", "R2").await.unwrap();
        h.catalogue.test_notification().await.unwrap();
    }
    assert_eq!(h.platform.scheduled_requests().len(), 25);
    assert_eq!(h.platform.presented().len(), 25);
}

#[tokio::test]
async fn daily_reminder_is_scheduled_not_presented() {
    let h = setup();
    let outcome = h
        .catalogue
        .schedule_daily_reminder(Duration::from_secs(3600))
        .await
        .unwrap();
    let Outcome::Scheduled(id) = outcome else {
        panic!("expected Scheduled, got {:?}", outcome);
    };
    assert!(h.platform.presented().is_empty());

    h.platform.advance(Duration::from_secs(3600));
    assert_eq!(h.platform.presented()[0].id, id);
}

#[tokio::test]
async fn without_grant_nothing_reaches_the_platform() {
    let platform = FakePlatform::new();
    let catalogue = Catalogue::new(
        Delivery::new(platform.clone()),
        Arc::new(ThrottlePolicy::new()),
        FakeClock::new(),
        DEFAULT_COOLDOWN,
        PermissionLatch::new(),
    );

    assert_eq!(
        catalogue.notify_bus_nearby("B", 1.0).await.unwrap(),
        Outcome::NotPermitted
    );
    assert_eq!(
        catalogue.test_notification().await.unwrap(),
        Outcome::NotPermitted
    );
    assert!(platform.calls().is_empty());
    // The throttle window was not consumed
    assert_eq!(
        catalogue.throttle().last_permitted(EventCategory::Nearby),
        None
    );
}

#[tokio::test]
async fn transport_failure_passes_through_without_retry() {
    let h = setup();
    h.platform.set_schedule_fails(true);

    let err = h.catalogue.notify_trip_ended("B").await.unwrap_err();
    assert!(matches!(err, bn_adapters::PlatformError::Rejected(_)));
    let schedules = h
        .platform
        .calls()
        .iter()
        .filter(|c| matches!(c, PlatformCall::Schedule(_)))
        .count();
    assert_eq!(schedules, 1);
}

#[tokio::test]
async fn every_entry_point_tags_its_payload() {
    let h = setup();
    let c = &h.catalogue;
    c.notify_bus_nearby("B", 1.0).await.unwrap();
    c.notify_bus_very_close("B", 3).await.unwrap();
    c.notify_trip_started("B", "R").await.unwrap();
    c.notify_trip_ended("B").await.unwrap();
    c.notify_delay("B", "why").await.unwrap();
    c.notify_route_change("B", "R2").await.unwrap();
    c.schedule_daily_reminder(Duration::from_secs(1))
        .await
        .unwrap();
    c.test_notification().await.unwrap();

    let categories: Vec<_> = h
        .platform
        .scheduled_requests()
        .iter()
        .map(|r| r.payload().category().unwrap())
        .collect();
    assert_eq!(categories, EventCategory::ALL.to_vec());
    let distinct: HashSet<_> = categories.into_iter().collect();
    assert_eq!(distinct.len(), EventCategory::ALL.len());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_proximity_events_deliver_once() {
    let h = setup();
    let catalogue = Arc::new(h.catalogue);

    let tasks: Vec<_> = (0..20)
        .map(|i| {
            let catalogue = Arc::clone(&catalogue);
            tokio::spawn(async move { catalogue.notify_bus_nearby("B", i as f64 / 10.0).await })
        })
        .collect();

    let mut delivered = 0;
    for task in tasks {
        if let Outcome::Delivered(_) = task.await.unwrap().unwrap() {
            delivered += 1;
        }
    }
    assert_eq!(delivered, 1);
    assert_eq!(h.platform.presented().len(), 1);
}

#[yare::parameterized(
    trip_started = { BusEvent::TripStarted { bus: "B".to_string(), route_name: "R".to_string() } },
    trip_ended = { BusEvent::TripEnded { bus: "B".to_string() } },
    delay = { BusEvent::Delay { bus: "B".to_string(), reason: "Traffic".to_string() } },
    route_change = { BusEvent::RouteChange { bus: "B".to_string(), new_route: "R2".to_string() } },
    test = { BusEvent::Test },
)]
#[test_macro(tokio::test)]
async fn repeated_one_shot_events_both_deliver(event: BusEvent) {
    let h = setup();
    let first = h.catalogue.dispatch(event.clone()).await.unwrap();
    let second = h.catalogue.dispatch(event).await.unwrap();
    assert!(matches!(first, Outcome::Delivered(_)));
    assert!(matches!(second, Outcome::Delivered(_)));
}
