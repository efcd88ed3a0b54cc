// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::clock::{Clock, FakeClock};
use std::sync::Arc;
use yare::parameterized;

fn secs(n: u64) -> Duration {
    Duration::from_secs(n)
}

#[test]
fn first_permit_always_passes() {
    let policy = ThrottlePolicy::new();
    let clock = FakeClock::new();
    assert!(policy.permit(EventCategory::Nearby, clock.now(), DEFAULT_COOLDOWN));
    assert_eq!(
        policy.last_permitted(EventCategory::Nearby),
        Some(clock.now())
    );
}

#[parameterized(
    at_30s = { 30, false },
    at_59s = { 59, false },
    at_60s = { 60, true },
    at_61s = { 61, true },
)]
fn second_permit_depends_on_elapsed(offset: u64, expected: bool) {
    let policy = ThrottlePolicy::new();
    let clock = FakeClock::new();
    assert!(policy.permit(EventCategory::VeryClose, clock.now(), secs(60)));

    clock.set_offset(secs(offset));
    assert_eq!(
        policy.permit(EventCategory::VeryClose, clock.now(), secs(60)),
        expected
    );
}

#[test]
fn denial_does_not_move_the_window() {
    let policy = ThrottlePolicy::new();
    let clock = FakeClock::new();
    let t0 = clock.now();
    assert!(policy.permit(EventCategory::Nearby, t0, secs(60)));

    clock.set_offset(secs(30));
    assert!(!policy.permit(EventCategory::Nearby, clock.now(), secs(60)));
    assert_eq!(policy.last_permitted(EventCategory::Nearby), Some(t0));

    clock.set_offset(secs(61));
    assert!(policy.permit(EventCategory::Nearby, clock.now(), secs(60)));
}

#[test]
fn categories_are_independent() {
    let policy = ThrottlePolicy::new();
    let now = FakeClock::new().now();
    assert!(policy.permit(EventCategory::Nearby, now, secs(60)));
    assert!(policy.permit(EventCategory::VeryClose, now, secs(60)));
    assert!(!policy.permit(EventCategory::Nearby, now, secs(60)));
    assert_eq!(policy.last_permitted(EventCategory::Delay), None);
}

#[test]
fn zero_cooldown_never_suppresses() {
    let policy = ThrottlePolicy::new();
    let now = FakeClock::new().now();
    for _ in 0..5 {
        assert!(policy.permit(EventCategory::Nearby, now, Duration::ZERO));
    }
}

#[test]
fn clock_moving_backwards_is_treated_as_no_time_elapsed() {
    let policy = ThrottlePolicy::new();
    let clock = FakeClock::new();
    clock.set_offset(secs(100));
    assert!(policy.permit(EventCategory::Nearby, clock.now(), secs(60)));
    clock.set_offset(secs(0));
    assert!(!policy.permit(EventCategory::Nearby, clock.now(), secs(60)));
}

#[test]
fn concurrent_permits_at_same_instant_let_exactly_one_through() {
    let policy = Arc::new(ThrottlePolicy::new());
    let now = FakeClock::new().now();

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let policy = Arc::clone(&policy);
            std::thread::spawn(move || policy.permit(EventCategory::Nearby, now, secs(60)))
        })
        .collect();

    let passed = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|allowed| *allowed)
        .count();
    assert_eq!(passed, 1);
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_category() -> impl Strategy<Value = EventCategory> {
        (0..EventCategory::ALL.len()).prop_map(|i| EventCategory::ALL[i])
    }

    proptest! {
        #[test]
        fn window_holds_for_any_cooldown(
            category in arb_category(),
            cooldown in 1u64..10_000,
            delta_frac in 0.0f64..1.0,
        ) {
            let policy = ThrottlePolicy::new();
            let clock = FakeClock::new();
            let cooldown = Duration::from_millis(cooldown);
            let delta = cooldown.mul_f64(delta_frac).min(cooldown - Duration::from_nanos(1));

            prop_assert!(policy.permit(category, clock.now(), cooldown));
            clock.set_offset(delta);
            prop_assert!(!policy.permit(category, clock.now(), cooldown));
            clock.set_offset(cooldown);
            prop_assert!(policy.permit(category, clock.now(), cooldown));
        }

        #[test]
        fn one_category_never_affects_another(
            a in arb_category(),
            b in arb_category(),
        ) {
            prop_assume!(a != b);
            let policy = ThrottlePolicy::new();
            let now = FakeClock::new().now();
            prop_assert!(policy.permit(a, now, DEFAULT_COOLDOWN));
            prop_assert!(policy.permit(b, now, DEFAULT_COOLDOWN));
        }
    }
}
