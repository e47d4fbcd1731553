use std::time::Duration;

use gk_shared::config::BackoffConfig;

use crate::services::backoff::BackoffPolicy;

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

#[test]
fn test_delays_grow_then_cap() {
    let policy = BackoffPolicy::new(ms(100), 2.0, ms(1_000), 10);

    assert_eq!(policy.delay_for(1), ms(100));
    assert_eq!(policy.delay_for(2), ms(200));
    assert_eq!(policy.delay_for(3), ms(400));
    assert_eq!(policy.delay_for(4), ms(800));
    assert_eq!(policy.delay_for(5), ms(1_000));
    assert_eq!(policy.delay_for(500), ms(1_000));
}

#[test]
fn test_factor_below_one_is_flat() {
    let policy = BackoffPolicy::new(ms(50), 0.5, ms(1_000), 3);
    assert_eq!(policy.delay_for(1), ms(50));
    assert_eq!(policy.delay_for(3), ms(50));
}

#[test]
fn test_defaults_follow_config() {
    let policy = BackoffPolicy::default();
    assert_eq!(policy.base_delay, ms(100));
    assert_eq!(policy.factor, 2.0);
    assert_eq!(policy.max_delay, Duration::from_secs(10));
    assert_eq!(policy.max_attempts, 15);
    assert_eq!(policy.deadline, Some(ms(5_000)));
}

#[test]
fn test_from_config_without_deadline() {
    let config = BackoffConfig::default()
        .with_max_attempts(4)
        .with_delays(10, 40)
        .with_deadline_ms(None);
    let policy = BackoffPolicy::from(&config);

    assert_eq!(policy.attempts(), 4);
    assert!(policy.deadline.is_none());
    // 10 + 20 + 40
    assert_eq!(policy.max_total_delay(), ms(70));
}

#[test]
fn test_zero_attempts_still_tries_once() {
    let policy = BackoffPolicy::new(ms(10), 2.0, ms(100), 0);
    assert_eq!(policy.attempts(), 1);
    assert_eq!(policy.max_total_delay(), Duration::ZERO);
}
