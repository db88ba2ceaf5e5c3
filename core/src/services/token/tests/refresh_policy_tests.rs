use chrono::{Duration, TimeZone, Utc};

use crate::services::token::{is_in_refresh_window, RefreshPolicy};

#[test]
fn test_window_boundaries() {
    let policy = RefreshPolicy::default();
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap();

    assert!(policy.is_in_refresh_window_at(now + Duration::days(3), now));
    assert!(!policy.is_in_refresh_window_at(
        now + Duration::days(3) + Duration::milliseconds(1),
        now
    ));
    assert!(policy.is_in_refresh_window_at(now + Duration::hours(12), now));
    assert!(policy.is_in_refresh_window_at(now, now));
}

#[test]
fn test_expired_token_is_not_refreshable() {
    let policy = RefreshPolicy::default();
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap();

    assert!(!policy.is_in_refresh_window_at(now - Duration::seconds(1), now));
    assert!(!policy.is_in_refresh_window_at(now - Duration::days(10), now));
}

#[test]
fn test_fresh_token_is_not_refreshable() {
    let policy = RefreshPolicy::default();
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap();

    assert!(!policy.is_in_refresh_window_at(now + Duration::days(30), now));
    assert!(!policy.is_in_refresh_window_at(now + Duration::days(4), now));
}

#[test]
fn test_custom_window() {
    let policy = RefreshPolicy::new(Duration::days(7));
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

    assert!(policy.is_in_refresh_window_at(now + Duration::days(7), now));
    assert!(policy.is_in_refresh_window_at(now + Duration::days(6), now));
    assert!(!policy.is_in_refresh_window_at(now + Duration::days(8), now));
}

#[test]
fn test_free_function_reads_current_time() {
    assert!(is_in_refresh_window(Utc::now() + Duration::days(2)));
    assert!(!is_in_refresh_window(Utc::now() + Duration::days(20)));
    assert!(!is_in_refresh_window(Utc::now() - Duration::minutes(1)));
}
