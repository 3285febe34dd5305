//! Timer behavior tests for the session guard, run against a paused tokio
//! clock so expiry ordering is deterministic.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use inv_guard::{SessionConfig, SessionGuard};

fn counting_guard() -> (SessionGuard, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    let hits = Arc::clone(&count);
    let guard = SessionGuard::new(SessionConfig::default(), move || {
        hits.fetch_add(1, Ordering::SeqCst);
    });
    (guard, count)
}

async fn settle() {
    for _ in 0..5 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn full_idle_window_logs_out_exactly_once() {
    let (guard, count) = counting_guard();

    guard.start();
    settle().await;
    assert!(guard.is_active());

    // Past both the deadline and the backup margin.
    tokio::time::advance(Duration::from_millis(62_000)).await;
    settle().await;

    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert!(!guard.is_active());

    // Nothing else fires later.
    tokio::time::advance(Duration::from_secs(600)).await;
    settle().await;
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn activity_before_each_deadline_prevents_logout() {
    let (guard, count) = counting_guard();

    guard.start();
    settle().await;

    for _ in 0..6 {
        tokio::time::advance(Duration::from_secs(30)).await;
        settle().await;
        guard.on_activity();
        settle().await;
    }

    // Three minutes of wall time have passed, but no full idle window.
    assert_eq!(count.load(Ordering::SeqCst), 0);
    assert!(guard.is_active());

    // Stop reporting activity: the window finally elapses.
    tokio::time::advance(Duration::from_millis(62_000)).await;
    settle().await;
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn stop_before_deadline_prevents_logout() {
    let (guard, count) = counting_guard();

    guard.start();
    settle().await;
    tokio::time::advance(Duration::from_secs(30)).await;
    settle().await;

    guard.stop();
    assert!(!guard.is_active());

    // Neither the deadline timer nor the backup timer may fire.
    tokio::time::advance(Duration::from_secs(600)).await;
    settle().await;
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn stop_after_expiry_is_a_noop() {
    let (guard, count) = counting_guard();

    guard.start();
    settle().await;
    tokio::time::advance(Duration::from_millis(62_000)).await;
    settle().await;
    assert_eq!(count.load(Ordering::SeqCst), 1);

    guard.stop();
    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert!(!guard.is_active());
}

#[tokio::test(start_paused = true)]
async fn restart_rearms_without_double_firing() {
    let (guard, count) = counting_guard();

    guard.start();
    settle().await;
    tokio::time::advance(Duration::from_secs(30)).await;
    settle().await;

    // Second start supersedes the first registrations.
    guard.start();
    settle().await;

    // 40s after the restart: the original deadline has long passed.
    tokio::time::advance(Duration::from_secs(40)).await;
    settle().await;
    assert_eq!(count.load(Ordering::SeqCst), 0);

    tokio::time::advance(Duration::from_millis(22_000)).await;
    settle().await;
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn new_session_after_logout_runs_its_own_window() {
    let (guard, count) = counting_guard();

    guard.start();
    settle().await;
    tokio::time::advance(Duration::from_millis(62_000)).await;
    settle().await;
    assert_eq!(count.load(Ordering::SeqCst), 1);

    // Re-authentication starts a fresh session with a fresh window.
    guard.start();
    settle().await;
    assert!(guard.is_active());
    tokio::time::advance(Duration::from_secs(59)).await;
    settle().await;
    assert_eq!(count.load(Ordering::SeqCst), 1);

    tokio::time::advance(Duration::from_secs(3)).await;
    settle().await;
    assert_eq!(count.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn clones_share_one_session() {
    let (guard, count) = counting_guard();
    let surface_a = guard.clone();
    let surface_b = guard.clone();

    surface_a.start();
    settle().await;

    // Activity reported through any surface keeps the session alive.
    tokio::time::advance(Duration::from_secs(45)).await;
    settle().await;
    surface_b.on_activity();
    settle().await;

    tokio::time::advance(Duration::from_secs(45)).await;
    settle().await;
    assert_eq!(count.load(Ordering::SeqCst), 0);

    tokio::time::advance(Duration::from_secs(20)).await;
    settle().await;
    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert!(!surface_a.is_active());
}
