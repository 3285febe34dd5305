//! Idle-timeout session guard.
//!
//! Tracks whether a user session is active and force-logs-out after a
//! window of input inactivity. One guard instance exists per process; it
//! is a cheaply clonable handle, injected into every monitored UI surface
//! rather than reached through a global. The guard owns the sole authority
//! to invoke the external logout callback.
//!
//! Two timers are armed per activation: the deadline timer at the timeout
//! window and a backup timer one grace period later, a redundant trigger
//! in case the primary registration is lost (process suspension edge
//! cases). Activity re-arms both timers and `stop` cancels both; a backup
//! timer left running would otherwise fire a spurious logout or leak (see
//! DESIGN.md).
//!
//! Timer callbacks run on the tokio timer context while `start` / `stop` /
//! `on_activity` arrive from arbitrary caller threads; the active flag is
//! the single source of truth and every expiry is gated on an atomic
//! check-and-clear, so at most one logout fires per activation.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Default inactivity window before forced logout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(60_000);
/// Default extra margin before the backup timer fires.
pub const DEFAULT_BACKUP_GRACE: Duration = Duration::from_millis(1_000);

/// Session guard timing configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Inactivity window before forced logout.
    pub timeout: Duration,
    /// Margin added to `timeout` for the redundant backup timer.
    pub backup_grace: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            backup_grace: DEFAULT_BACKUP_GRACE,
        }
    }
}

/// Which of the two redundant timers expired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerKind {
    Primary,
    Backup,
}

type LogoutCallback = Arc<dyn Fn() + Send + Sync>;

struct GuardInner {
    config: SessionConfig,
    /// Single source of truth for "session active". Expiry is honored only
    /// if the atomic check-and-clear observes `true`.
    active: AtomicBool,
    /// Bumped on every arm/cancel; a timer whose captured generation no
    /// longer matches was superseded and must not fire.
    generation: AtomicU64,
    /// Current primary deadline, for `remaining()`.
    deadline: Mutex<Option<Instant>>,
    primary: Mutex<Option<JoinHandle<()>>>,
    backup: Mutex<Option<JoinHandle<()>>>,
    on_logout: LogoutCallback,
}

/// Handle to the process-wide session guard.
///
/// Clone freely; all clones share the same state. Must be used within a
/// tokio runtime, since the timers are spawned tasks.
#[derive(Clone)]
pub struct SessionGuard {
    inner: Arc<GuardInner>,
}

impl SessionGuard {
    /// Build a guard with the given timing and logout callback.
    ///
    /// The callback is expected to terminate the authenticated session at
    /// the credential authority and navigate the host UI back to login; it
    /// is assumed to succeed instantaneously and is never retried.
    pub fn new(config: SessionConfig, on_logout: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            inner: Arc::new(GuardInner {
                config,
                active: AtomicBool::new(false),
                generation: AtomicU64::new(0),
                deadline: Mutex::new(None),
                primary: Mutex::new(None),
                backup: Mutex::new(None),
                on_logout: Arc::new(on_logout),
            }),
        }
    }

    /// Idle -> Active: mark the session active and arm both timers.
    ///
    /// Calling `start` while already active re-arms both timers, cancelling
    /// the prior registrations first.
    pub fn start(&self) {
        self.inner.active.store(true, Ordering::SeqCst);
        self.arm_timers();
        info!(
            timeout_ms = self.inner.config.timeout.as_millis() as u64,
            "session started"
        );
    }

    /// Report detected user activity. No-op while idle; while active,
    /// cancels and re-arms both timers.
    pub fn on_activity(&self) {
        if !self.inner.active.load(Ordering::SeqCst) {
            return;
        }
        self.arm_timers();
        debug!("activity detected, session timers re-armed");
    }

    /// Active or Idle -> Idle: clear the active flag and cancel both
    /// timers. Never invokes the logout callback.
    pub fn stop(&self) {
        self.inner.active.store(false, Ordering::SeqCst);
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
        cancel(&self.inner.primary);
        cancel(&self.inner.backup);
        *self.inner.deadline.lock() = None;
        info!("session stopped");
    }

    /// Drive the expiry path immediately, bypassing the timers.
    ///
    /// Subject to the same at-most-once guarantee as a timer expiry; a
    /// no-op when the session is not active.
    pub fn force_logout(&self) {
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
        cancel(&self.inner.primary);
        cancel(&self.inner.backup);
        *self.inner.deadline.lock() = None;

        if self.inner.active.swap(false, Ordering::SeqCst) {
            info!("forced logout");
            (self.inner.on_logout)();
        }
    }

    /// Whether a session is currently active.
    pub fn is_active(&self) -> bool {
        self.inner.active.load(Ordering::SeqCst)
    }

    /// Time until the primary deadline, or `None` while idle.
    pub fn remaining(&self) -> Option<Duration> {
        if !self.is_active() {
            return None;
        }
        self.inner
            .deadline
            .lock()
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    /// Cancel any prior registrations and arm fresh primary and backup
    /// timers under a new generation.
    fn arm_timers(&self) {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *self.inner.deadline.lock() = Some(Instant::now() + self.inner.config.timeout);

        let inner = Arc::clone(&self.inner);
        let primary = tokio::spawn(async move {
            tokio::time::sleep(inner.config.timeout).await;
            GuardInner::expire(&inner, generation, TimerKind::Primary);
        });
        replace(&self.inner.primary, primary);

        let inner = Arc::clone(&self.inner);
        let backup = tokio::spawn(async move {
            tokio::time::sleep(inner.config.timeout + inner.config.backup_grace).await;
            GuardInner::expire(&inner, generation, TimerKind::Backup);
        });
        replace(&self.inner.backup, backup);
    }
}

impl GuardInner {
    /// Timer expiry entry point. Honored only when the captured generation
    /// is still current and the active flag was set; every other firing is
    /// absorbed and logged, never surfaced.
    fn expire(inner: &Arc<GuardInner>, generation: u64, kind: TimerKind) {
        if inner.generation.load(Ordering::SeqCst) != generation {
            debug!(?kind, "stale session timer fired, ignoring");
            return;
        }
        if !inner.active.swap(false, Ordering::SeqCst) {
            debug!(?kind, "session timer fired after session already ended");
            return;
        }

        *inner.deadline.lock() = None;
        match kind {
            TimerKind::Primary => cancel(&inner.backup),
            TimerKind::Backup => {
                warn!("backup session timer fired; primary registration was lost");
                cancel(&inner.primary);
            }
        }

        info!(?kind, "idle timeout expired, logging out");
        (inner.on_logout)();
    }
}

/// Swap in a new timer task, aborting the previous registration.
/// Aborting an already-finished task is a no-op.
fn replace(slot: &Mutex<Option<JoinHandle<()>>>, handle: JoinHandle<()>) {
    if let Some(prev) = slot.lock().replace(handle) {
        prev.abort();
    }
}

fn cancel(slot: &Mutex<Option<JoinHandle<()>>>) {
    if let Some(handle) = slot.lock().take() {
        handle.abort();
    }
}
