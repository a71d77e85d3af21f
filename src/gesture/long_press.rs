//! Long-press gesture: a cancellable, single-shot delayed activation

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::constants::DEFAULT_HOLD_MS;

/// Progress of the current press cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PressState {
    Idle,
    Pending { started_at: Instant, deadline: Instant },
    Fired,
}

/// Input-surface signals a gesture is bound to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PressEvent {
    PointerDown,
    PointerUp,
    PointerLeave,
    TouchStart,
    TouchEnd,
    TouchCancel,
}

impl PressEvent {
    pub fn begins_press(self) -> bool {
        matches!(self, PressEvent::PointerDown | PressEvent::TouchStart)
    }
}

struct Inner {
    state: PressState,
    /// Bumped on every `start`; a timer only fires for the cycle that armed it
    cycle: u64,
    timer: Option<JoinHandle<()>>,
}

/// Gesture handler owned by one interactive element.
///
/// Transitions:
///
/// | from    | `start`  | `stop` | timer elapses |
/// |---------|----------|--------|---------------|
/// | Idle    | Pending  | Idle   | -             |
/// | Pending | Pending* | Idle   | Fired         |
/// | Fired   | Pending  | Fired  | -             |
///
/// `*` the previous timer is aborted before the new one is armed.
pub struct LongPress {
    inner: Arc<Mutex<Inner>>,
    on_confirm: Arc<dyn Fn() + Send + Sync>,
    hold: Duration,
}

impl LongPress {
    pub fn attach(on_confirm: impl Fn() + Send + Sync + 'static, hold: Duration) -> Self {
        LongPress {
            inner: Arc::new(Mutex::new(Inner {
                state: PressState::Idle,
                cycle: 0,
                timer: None,
            })),
            on_confirm: Arc::new(on_confirm),
            hold,
        }
    }

    pub fn with_default_hold(on_confirm: impl Fn() + Send + Sync + 'static) -> Self {
        Self::attach(on_confirm, Duration::from_millis(DEFAULT_HOLD_MS))
    }

    /// Begin a press cycle. Must be called from within a Tokio runtime.
    pub fn start(&self) {
        let mut inner = self.inner.lock();
        if let Some(timer) = inner.timer.take() {
            timer.abort();
        }

        inner.cycle += 1;
        let cycle = inner.cycle;
        let started_at = Instant::now();
        let deadline = started_at + self.hold;
        inner.state = PressState::Pending { started_at, deadline };

        let shared = Arc::clone(&self.inner);
        let on_confirm = Arc::clone(&self.on_confirm);
        inner.timer = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;

            let fire = {
                let mut inner = shared.lock();
                let current = inner.cycle == cycle
                    && matches!(inner.state, PressState::Pending { .. });
                if current {
                    inner.state = PressState::Fired;
                    inner.timer = None;
                }
                current
            };

            if fire {
                tracing::debug!(cycle, "Long press confirmed");
                on_confirm();
            }
        }));
    }

    /// Cancel a pending press. Safe to call in any state.
    pub fn stop(&self) {
        let mut inner = self.inner.lock();
        if let PressState::Pending { .. } = inner.state {
            if let Some(timer) = inner.timer.take() {
                timer.abort();
            }
            inner.state = PressState::Idle;
        }
    }

    pub fn handle(&self, event: PressEvent) {
        if event.begins_press() {
            self.start();
        } else {
            self.stop();
        }
    }

    pub fn state(&self) -> PressState {
        self.inner.lock().state
    }

    pub fn is_confirmed(&self) -> bool {
        self.state() == PressState::Fired
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state(), PressState::Pending { .. })
    }

    pub fn hold(&self) -> Duration {
        self.hold
    }

    /// Fraction of the hold completed, for progress indicators
    pub fn progress(&self) -> f64 {
        match self.state() {
            PressState::Idle => 0.0,
            PressState::Fired => 1.0,
            PressState::Pending { started_at, .. } => {
                if self.hold.is_zero() {
                    return 1.0;
                }
                (started_at.elapsed().as_secs_f64() / self.hold.as_secs_f64()).min(1.0)
            }
        }
    }
}

impl Drop for LongPress {
    fn drop(&mut self) {
        if let Some(timer) = self.inner.lock().timer.take() {
            timer.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::sleep;

    fn counting(hold_ms: u64) -> (LongPress, Arc<AtomicUsize>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let press = LongPress::attach(
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
            },
            Duration::from_millis(hold_ms),
        );
        (press, hits)
    }

    #[tokio::test(start_paused = true)]
    async fn test_release_before_hold_never_fires() {
        let (press, hits) = counting(3000);
        press.start();
        sleep(Duration::from_millis(2900)).await;
        press.stop();
        sleep(Duration::from_secs(10)).await;

        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(press.state(), PressState::Idle);
        assert!(!press.is_confirmed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_hold_fires_once() {
        let (press, hits) = counting(3000);
        press.start();
        assert!(press.is_pending());
        sleep(Duration::from_millis(3010)).await;

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(press.is_confirmed());
        assert_eq!(press.progress(), 1.0);

        sleep(Duration::from_secs(10)).await;
        press.stop();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(press.is_confirmed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_replaces_pending_timer() {
        let (press, hits) = counting(3000);
        press.start();
        sleep(Duration::from_millis(1000)).await;
        press.start();

        sleep(Duration::from_millis(2500)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        sleep(Duration::from_millis(600)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        sleep(Duration::from_secs(10)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_cycle_resets_confirmation() {
        let (press, hits) = counting(100);
        press.start();
        sleep(Duration::from_millis(150)).await;
        assert!(press.is_confirmed());

        press.start();
        assert!(!press.is_confirmed());
        sleep(Duration::from_millis(150)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_termination_signals_cancel() {
        for end in [PressEvent::PointerUp, PressEvent::PointerLeave, PressEvent::TouchEnd, PressEvent::TouchCancel] {
            let (press, hits) = counting(500);
            press.handle(PressEvent::TouchStart);
            sleep(Duration::from_millis(200)).await;
            press.handle(end);
            press.handle(end);
            sleep(Duration::from_secs(1)).await;
            assert_eq!(hits.load(Ordering::SeqCst), 0, "{:?} did not cancel", end);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_timer() {
        let (press, hits) = counting(500);
        press.handle(PressEvent::PointerDown);
        drop(press);
        sleep(Duration::from_secs(1)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_tracks_elapsed_hold() {
        let (press, _hits) = counting(1000);
        assert_eq!(press.progress(), 0.0);
        press.start();
        sleep(Duration::from_millis(500)).await;
        let p = press.progress();
        assert!((p - 0.5).abs() < 0.01, "progress was {}", p);
        press.stop();
        assert_eq!(press.progress(), 0.0);
    }
}
