//! Shared online/offline status with explicit subscribe/teardown lifecycle

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;

use crate::connectivity::source::{ConnectivityEvent, ConnectivitySource, ListenerId};

/// Hands out `Subscription`s to one process-wide status.
///
/// The status exists only while at least one subscription is alive: the first
/// subscriber installs the environment listener, the last one removes it.
#[derive(Clone)]
pub struct ConnectivityMonitor {
    shared: Arc<Shared>,
}

struct Shared {
    source: Arc<dyn ConnectivitySource>,
    active: Mutex<Option<Active>>,
}

struct Active {
    status: Arc<watch::Sender<bool>>,
    listener: ListenerId,
    subscribers: usize,
}

impl ConnectivityMonitor {
    pub fn new(source: Arc<dyn ConnectivitySource>) -> Self {
        ConnectivityMonitor {
            shared: Arc::new(Shared {
                source,
                active: Mutex::new(None),
            }),
        }
    }

    pub fn subscribe(&self) -> Subscription {
        let mut guard = self.shared.active.lock();
        let source = &self.shared.source;

        let active = guard.get_or_insert_with(|| {
            let (tx, _) = watch::channel(true);
            let status = Arc::new(tx);
            let writer = Arc::clone(&status);
            let listener = source.listen(Arc::new(move |event: ConnectivityEvent| {
                writer.send_if_modified(|online| {
                    let changed = *online != event.is_online();
                    *online = event.is_online();
                    changed
                });
            }));
            // Read after listening so no transition slips between the two
            status.send_replace(source.is_online());
            tracing::debug!(online = *status.borrow(), "Connectivity monitor started");

            Active {
                status,
                listener,
                subscribers: 0,
            }
        });

        active.subscribers += 1;
        Subscription {
            status: active.status.subscribe(),
            shared: Arc::clone(&self.shared),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.shared
            .active
            .lock()
            .as_ref()
            .map_or(0, |active| active.subscribers)
    }

    pub fn is_active(&self) -> bool {
        self.shared.active.lock().is_some()
    }
}

/// One consumer's view of the connectivity status
pub struct Subscription {
    status: watch::Receiver<bool>,
    shared: Arc<Shared>,
}

impl Subscription {
    pub fn is_online(&self) -> bool {
        *self.status.borrow()
    }

    /// Wait for the next transition and return the new status
    pub async fn changed(&mut self) -> Option<bool> {
        self.status.changed().await.ok()?;
        Some(*self.status.borrow_and_update())
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let mut guard = self.shared.active.lock();
        let last = match guard.as_mut() {
            Some(active) => {
                active.subscribers -= 1;
                active.subscribers == 0
            }
            None => false,
        };

        if last {
            if let Some(active) = guard.take() {
                self.shared.source.unlisten(active.listener);
                tracing::debug!("Connectivity monitor stopped");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectivity::{offline_notice, ManualSource};

    fn setup(online: bool) -> (Arc<ManualSource>, ConnectivityMonitor) {
        let source = Arc::new(ManualSource::new(online));
        let monitor = ConnectivityMonitor::new(source.clone());
        (source, monitor)
    }

    #[test]
    fn test_initial_value_read_at_subscription() {
        let (source, monitor) = setup(false);
        let sub = monitor.subscribe();
        assert!(!sub.is_online());
        drop(sub);

        source.set_online(true);
        assert!(monitor.subscribe().is_online());
    }

    #[test]
    fn test_events_reach_every_subscriber_synchronously() {
        let (source, monitor) = setup(true);
        let a = monitor.subscribe();
        let b = monitor.subscribe();

        source.set_online(false);
        assert!(!a.is_online());
        assert!(!b.is_online());
        assert!(offline_notice(a.is_online()).is_some());

        source.set_online(true);
        assert!(a.is_online());
        assert!(b.is_online());
        assert_eq!(offline_notice(b.is_online()), None);
    }

    #[test]
    fn test_single_listener_removed_with_last_subscriber() {
        let (source, monitor) = setup(true);
        let a = monitor.subscribe();
        let b = monitor.subscribe();
        assert_eq!(source.listener_count(), 1);
        assert_eq!(monitor.subscriber_count(), 2);

        drop(a);
        assert_eq!(source.listener_count(), 1);
        drop(b);
        assert_eq!(source.listener_count(), 0);
        assert!(!monitor.is_active());
    }

    #[tokio::test]
    async fn test_changed_wakes_on_transition() {
        let (source, monitor) = setup(true);
        let mut sub = monitor.subscribe();

        let waiter = tokio::spawn(async move { sub.changed().await });
        tokio::task::yield_now().await;
        source.set_online(false);

        assert_eq!(waiter.await.unwrap(), Some(false));
    }
}
