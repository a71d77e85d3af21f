//! Environment connectivity signal

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectivityEvent {
    Online,
    Offline,
}

impl ConnectivityEvent {
    pub fn is_online(self) -> bool {
        self == ConnectivityEvent::Online
    }
}

pub type Listener = Arc<dyn Fn(ConnectivityEvent) + Send + Sync>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Readable on demand and subscribable for transitions
pub trait ConnectivitySource: Send + Sync + 'static {
    fn is_online(&self) -> bool;

    /// Register a listener, called synchronously on every transition
    fn listen(&self, listener: Listener) -> ListenerId;

    fn unlisten(&self, id: ListenerId);
}

/// Source driven by the host: whoever observes the OS/network state calls
/// `set_online`. Emits only on actual transitions.
pub struct ManualSource {
    online: AtomicBool,
    listeners: Mutex<HashMap<ListenerId, Listener>>,
    next_id: AtomicU64,
}

impl ManualSource {
    pub fn new(online: bool) -> Self {
        ManualSource {
            online: AtomicBool::new(online),
            listeners: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn set_online(&self, online: bool) {
        if self.online.swap(online, Ordering::SeqCst) == online {
            return;
        }

        let event = if online {
            ConnectivityEvent::Online
        } else {
            ConnectivityEvent::Offline
        };
        tracing::info!(?event, "Connectivity changed");

        // Listeners run outside the lock so they may (un)register freely
        let listeners: Vec<Listener> = self.listeners.lock().values().cloned().collect();
        for listener in listeners {
            listener(event);
        }
    }

    pub fn toggle(&self) {
        self.set_online(!self.is_online());
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }
}

impl Default for ManualSource {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ConnectivitySource for ManualSource {
    fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    fn listen(&self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.listeners.lock().insert(id, listener);
        id
    }

    fn unlisten(&self, id: ListenerId) {
        self.listeners.lock().remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_emits_only_on_transition() {
        let source = ManualSource::new(true);
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let id = source.listen(Arc::new(move |_: ConnectivityEvent| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        source.set_online(true);
        source.set_online(false);
        source.set_online(false);
        source.toggle();
        assert_eq!(hits.load(Ordering::SeqCst), 2);

        source.unlisten(id);
        source.toggle();
        assert_eq!(hits.load(Ordering::SeqCst), 2);
        assert_eq!(source.listener_count(), 0);
    }
}
