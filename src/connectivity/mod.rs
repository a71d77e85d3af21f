//! Connectivity layer - environment online/offline signal shared process-wide

pub mod monitor;
pub mod source;

pub use monitor::{ConnectivityMonitor, Subscription};
pub use source::{ConnectivityEvent, ConnectivitySource, Listener, ListenerId, ManualSource};

use crate::constants::OFFLINE_NOTICE;

/// Notice to overlay while offline; gone as soon as connectivity returns
pub fn offline_notice(online: bool) -> Option<&'static str> {
    if online {
        None
    } else {
        Some(OFFLINE_NOTICE)
    }
}
