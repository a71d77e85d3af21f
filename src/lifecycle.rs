//! Liveness tokens guarding async continuations against torn-down owners

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag: alive until the owner calls `revoke` or drops its `Liveness`.
///
/// Tasks hold a `LivenessToken` and must check it before touching owner state.
#[derive(Debug)]
pub struct Liveness {
    alive: Arc<AtomicBool>,
}

/// Cheap clone of a liveness flag, handed to spawned tasks
#[derive(Debug, Clone)]
pub struct LivenessToken {
    alive: Arc<AtomicBool>,
}

impl Liveness {
    pub fn new() -> Self {
        Liveness {
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn token(&self) -> LivenessToken {
        LivenessToken {
            alive: Arc::clone(&self.alive),
        }
    }

    pub fn revoke(&self) {
        self.alive.store(false, Ordering::Release);
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Liveness {
    fn drop(&mut self) {
        self.revoke();
    }
}

impl LivenessToken {
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_sees_revoke_and_drop() {
        let owner = Liveness::new();
        let token = owner.token();
        assert!(token.is_alive());
        owner.revoke();
        assert!(!token.is_alive());

        let owner = Liveness::new();
        let token = owner.token();
        drop(owner);
        assert!(!token.is_alive());
    }
}
