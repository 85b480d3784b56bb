// ABOUTME: Session transport selection between the serverless proxy and direct provider calls
// ABOUTME: Monotonic atomic state machine Undetermined -> ServerlessProxy -> Direct with manual reset
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};
use tracing::info;

/// How outbound calls reach the providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    /// Through the proxy, which holds the credentials
    ServerlessProxy,
    /// Straight to the providers with client-held keys
    Direct,
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ServerlessProxy => write!(f, "serverless_proxy"),
            Self::Direct => write!(f, "direct"),
        }
    }
}

const UNDETERMINED: u8 = 0;
const PROXY: u8 = 1;
const DIRECT: u8 = 2;

/// Transport mode for one orchestrator session
///
/// Starts undetermined. The first request probes the proxy and locks the
/// result. A locked proxy mode may later downgrade to direct; nothing
/// upgrades back except an explicit [`TransportState::reset`].
#[derive(Debug)]
pub struct TransportState {
    state: AtomicU8,
}

impl Default for TransportState {
    fn default() -> Self {
        Self::new()
    }
}

impl TransportState {
    /// Undetermined state
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(UNDETERMINED),
        }
    }

    /// State already locked to `mode`
    #[must_use]
    pub const fn locked(mode: TransportMode) -> Self {
        let raw = match mode {
            TransportMode::ServerlessProxy => PROXY,
            TransportMode::Direct => DIRECT,
        };
        Self {
            state: AtomicU8::new(raw),
        }
    }

    /// Locked mode, `None` while undetermined
    #[must_use]
    pub fn current(&self) -> Option<TransportMode> {
        match self.state.load(Ordering::SeqCst) {
            PROXY => Some(TransportMode::ServerlessProxy),
            DIRECT => Some(TransportMode::Direct),
            _ => None,
        }
    }

    /// Lock the outcome of a probe; returns the mode actually in force
    ///
    /// Only an undetermined state accepts the lock, so a concurrent
    /// downgrade is never overwritten by a late probe result.
    pub fn lock(&self, mode: TransportMode) -> TransportMode {
        let target = match mode {
            TransportMode::ServerlessProxy => PROXY,
            TransportMode::Direct => DIRECT,
        };
        match self
            .state
            .compare_exchange(UNDETERMINED, target, Ordering::SeqCst, Ordering::SeqCst)
        {
            Ok(_) => {
                info!(transport = %mode, "Transport mode locked");
                mode
            }
            Err(_) => self.current().unwrap_or(mode),
        }
    }

    /// Permanent downgrade to direct; true when this call changed the state
    pub fn downgrade(&self) -> bool {
        let previous = self.state.swap(DIRECT, Ordering::SeqCst);
        if previous == DIRECT {
            false
        } else {
            info!("Transport downgraded to direct for the rest of the session");
            true
        }
    }

    /// Forget the locked mode so the next request probes again
    pub fn reset(&self) {
        self.state.store(UNDETERMINED, Ordering::SeqCst);
        info!("Transport mode reset; proxy will be probed again");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_only_from_undetermined() {
        let state = TransportState::new();
        assert_eq!(state.current(), None);
        assert_eq!(state.lock(TransportMode::ServerlessProxy), TransportMode::ServerlessProxy);
        assert_eq!(state.lock(TransportMode::Direct), TransportMode::ServerlessProxy);
    }

    #[test]
    fn test_downgrade_is_sticky() {
        let state = TransportState::locked(TransportMode::ServerlessProxy);
        assert!(state.downgrade());
        assert!(!state.downgrade());
        assert_eq!(state.lock(TransportMode::ServerlessProxy), TransportMode::Direct);
        assert_eq!(state.current(), Some(TransportMode::Direct));
    }

    #[test]
    fn test_reset_allows_new_probe() {
        let state = TransportState::locked(TransportMode::Direct);
        state.reset();
        assert_eq!(state.current(), None);
        assert_eq!(state.lock(TransportMode::ServerlessProxy), TransportMode::ServerlessProxy);
    }
}
