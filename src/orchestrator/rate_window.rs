// ABOUTME: Sliding-window request cap for direct-mode dispatch
// ABOUTME: Rejects immediately when the window is full instead of waiting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use crate::errors::{AppError, AppResult};

/// Timestamps of direct requests inside the last window
#[derive(Debug)]
pub struct RateWindow {
    requests: Mutex<Vec<Instant>>,
    limit: usize,
    window: Duration,
}

impl RateWindow {
    /// Window allowing `limit` requests per `window`
    #[must_use]
    pub fn new(limit: usize, window: Duration) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            limit,
            window,
        }
    }

    /// Configured cap
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Prune expired entries and reserve a slot, failing when the cap is reached
    ///
    /// The returned instant identifies the reservation for [`Self::release`].
    ///
    /// # Errors
    ///
    /// `RateLimitExceeded` when `limit` requests are already in the window
    pub async fn acquire(&self) -> AppResult<Instant> {
        let mut requests = self.requests.lock().await;
        let now = Instant::now();
        requests.retain(|&t| now.duration_since(t) < self.window);
        if requests.len() >= self.limit {
            return Err(AppError::rate_limited(self.limit, self.window.as_secs()));
        }
        requests.push(now);
        drop(requests);
        Ok(now)
    }

    /// Give back a reservation whose request never reached the provider
    pub async fn release(&self, slot: Instant) {
        let mut requests = self.requests.lock().await;
        if let Some(pos) = requests.iter().position(|&t| t == slot) {
            requests.remove(pos);
        }
    }

    /// Requests currently counted
    pub async fn in_window(&self) -> usize {
        let mut requests = self.requests.lock().await;
        let now = Instant::now();
        requests.retain(|&t| now.duration_since(t) < self.window);
        requests.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[tokio::test]
    async fn test_rejects_at_cap() {
        let window = RateWindow::new(2, Duration::from_secs(60));
        for _ in 0..2 {
            window.acquire().await.unwrap();
        }
        let err = window.acquire().await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RateLimitExceeded);
        assert_eq!(window.in_window().await, 2);
    }

    #[tokio::test]
    async fn test_release_frees_slot() {
        let window = RateWindow::new(1, Duration::from_secs(60));
        let slot = window.acquire().await.unwrap();
        assert!(window.acquire().await.is_err());
        window.release(slot).await;
        assert_eq!(window.in_window().await, 0);
        assert!(window.acquire().await.is_ok());
    }

    #[tokio::test]
    async fn test_concurrent_acquire_never_exceeds_cap() {
        let window = std::sync::Arc::new(RateWindow::new(3, Duration::from_secs(60)));
        let handles: Vec<_> = (0..10)
            .map(|_| {
                let window = window.clone();
                tokio::spawn(async move { window.acquire().await.is_ok() })
            })
            .collect();
        let mut granted = 0;
        for handle in handles {
            if handle.await.unwrap() {
                granted += 1;
            }
        }
        assert_eq!(granted, 3);
        assert_eq!(window.in_window().await, 3);
    }

    #[tokio::test]
    async fn test_expired_entries_pruned() {
        let window = RateWindow::new(1, Duration::from_millis(20));
        window.acquire().await.unwrap();
        tokio::time::sleep(Duration::from_millis(40)).await;
        assert!(window.acquire().await.is_ok());
    }
}
