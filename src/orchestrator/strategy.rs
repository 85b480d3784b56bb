// ABOUTME: Ordered fallback runner replacing nested try/catch chains
// ABOUTME: Each strategy carries a predicate deciding whether its failure lets the next one run
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::future::Future;
use std::pin::Pin;

use tracing::{debug, warn};

use crate::errors::{AppError, AppResult, ErrorCode};

/// Boxed future produced by one strategy
pub type StrategyFuture<'a, T> = Pin<Box<dyn Future<Output = AppResult<T>> + Send + 'a>>;

/// Decides whether a failure may fall through to the next strategy
pub type Recoverable = fn(&AppError) -> bool;

struct Strategy<'a, T> {
    name: &'static str,
    recoverable: Recoverable,
    run: Box<dyn FnOnce() -> StrategyFuture<'a, T> + Send + 'a>,
}

/// Strategies tried in order until one succeeds
///
/// A strategy is only started when every earlier one failed with a
/// recoverable error. The first unrecoverable error, or the last error
/// when the chain runs out, is returned.
pub struct StrategyChain<'a, T> {
    operation: &'static str,
    strategies: Vec<Strategy<'a, T>>,
}

impl<'a, T: Send + 'a> StrategyChain<'a, T> {
    /// Empty chain for `operation` (used in logs)
    #[must_use]
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            strategies: Vec::new(),
        }
    }

    /// Append a strategy
    #[must_use]
    pub fn then<F, Fut>(mut self, name: &'static str, recoverable: Recoverable, run: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'a,
        Fut: Future<Output = AppResult<T>> + Send + 'a,
    {
        self.strategies.push(Strategy {
            name,
            recoverable,
            run: Box::new(move || Box::pin(run())),
        });
        self
    }

    /// Strategy names in execution order
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name).collect()
    }

    /// Run the chain
    ///
    /// # Errors
    ///
    /// Returns the first unrecoverable error, or the last error if every strategy failed
    pub async fn run(self) -> AppResult<T> {
        let operation = self.operation;
        let total = self.strategies.len();
        let mut last_error = None;

        for (position, strategy) in self.strategies.into_iter().enumerate() {
            debug!(operation, strategy = strategy.name, "Running strategy");
            match (strategy.run)().await {
                Ok(value) => return Ok(value),
                Err(error) => {
                    let has_next = position + 1 < total;
                    if !has_next || !(strategy.recoverable)(&error) {
                        return Err(error);
                    }
                    warn!(
                        operation,
                        strategy = strategy.name,
                        error = %error,
                        "Strategy failed, falling back"
                    );
                    last_error = Some(error);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            AppError::internal(format!("No strategy configured for {operation}"))
        }))
    }
}

/// Any failure falls through
#[must_use]
pub const fn always(_: &AppError) -> bool {
    true
}

/// Failures of a proxied call fall through to direct, except caller mistakes
#[must_use]
pub const fn proxied_failure(error: &AppError) -> bool {
    !matches!(
        error.code,
        ErrorCode::InvalidInput | ErrorCode::MissingRequiredField
    )
}

/// Nothing falls through
#[must_use]
pub const fn never(_: &AppError) -> bool {
    false
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[tokio::test]
    async fn test_first_success_wins() {
        let calls = AtomicUsize::new(0);
        let result = StrategyChain::new("test")
            .then("a", always, || async { Ok(1) })
            .then("b", always, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(2)
            })
            .run()
            .await
            .unwrap();
        assert_eq!(result, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_recoverable_failure_falls_through() {
        let result = StrategyChain::new("test")
            .then("proxy", proxied_failure, || async {
                Err(AppError::transport("proxy", "connection refused"))
            })
            .then("direct", never, || async { Ok("direct") })
            .run()
            .await
            .unwrap();
        assert_eq!(result, "direct");
    }

    #[tokio::test]
    async fn test_unrecoverable_failure_stops() {
        let err = StrategyChain::<u8>::new("test")
            .then("a", never, || async { Err(AppError::parse("bad")) })
            .then("b", always, || async { Ok(1) })
            .run()
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ParseError);
    }

    #[tokio::test]
    async fn test_last_error_surfaces() {
        let err = StrategyChain::<u8>::new("test")
            .then("a", always, || async { Err(AppError::transport("x", "down")) })
            .then("b", always, || async { Err(AppError::config_missing("no key")) })
            .run()
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigMissing);
    }

    #[test]
    fn test_names_in_order() {
        let chain = StrategyChain::<u8>::new("test")
            .then("proxy", always, || async { Ok(1) })
            .then("direct", always, || async { Ok(2) });
        assert_eq!(chain.names(), vec!["proxy", "direct"]);
    }
}
