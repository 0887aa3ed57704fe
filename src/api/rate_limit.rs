//! Per-organization rate limiting
//!
//! One `governor` limiter per organization id, created on first use and
//! held in a `DashMap`. Each limiter allows a burst of `max_requests` and
//! replenishes one request every `window / max_requests`, so a drained
//! organization regains its full allowance one window after it stopped.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use governor::clock::{Clock, DefaultClock};
use governor::middleware::StateInformationMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};

use crate::error::ConfigError;

type OrgLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock, StateInformationMiddleware>;

/// Outcome of a single [`OrgRateLimiter::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    /// `reset_after` is the time until the full burst is available again.
    Allowed { remaining: u32, reset_after: Duration },
    /// `retry_after` is the time until the next request would pass.
    Limited { retry_after: Duration },
}

pub struct OrgRateLimiter {
    window: Duration,
    max_requests: NonZeroU32,
    quota: Quota,
    limiters: DashMap<String, Arc<OrgLimiter>>,
}

impl OrgRateLimiter {
    pub fn new(window: Duration, max_requests: u32) -> Result<Self, ConfigError> {
        let max_requests =
            NonZeroU32::new(max_requests).ok_or(ConfigError::NotPositive("RATE_LIMIT_MAX"))?;
        let quota = Quota::with_period(window / max_requests.get())
            .ok_or(ConfigError::NotPositive("RATE_LIMIT_WINDOW_MS"))?
            .allow_burst(max_requests);

        Ok(Self {
            window,
            max_requests,
            quota,
            limiters: DashMap::new(),
        })
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests.get()
    }

    fn limiter_for(&self, key: &str) -> Arc<OrgLimiter> {
        if let Some(limiter) = self.limiters.get(key) {
            return Arc::clone(&limiter);
        }
        let limiter = self.limiters.entry(key.to_string()).or_insert_with(|| {
            Arc::new(RateLimiter::direct(self.quota).with_middleware::<StateInformationMiddleware>())
        });
        Arc::clone(&limiter)
    }

    /// Counts one request against `key`.
    pub fn check(&self, key: &str) -> RateDecision {
        match self.limiter_for(key).check() {
            Ok(snapshot) => {
                let remaining = snapshot.remaining_burst_capacity();
                let used = self.max_requests.get().saturating_sub(remaining);
                RateDecision::Allowed {
                    remaining,
                    reset_after: self.quota.replenish_interval() * used,
                }
            }
            Err(not_until) => RateDecision::Limited {
                retry_after: not_until.wait_time_from(DefaultClock::default().now()),
            },
        }
    }
}
