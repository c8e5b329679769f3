//! Traffic Generator - Synthetic Load Loop
//!
//! Issues one GET per interval against the demo service, sending a
//! fixed share of requests to the failing endpoint. Every failure is
//! swallowed: no retry, no backoff, the next iteration simply runs on
//! schedule. There is no terminal state; the process is stopped from
//! outside.

use std::time::Duration;

use tracing::{debug, info, instrument};

use crate::domain::traffic::{TargetSelector, TrafficTarget};
use crate::ports::traffic_client::TrafficClient;

/// Result of one generated request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The service answered (any status, including 5xx).
    Delivered {
        target: TrafficTarget,
        status: u16,
    },
    /// Transport failure (timeout, refused connection, DNS).
    Failed { target: TrafficTarget },
}

impl Outcome {
    /// Target the request was aimed at.
    pub fn target(&self) -> TrafficTarget {
        match *self {
            Outcome::Delivered { target, .. } | Outcome::Failed { target } => target,
        }
    }
}

/// Running totals kept by the generator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrafficStats {
    /// Requests attempted.
    pub iterations: u64,
    /// Requests aimed at the failing endpoint.
    pub failing_selected: u64,
    /// Requests that never got a response.
    pub transport_failures: u64,
}

impl TrafficStats {
    /// Share of requests aimed at the failing endpoint.
    pub fn failing_fraction(&self) -> f64 {
        if self.iterations == 0 {
            0.0
        } else {
            self.failing_selected as f64 / self.iterations as f64
        }
    }

    fn observe(&mut self, outcome: &Outcome) {
        self.iterations += 1;
        if outcome.target() == TrafficTarget::Failing {
            self.failing_selected += 1;
        }
        if matches!(outcome, Outcome::Failed { .. }) {
            self.transport_failures += 1;
        }
    }
}

/// Sequential load loop over a [`TrafficClient`].
pub struct TrafficGenerator<C> {
    client: C,
    selector: TargetSelector,
    /// Pause after each request.
    interval: Duration,
    /// Iterations between info-level summaries (0 = never).
    summary_every: u64,
    stats: TrafficStats,
}

impl<C: TrafficClient> TrafficGenerator<C> {
    /// Create a generator that sleeps `interval` between requests.
    pub fn new(client: C, selector: TargetSelector, interval: Duration) -> Self {
        Self {
            client,
            selector,
            interval,
            summary_every: 0,
            stats: TrafficStats::default(),
        }
    }

    /// Log a summary every `every` iterations.
    pub fn with_summary_every(mut self, every: u64) -> Self {
        self.summary_every = every;
        self
    }

    /// Totals so far.
    pub fn stats(&self) -> &TrafficStats {
        &self.stats
    }

    /// Pick a target and send one request, ignoring any failure.
    pub async fn step(&mut self) -> Outcome {
        let target = self.selector.next_target();

        let outcome = match self.client.get(target.path()).await {
            Ok(status) => Outcome::Delivered { target, status },
            Err(e) => {
                debug!(path = target.path(), error = %e, "traffic request failed, ignoring");
                Outcome::Failed { target }
            }
        };

        self.stats.observe(&outcome);
        outcome
    }

    /// Run a bounded number of iterations, sleeping after each.
    pub async fn run_iterations(&mut self, iterations: u64) {
        for _ in 0..iterations {
            self.iterate().await;
        }
    }

    /// Run forever.
    #[instrument(
        skip(self),
        fields(
            error_ratio = self.selector.error_ratio(),
            interval_ms = self.interval.as_millis() as u64
        )
    )]
    pub async fn run(mut self) {
        info!("Traffic generator started");
        loop {
            self.iterate().await;
        }
    }

    async fn iterate(&mut self) {
        self.step().await;

        if self.summary_every > 0 && self.stats.iterations % self.summary_every == 0 {
            info!(
                iterations = self.stats.iterations,
                failing_selected = self.stats.failing_selected,
                failing_fraction = self.stats.failing_fraction(),
                transport_failures = self.stats.transport_failures,
                "Traffic summary"
            );
        }

        tokio::time::sleep(self.interval).await;
    }
}
