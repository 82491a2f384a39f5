/*!
 * Structured Tracing
 * Subscriber setup and run-level spans using the tracing crate
 *
 * Library code logs through the `log` facade; the subscriber installed here
 * bridges those records so engine decisions and driver spans share one output.
 */

use crate::core::types::Tick;
use crate::scheduler::Algorithm;
use std::time::Instant;
use tracing::{debug, info, span, Level};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};
use uuid::Uuid;

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - SCHED_TRACE_JSON: Enable JSON output (default: false)
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var("SCHED_TRACE_JSON")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_line_number(true)
                    .with_file(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .init();
        info!("Structured tracing initialized with JSON output");
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .init();
        info!("Structured tracing initialized");
    }
}

/// Span covering one driven simulation run
pub struct RunSpan {
    span: tracing::Span,
    start: Instant,
    run_id: Uuid,
}

impl RunSpan {
    pub fn new(run_id: Uuid, algorithm: Algorithm) -> Self {
        let span = span!(
            Level::INFO,
            "simulation_run",
            run_id = %run_id,
            algorithm = algorithm.as_str(),
            ticks = tracing::field::Empty,
            completed = tracing::field::Empty,
        );

        let _entered = span.enter();
        debug!(run_id = %run_id, algorithm = algorithm.as_str(), "run started");
        drop(_entered);

        Self {
            span,
            start: Instant::now(),
            run_id,
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Record the final clock and completion flag
    pub fn record_outcome(&self, ticks: Tick, completed: bool) {
        self.span.record("ticks", ticks);
        self.span.record("completed", completed);
    }

    /// Span to instrument the run's future with
    pub fn span(&self) -> &tracing::Span {
        &self.span
    }
}

impl Drop for RunSpan {
    fn drop(&mut self) {
        let _entered = self.span.enter();
        debug!(
            run_id = %self.run_id,
            elapsed_ms = self.start.elapsed().as_millis() as u64,
            "run finished"
        );
    }
}
