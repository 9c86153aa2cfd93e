//! Prediction counters and latency statistics.

use crate::session::Outcome;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};
use tracing::info;

/// Latency samples kept before the oldest half is dropped
const MAX_SAMPLES: usize = 10_000;

/// Metrics collector for served predictions
pub struct PredictionMetrics {
    /// Successful predictions
    pub predictions_served: AtomicU64,
    /// Inference failures
    pub prediction_failures: AtomicU64,
    /// Inputs rejected before inference
    pub inputs_rejected: AtomicU64,
    /// Triggers while the model was unavailable
    pub unavailable: AtomicU64,
    /// Processing times (in microseconds)
    processing_times: RwLock<Vec<u64>>,
    /// Start time for rate calculation
    start_time: Instant,
}

impl PredictionMetrics {
    pub fn new() -> Self {
        Self {
            predictions_served: AtomicU64::new(0),
            prediction_failures: AtomicU64::new(0),
            inputs_rejected: AtomicU64::new(0),
            unavailable: AtomicU64::new(0),
            processing_times: RwLock::new(Vec::with_capacity(1000)),
            start_time: Instant::now(),
        }
    }

    /// Record the outcome of one trigger
    pub fn record_outcome(&self, outcome: &Outcome, processing_time: Duration) {
        match outcome {
            Outcome::Success(_) => {
                self.predictions_served.fetch_add(1, Ordering::Relaxed);
                self.record_latency(processing_time);
            }
            Outcome::Failed(_) => {
                self.prediction_failures.fetch_add(1, Ordering::Relaxed);
                self.record_latency(processing_time);
            }
            Outcome::Invalid(_) => self.record_rejected(),
            Outcome::Unavailable(_) => {
                self.unavailable.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Count an input rejected before it reached the model
    pub fn record_rejected(&self) {
        self.inputs_rejected.fetch_add(1, Ordering::Relaxed);
    }

    fn record_latency(&self, processing_time: Duration) {
        let mut times = self
            .processing_times
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        times.push(processing_time.as_micros() as u64);
        if times.len() > MAX_SAMPLES {
            times.drain(0..MAX_SAMPLES / 2);
        }
    }

    /// Get processing time statistics
    pub fn get_processing_stats(&self) -> ProcessingStats {
        let times = self
            .processing_times
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        if times.is_empty() {
            return ProcessingStats::default();
        }

        let mut sorted: Vec<u64> = times.clone();
        sorted.sort_unstable();

        let sum: u64 = sorted.iter().sum();
        let count = sorted.len();
        let percentile = |p: f64| sorted[((count as f64 * p) as usize).min(count - 1)];

        ProcessingStats {
            count: count as u64,
            mean_us: sum / count as u64,
            p50_us: percentile(0.50),
            p95_us: percentile(0.95),
            p99_us: percentile(0.99),
            max_us: sorted[count - 1],
        }
    }

    /// Predictions per second since startup
    pub fn get_throughput(&self) -> f64 {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.predictions_served.load(Ordering::Relaxed) as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Point-in-time copy of every counter
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            predictions_served: self.predictions_served.load(Ordering::Relaxed),
            prediction_failures: self.prediction_failures.load(Ordering::Relaxed),
            inputs_rejected: self.inputs_rejected.load(Ordering::Relaxed),
            unavailable: self.unavailable.load(Ordering::Relaxed),
            uptime_secs: self.start_time.elapsed().as_secs(),
            processing: self.get_processing_stats(),
        }
    }

    /// Print summary statistics
    pub fn print_summary(&self) {
        let snapshot = self.snapshot();
        let p = &snapshot.processing;

        info!("╔══════════════════════════════════════════════════════════╗");
        info!("║            SILICA PREDICTOR - METRICS SUMMARY            ║");
        info!("╠══════════════════════════════════════════════════════════╣");
        info!(
            "║ Predictions: {:>8}  │  Failures: {:>6}  │  Rejected: {:>6}",
            snapshot.predictions_served, snapshot.prediction_failures, snapshot.inputs_rejected
        );
        info!(
            "║ Latency (μs): mean={:>5} p50={:>5} p95={:>5} p99={:>5} max={:>5}",
            p.mean_us, p.p50_us, p.p95_us, p.p99_us, p.max_us
        );
        info!("║ Throughput: {:>6.2} predictions/s", self.get_throughput());
        info!("╚══════════════════════════════════════════════════════════╝");
    }
}

impl Default for PredictionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Processing time statistics
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct ProcessingStats {
    pub count: u64,
    pub mean_us: u64,
    pub p50_us: u64,
    pub p95_us: u64,
    pub p99_us: u64,
    pub max_us: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub predictions_served: u64,
    pub prediction_failures: u64,
    pub inputs_rejected: u64,
    pub unavailable: u64,
    pub uptime_secs: u64,
    pub processing: ProcessingStats,
}

/// Periodic metrics reporter
pub struct MetricsReporter {
    metrics: Arc<PredictionMetrics>,
    interval_secs: u64,
}

impl MetricsReporter {
    pub fn new(metrics: Arc<PredictionMetrics>, interval_secs: u64) -> Self {
        Self {
            metrics,
            interval_secs,
        }
    }

    /// Start the periodic reporting task
    pub async fn start(self) {
        let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs.max(1)));
        // The first tick completes immediately
        interval.tick().await;
        loop {
            interval.tick().await;
            self.metrics.print_summary();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ParameterError, PredictionError};
    use crate::types::prediction::PredictionResult;

    #[test]
    fn test_outcome_counters() {
        let metrics = PredictionMetrics::new();

        metrics.record_outcome(
            &Outcome::Success(PredictionResult::new(1.0, "m")),
            Duration::from_micros(100),
        );
        metrics.record_outcome(
            &Outcome::Failed(PredictionError::EmptyOutput),
            Duration::from_micros(300),
        );
        metrics.record_outcome(
            &Outcome::Invalid(ParameterError {
                field: "air_flow",
                value: "400".to_string(),
                reason: "out of range".to_string(),
            }),
            Duration::ZERO,
        );

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.predictions_served, 1);
        assert_eq!(snapshot.prediction_failures, 1);
        assert_eq!(snapshot.inputs_rejected, 1);
        assert_eq!(snapshot.processing.count, 2);
        assert_eq!(snapshot.processing.mean_us, 200);
        assert_eq!(snapshot.processing.max_us, 300);
    }

    #[test]
    fn test_empty_stats() {
        let metrics = PredictionMetrics::new();
        assert_eq!(metrics.get_processing_stats(), ProcessingStats::default());
    }
}
