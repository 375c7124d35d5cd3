//! Batch dispatch across the worker pool.
//!
//! A batch is split into chunks and processed on the engine's rayon
//! pool; results are reassembled in input order regardless of which
//! worker finished first. Each chunk parses its inputs, converts the
//! valid ones through the numeric backend in one call, and then runs
//! the per-item match. One bad input fails only its own slot.
//!
//! Cancellation (via [`CancelToken`]) and fail-fast aborts are observed
//! at chunk granularity: a chunk that has started runs to completion,
//! chunks that have not yet started resolve to
//! [`BatchOutcome::Cancelled`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use hue_core::{Result, Rgb};

use crate::analysis::{Analysis, AnalyzeOptions};
use crate::engine::{validate, Engine};

/// Cooperative cancellation handle.
///
/// Cloned freely; all clones observe the same flag. Cancelling is
/// irrevocable for the batches currently watching the token.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Options for a batch analysis.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Per-item analysis options.
    pub analyze: AnalyzeOptions,
    /// Abort remaining chunks after the first item failure. The default
    /// is to keep going and report per-item errors.
    pub fail_fast: bool,
    /// Time budget override for this batch; falls back to the engine
    /// config when unset.
    pub deadline: Option<Duration>,
}

/// Outcome of one batch slot, in input order.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchOutcome {
    /// The item was analyzed.
    Done {
        /// The analysis result.
        analysis: Analysis,
    },
    /// The item failed; its siblings are unaffected unless fail-fast
    /// was requested.
    Failed {
        /// Human-readable failure description.
        error: String,
    },
    /// The item was never processed: the batch was cancelled or aborted
    /// before its chunk started.
    Cancelled,
}

impl BatchOutcome {
    /// The analysis, when this slot completed.
    pub fn analysis(&self) -> Option<&Analysis> {
        match self {
            Self::Done { analysis } => Some(analysis),
            _ => None,
        }
    }
}

/// Result of a batch analysis: one outcome per input, in input order.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    /// Per-item outcomes, index-aligned with the input slice.
    pub outcomes: Vec<BatchOutcome>,
    /// Number of [`BatchOutcome::Done`] slots.
    pub completed: usize,
    /// Number of [`BatchOutcome::Failed`] slots.
    pub failed: usize,
    /// Number of [`BatchOutcome::Cancelled`] slots.
    pub cancelled: usize,
}

impl BatchReport {
    fn from_outcomes(outcomes: Vec<BatchOutcome>) -> Self {
        let mut completed = 0;
        let mut failed = 0;
        let mut cancelled = 0;
        for outcome in &outcomes {
            match outcome {
                BatchOutcome::Done { .. } => completed += 1,
                BatchOutcome::Failed { .. } => failed += 1,
                BatchOutcome::Cancelled => cancelled += 1,
            }
        }
        Self {
            outcomes,
            completed,
            failed,
            cancelled,
        }
    }
}

impl Engine {
    /// Analyzes many colors across the worker pool.
    ///
    /// Outcomes are returned in input order. Malformed items fail their
    /// own slot; `options.fail_fast` additionally cancels chunks that
    /// have not started yet. The token is checked between chunks.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidK`] when `options.analyze.k == 0`; option
    /// validation happens before any item is dispatched.
    ///
    /// [`Error::InvalidK`]: hue_core::Error::InvalidK
    pub fn analyze_batch(
        &self,
        inputs: &[String],
        options: &BatchOptions,
        token: &CancelToken,
    ) -> Result<BatchReport> {
        self.analyze_batch_with_hook(inputs, options, token, |_| {})
    }

    /// Batch dispatch with a per-item hook, used by tests to perturb
    /// worker timing.
    pub(crate) fn analyze_batch_with_hook(
        &self,
        inputs: &[String],
        options: &BatchOptions,
        token: &CancelToken,
        hook: impl Fn(usize) + Sync,
    ) -> Result<BatchReport> {
        validate(&options.analyze)?;

        let budget = options.deadline.or(self.config.batch_deadline);
        let deadline = budget.map(|d| Instant::now() + d);
        let chunk_size = self.config.chunk_size.max(1);
        let abort = AtomicBool::new(false);

        let outcomes: Vec<BatchOutcome> = self.pool.install(|| {
            inputs
                .par_chunks(chunk_size)
                .enumerate()
                .flat_map_iter(|(chunk_index, items)| {
                    self.process_chunk(
                        chunk_index * chunk_size,
                        items,
                        options,
                        deadline,
                        token,
                        &abort,
                        &hook,
                    )
                    .into_iter()
                })
                .collect()
        });

        let report = BatchReport::from_outcomes(outcomes);
        debug!(
            total = inputs.len(),
            completed = report.completed,
            failed = report.failed,
            cancelled = report.cancelled,
            "batch finished"
        );
        Ok(report)
    }

    #[allow(clippy::too_many_arguments)]
    fn process_chunk(
        &self,
        base: usize,
        items: &[String],
        options: &BatchOptions,
        deadline: Option<Instant>,
        token: &CancelToken,
        abort: &AtomicBool,
        hook: &(impl Fn(usize) + Sync),
    ) -> Vec<BatchOutcome> {
        if token.is_cancelled() || abort.load(Ordering::Relaxed) {
            return vec![BatchOutcome::Cancelled; items.len()];
        }

        enum Slot {
            Ready(BatchOutcome),
            Pending(Rgb),
        }

        let mut slots: Vec<Slot> = Vec::with_capacity(items.len());
        for (offset, input) in items.iter().enumerate() {
            hook(base + offset);
            match hue_convert::parse_hex(input) {
                Ok(rgb) => slots.push(Slot::Pending(rgb)),
                Err(err) => {
                    if options.fail_fast {
                        abort.store(true, Ordering::Relaxed);
                    }
                    slots.push(Slot::Ready(BatchOutcome::Failed {
                        error: err.to_string(),
                    }));
                }
            }
        }

        // One backend call converts the whole chunk
        let rgbs: Vec<Rgb> = slots
            .iter()
            .filter_map(|slot| match slot {
                Slot::Pending(rgb) => Some(*rgb),
                Slot::Ready(_) => None,
            })
            .collect();
        let mut labs = self.backend.rgb_to_lab_batch(&rgbs).into_iter();

        slots
            .into_iter()
            .map(|slot| match slot {
                Slot::Ready(outcome) => outcome,
                Slot::Pending(rgb) => {
                    let lab = labs.next().expect("one LAB per pending slot");
                    match self.analyze_parsed(rgb, lab, &options.analyze, deadline) {
                        Ok(analysis) => BatchOutcome::Done { analysis },
                        Err(err) => {
                            if options.fail_fast {
                                abort.store(true, Ordering::Relaxed);
                            }
                            BatchOutcome::Failed {
                                error: err.to_string(),
                            }
                        }
                    }
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;

    fn engine(workers: usize, chunk_size: usize) -> Engine {
        Engine::new(EngineConfig {
            workers,
            chunk_size,
            ..EngineConfig::default()
        })
        .unwrap()
    }

    fn hex_inputs(n: usize) -> Vec<String> {
        (0..n)
            .map(|i| format!("{:02X}{:02X}{:02X}", i * 7 % 256, i * 13 % 256, i * 29 % 256))
            .collect()
    }

    #[test]
    fn test_results_in_input_order_under_skewed_timing() {
        // Later items finish first; reassembly must still be positional
        let engine = engine(4, 1);
        let inputs = hex_inputs(8);
        let report = engine
            .analyze_batch_with_hook(&inputs, &BatchOptions::default(), &CancelToken::new(), |i| {
                std::thread::sleep(Duration::from_millis((8 - i as u64) * 5));
            })
            .unwrap();

        assert_eq!(report.completed, 8);
        for (input, outcome) in inputs.iter().zip(&report.outcomes) {
            let analysis = outcome.analysis().expect("all inputs are valid");
            assert_eq!(analysis.input.hex, format!("#{input}"));
        }
    }

    #[test]
    fn test_pre_cancelled_token_skips_everything() {
        let engine = engine(2, 4);
        let token = CancelToken::new();
        token.cancel();
        let report = engine
            .analyze_batch(&hex_inputs(10), &BatchOptions::default(), &token)
            .unwrap();
        assert_eq!(report.cancelled, 10);
        assert_eq!(report.completed, 0);
    }

    #[test]
    fn test_invalid_k_rejected_before_dispatch() {
        let engine = engine(2, 4);
        let options = BatchOptions {
            analyze: AnalyzeOptions {
                k: 0,
                ..AnalyzeOptions::default()
            },
            ..BatchOptions::default()
        };
        let err = engine
            .analyze_batch(&hex_inputs(3), &options, &CancelToken::new())
            .unwrap_err();
        assert!(err.is_validation_error());
    }

    #[test]
    fn test_empty_batch() {
        let engine = engine(2, 4);
        let report = engine
            .analyze_batch(&[], &BatchOptions::default(), &CancelToken::new())
            .unwrap();
        assert!(report.outcomes.is_empty());
        assert_eq!(report.completed + report.failed + report.cancelled, 0);
    }

    #[test]
    fn test_token_clones_share_state() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }
}
