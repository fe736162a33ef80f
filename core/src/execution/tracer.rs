//! Trace recording for step generators
//!
//! `TraceRecorder` is the only way a `StepTrace` comes into existence. It
//! numbers steps, enforces the step budget, marks the best and terminal steps
//! and turns generator errors into degenerate, renderable traces.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use log::{debug, warn};

use crate::algorithm::traits::{AlgorithmId, GeneratorError};
use crate::config::GeneratorLimits;
use crate::execution::step::{DegenerateSnapshot, Snapshot, Step, StepKind, StepTrace, TraceOutcome};

/// Append-only step buffer owned by one generator run
#[derive(Debug)]
pub struct TraceRecorder {
    algorithm: AlgorithmId,
    limit: usize,
    steps: Vec<Step>,
    best: Option<usize>,
}

impl TraceRecorder {
    pub fn new(algorithm: AlgorithmId, limits: &GeneratorLimits) -> Self {
        Self {
            algorithm,
            limit: limits.max_steps.max(1),
            steps: Vec::new(),
            best: None,
        }
    }

    /// Runs a generator body and freezes whatever it recorded
    pub fn run<F>(algorithm: AlgorithmId, limits: &GeneratorLimits, body: F) -> StepTrace
    where
        F: FnOnce(&mut TraceRecorder) -> Result<(), GeneratorError>,
    {
        let mut recorder = Self::new(algorithm, limits);
        match body(&mut recorder) {
            Ok(()) => recorder.finish(),
            Err(err) => {
                warn!("{} degraded to a one-step trace: {}", algorithm, err);
                Self::degenerate(algorithm, err)
            }
        }
    }

    /// Step budget for this run
    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Index of the most recently recorded step
    pub fn last_index(&self) -> Option<usize> {
        self.steps.len().checked_sub(1)
    }

    /// Fails fast when a run is known to need more steps than the budget allows
    pub fn ensure_budget(&self, required: usize) -> Result<(), GeneratorError> {
        if required > self.limit {
            return Err(GeneratorError::GenerationOverflow {
                limit: self.limit,
                required,
            });
        }
        Ok(())
    }

    /// Appends a step and returns its index
    pub fn record(
        &mut self,
        kind: StepKind,
        snapshot: Snapshot,
        narration: impl Into<String>,
    ) -> Result<usize, GeneratorError> {
        let index = self.steps.len();
        if index >= self.limit {
            return Err(GeneratorError::GenerationOverflow {
                limit: self.limit,
                required: index + 1,
            });
        }
        self.steps.push(Step {
            index,
            kind,
            snapshot,
            narration: narration.into(),
            is_best: false,
            is_terminal: false,
        });
        Ok(index)
    }

    /// Flags the step at `index` as the one holding the final best result,
    /// replacing any earlier choice
    pub fn mark_best(&mut self, index: usize) {
        if index < self.steps.len() {
            self.best = Some(index);
        }
    }

    /// Flags the most recently recorded step as best
    pub fn mark_last_best(&mut self) {
        if let Some(index) = self.last_index() {
            self.best = Some(index);
        }
    }

    fn finish(mut self) -> StepTrace {
        if self.steps.is_empty() {
            warn!("{} recorded no steps", self.algorithm);
            return Self::single(
                self.algorithm,
                TraceOutcome::Complete,
                StepKind::Done,
                DegenerateSnapshot {
                    reason: "nothing to simulate".to_string(),
                    limit: None,
                    required: None,
                },
                "There is nothing to simulate for this input.".to_string(),
            );
        }
        if let Some(best) = self.best {
            self.steps[best].is_best = true;
        }
        if let Some(last) = self.steps.last_mut() {
            last.is_terminal = true;
        }
        debug!("{} generated {} steps", self.algorithm, self.steps.len());
        StepTrace::from_parts(self.algorithm, TraceOutcome::Complete, self.steps)
    }

    fn degenerate(algorithm: AlgorithmId, err: GeneratorError) -> StepTrace {
        match err {
            GeneratorError::InvalidInput { reason } => Self::single(
                algorithm,
                TraceOutcome::InvalidInput { reason: reason.clone() },
                StepKind::Invalid,
                DegenerateSnapshot {
                    reason: reason.clone(),
                    limit: None,
                    required: None,
                },
                format!("This input cannot be simulated: {reason}."),
            ),
            GeneratorError::GenerationOverflow { limit, required } => Self::single(
                algorithm,
                TraceOutcome::NotSimulatable { limit, required },
                StepKind::Overflow,
                DegenerateSnapshot {
                    reason: "input too large to step through".to_string(),
                    limit: Some(limit),
                    required: Some(required),
                },
                format!(
                    "This input needs at least {required} steps, more than the {limit} a walkthrough can show. Try a smaller input."
                ),
            ),
        }
    }

    fn single(
        algorithm: AlgorithmId,
        outcome: TraceOutcome,
        kind: StepKind,
        snapshot: DegenerateSnapshot,
        narration: String,
    ) -> StepTrace {
        let step = Step {
            index: 0,
            kind,
            snapshot: Snapshot::Degenerate(snapshot),
            narration,
            is_best: false,
            is_terminal: true,
        };
        StepTrace::from_parts(algorithm, outcome, vec![step])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(reason: &str) -> Snapshot {
        Snapshot::Degenerate(DegenerateSnapshot {
            reason: reason.to_string(),
            limit: None,
            required: None,
        })
    }

    #[test]
    fn test_indices_are_contiguous_and_last_is_terminal() {
        let trace = TraceRecorder::run(AlgorithmId::MaxArea, &GeneratorLimits::default(), |r| {
            for i in 0..5 {
                r.record(StepKind::Compare, note("x"), format!("step {i}"))?;
            }
            Ok(())
        });

        assert_eq!(trace.len(), 5);
        for (i, step) in trace.iter().enumerate() {
            assert_eq!(step.index, i);
            assert_eq!(step.is_terminal, i == 4);
        }
    }

    #[test]
    fn test_only_final_best_is_flagged() {
        let trace = TraceRecorder::run(AlgorithmId::MaxArea, &GeneratorLimits::default(), |r| {
            r.record(StepKind::Compare, note("a"), "a")?;
            r.mark_last_best();
            r.record(StepKind::Compare, note("b"), "b")?;
            r.mark_last_best();
            r.record(StepKind::Compare, note("c"), "c")?;
            Ok(())
        });

        let best: Vec<_> = trace.iter().filter(|s| s.is_best).map(|s| s.index).collect();
        assert_eq!(best, vec![1]);
    }

    #[test]
    fn test_budget_overflow_becomes_single_step() {
        let limits = GeneratorLimits::with_max_steps(3);
        let trace = TraceRecorder::run(AlgorithmId::MaxArea, &limits, |r| {
            loop {
                r.record(StepKind::Compare, note("x"), "again")?;
            }
        });

        assert_eq!(trace.len(), 1);
        assert_eq!(trace.terminal().kind, StepKind::Overflow);
        assert_eq!(
            trace.outcome(),
            &TraceOutcome::NotSimulatable { limit: 3, required: 4 }
        );
    }

    #[test]
    fn test_invalid_input_becomes_single_step() {
        let trace = TraceRecorder::run(AlgorithmId::LruCache, &GeneratorLimits::default(), |_| {
            Err(GeneratorError::invalid("capacity must be positive"))
        });

        assert_eq!(trace.len(), 1);
        let step = trace.terminal();
        assert_eq!(step.kind, StepKind::Invalid);
        assert!(step.is_terminal);
        assert!(step.narration.contains("capacity must be positive"));
        assert!(!trace.is_simulated());
    }

    #[test]
    fn test_empty_run_still_yields_a_step() {
        let trace = TraceRecorder::run(AlgorithmId::MaxArea, &GeneratorLimits::default(), |_| Ok(()));
        assert_eq!(trace.len(), 1);
        assert_eq!(trace.terminal().kind, StepKind::Done);
    }

    #[test]
    fn test_ensure_budget() {
        let recorder = TraceRecorder::new(AlgorithmId::PrimeSieve, &GeneratorLimits::with_max_steps(10));
        assert!(recorder.ensure_budget(10).is_ok());
        assert_eq!(
            recorder.ensure_budget(11),
            Err(GeneratorError::GenerationOverflow { limit: 10, required: 11 })
        );
    }
}
