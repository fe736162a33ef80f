//! Sliding-window scans driven by frequency maps
//!
//! The right bound moves over one character per `expand` step; the left bound
//! then releases characters one `contract` step at a time while the window's
//! condition calls for it. A window only replaces the best one when it is
//! strictly better, so ties keep the earliest window found.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{AlgorithmId, GeneratorError, StepGenerator};
use crate::data_structures::frequency::FrequencyMap;
use crate::execution::step::{Snapshot, StepKind, WindowSnapshot, WindowSpan};
use crate::execution::tracer::TraceRecorder;

/// Shared, read-only view of the scanned text
struct Text {
    source: Arc<str>,
    chars: Vec<char>,
}

impl Text {
    fn new(s: &str) -> Self {
        Self {
            source: s.into(),
            chars: s.chars().collect(),
        }
    }

    fn slice(&self, start: usize, end: usize) -> String {
        self.chars[start..end].iter().collect()
    }

    fn span(&self, start: usize, end: usize) -> WindowSpan {
        WindowSpan {
            start,
            len: end - start,
            text: self.slice(start, end),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn snapshot(
        &self,
        start: usize,
        end: usize,
        counts: &FrequencyMap<char>,
        requirement: &BTreeMap<char, usize>,
        satisfied: usize,
        valid: bool,
        best: &Option<WindowSpan>,
    ) -> Snapshot {
        Snapshot::Window(WindowSnapshot {
            source: Arc::clone(&self.source),
            start,
            end,
            window: self.slice(start, end),
            counts: counts.to_map(),
            requirement: requirement.clone(),
            satisfied,
            valid,
            best: best.clone(),
        })
    }
}

/// Longest Substring Without Repeating Characters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LongestUniqueSubstring {
    pub text: String,
}

impl StepGenerator for LongestUniqueSubstring {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::LongestUniqueSubstring
    }

    fn record(&self, recorder: &mut TraceRecorder) -> Result<(), GeneratorError> {
        let text = Text::new(&self.text);
        let none = BTreeMap::new();
        let mut counts = FrequencyMap::new();
        let mut best: Option<WindowSpan> = None;
        let mut start = 0;

        for end in 0..text.chars.len() {
            let c = text.chars[end];
            counts.increment(c);

            let valid = counts.count(c) == 1;
            let improved = valid && best.as_ref().map_or(true, |b| end + 1 - start > b.len);
            if improved {
                best = Some(text.span(start, end + 1));
            }
            recorder.record(
                StepKind::Expand,
                text.snapshot(start, end + 1, &counts, &none, 0, valid, &best),
                if valid {
                    format!("Add '{c}'. The window \"{}\" has no repeats.", text.slice(start, end + 1))
                } else {
                    format!("Add '{c}'. '{c}' now appears twice, so the window must shrink.")
                },
            )?;
            if improved {
                recorder.mark_last_best();
            }

            while counts.count(c) > 1 {
                let dropped = text.chars[start];
                counts.decrement(dropped);
                start += 1;

                let valid = counts.count(c) == 1;
                let improved = valid && best.as_ref().map_or(true, |b| end + 1 - start > b.len);
                if improved {
                    best = Some(text.span(start, end + 1));
                }
                recorder.record(
                    StepKind::Contract,
                    text.snapshot(start, end + 1, &counts, &none, 0, valid, &best),
                    format!("Drop '{dropped}' from the left."),
                )?;
                if improved {
                    recorder.mark_last_best();
                }
            }
        }

        let end = text.chars.len();
        recorder.record(
            StepKind::Done,
            text.snapshot(start, end, &counts, &none, 0, true, &best),
            match &best {
                Some(b) => format!("The longest substring without repeats is \"{}\" (length {}).", b.text, b.len),
                None => "The text is empty, so the longest substring has length 0.".to_string(),
            },
        )?;
        Ok(())
    }
}

/// Minimum Window Substring
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimumWindowSubstring {
    pub source: String,
    pub pattern: String,
}

impl StepGenerator for MinimumWindowSubstring {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::MinimumWindowSubstring
    }

    fn record(&self, recorder: &mut TraceRecorder) -> Result<(), GeneratorError> {
        let text = Text::new(&self.source);
        let need: FrequencyMap<char> = self.pattern.chars().collect();

        if need.total() > text.chars.len() {
            return Err(GeneratorError::invalid(format!(
                "the pattern has {} characters but the source only has {}",
                need.total(),
                text.chars.len()
            )));
        }

        let requirement = need.to_map();
        let required = need.distinct();
        let mut have = FrequencyMap::new();
        let mut best: Option<WindowSpan> = None;

        if required == 0 {
            recorder.record(
                StepKind::Done,
                text.snapshot(0, 0, &have, &requirement, 0, true, &best),
                "The pattern is empty, so the empty window already covers it.",
            )?;
            return Ok(());
        }

        let mut satisfied = 0;
        let mut start = 0;

        for end in 0..text.chars.len() {
            let c = text.chars[end];
            let wanted = need.count(c);
            if have.increment(c) == wanted && wanted > 0 {
                satisfied += 1;
            }

            let mut valid = satisfied == required;
            let improved = valid && best.as_ref().map_or(true, |b| end + 1 - start < b.len);
            if improved {
                best = Some(text.span(start, end + 1));
            }
            recorder.record(
                StepKind::Expand,
                text.snapshot(start, end + 1, &have, &requirement, satisfied, valid, &best),
                match (wanted > 0, valid) {
                    (_, true) => format!(
                        "Add '{c}'. The window \"{}\" now covers the pattern.",
                        text.slice(start, end + 1)
                    ),
                    (true, false) => format!("Add '{c}', which the pattern needs. {satisfied} of {required} satisfied."),
                    (false, false) => format!("Add '{c}', which the pattern does not need."),
                },
            )?;
            if improved {
                recorder.mark_last_best();
            }

            while valid {
                let dropped = text.chars[start];
                let wanted = need.count(dropped);
                if have.decrement(dropped) < wanted {
                    satisfied -= 1;
                }
                start += 1;

                valid = satisfied == required;
                let improved = valid && best.as_ref().map_or(true, |b| end + 1 - start < b.len);
                if improved {
                    best = Some(text.span(start, end + 1));
                }
                recorder.record(
                    StepKind::Contract,
                    text.snapshot(start, end + 1, &have, &requirement, satisfied, valid, &best),
                    if valid {
                        format!(
                            "Drop '{dropped}'. \"{}\" still covers the pattern.",
                            text.slice(start, end + 1)
                        )
                    } else {
                        format!("Drop '{dropped}'. The window no longer covers the pattern.")
                    },
                )?;
                if improved {
                    recorder.mark_last_best();
                }
            }
        }

        let end = text.chars.len();
        recorder.record(
            StepKind::Done,
            text.snapshot(start, end, &have, &requirement, satisfied, satisfied == required, &best),
            match &best {
                Some(b) => format!("The minimum window is \"{}\" (length {}).", b.text, b.len),
                None => "No window covers the pattern.".to_string(),
            },
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorLimits;
    use crate::execution::step::{StepTrace, TraceOutcome};

    fn window(trace: &StepTrace, index: usize) -> &WindowSnapshot {
        match &trace.steps()[index].snapshot {
            Snapshot::Window(w) => w,
            other => panic!("unexpected snapshot {other:?}"),
        }
    }

    #[test]
    fn test_longest_unique_abcabcbb() {
        let trace = LongestUniqueSubstring {
            text: "abcabcbb".to_string(),
        }
        .generate(&GeneratorLimits::default());

        let done = window(&trace, trace.last_index());
        assert_eq!(trace.terminal().kind, StepKind::Done);
        assert_eq!(done.best.as_ref().unwrap().len, 3);
        assert_eq!(done.best.as_ref().unwrap().text, "abc");

        let expands = trace.iter().filter(|s| s.kind == StepKind::Expand).count();
        assert_eq!(expands, 8);
        assert_eq!(trace.best_step().unwrap().index, 2);
    }

    #[test]
    fn test_longest_unique_empty_text() {
        let trace = LongestUniqueSubstring { text: String::new() }.generate(&GeneratorLimits::default());
        assert_eq!(trace.len(), 1);
        assert!(window(&trace, 0).best.is_none());
    }

    #[test]
    fn test_longest_unique_counts_chars_not_bytes() {
        let trace = LongestUniqueSubstring {
            text: "héé".to_string(),
        }
        .generate(&GeneratorLimits::default());
        let done = window(&trace, trace.last_index());
        assert_eq!(done.best.as_ref().unwrap().text, "hé");
    }

    #[test]
    fn test_minimum_window_single_best() {
        let trace = MinimumWindowSubstring {
            source: "ADOBECODEBANC".to_string(),
            pattern: "ABC".to_string(),
        }
        .generate(&GeneratorLimits::default());

        let best: Vec<_> = trace.iter().filter(|s| s.is_best).collect();
        assert_eq!(best.len(), 1);
        let snapshot = window(&trace, best[0].index);
        assert_eq!(snapshot.window, "BANC");
        assert_eq!(snapshot.window.len(), 4);
        assert!(snapshot.valid);

        let expands = trace.iter().filter(|s| s.kind == StepKind::Expand).count();
        assert_eq!(expands, 13);
        assert_eq!(window(&trace, trace.last_index()).best.as_ref().unwrap().text, "BANC");
    }

    #[test]
    fn test_minimum_window_respects_multiplicity() {
        let trace = MinimumWindowSubstring {
            source: "aa".to_string(),
            pattern: "aa".to_string(),
        }
        .generate(&GeneratorLimits::default());
        assert_eq!(window(&trace, trace.last_index()).best.as_ref().unwrap().text, "aa");

        let trace = MinimumWindowSubstring {
            source: "ab".to_string(),
            pattern: "aa".to_string(),
        }
        .generate(&GeneratorLimits::default());
        assert!(window(&trace, trace.last_index()).best.is_none());
    }

    #[test]
    fn test_pattern_longer_than_source_is_invalid() {
        let trace = MinimumWindowSubstring {
            source: "a".to_string(),
            pattern: "aa".to_string(),
        }
        .generate(&GeneratorLimits::default());
        assert_eq!(trace.len(), 1);
        assert!(matches!(trace.outcome(), TraceOutcome::InvalidInput { .. }));
    }

    #[test]
    fn test_empty_pattern_is_trivial() {
        let trace = MinimumWindowSubstring {
            source: "abc".to_string(),
            pattern: String::new(),
        }
        .generate(&GeneratorLimits::default());
        assert_eq!(trace.len(), 1);
        assert_eq!(trace.terminal().kind, StepKind::Done);
    }
}
