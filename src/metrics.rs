use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::time_series::HistorySample;

/// Characters per standard word.
pub const CHARS_PER_WORD: f64 = 5.0;

/// How accuracy is derived from the session counters.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AccuracyPolicy {
    /// Share of typed characters that were correct the first time they were typed.
    #[default]
    FirstJudgment,
    /// One minus the share of character slots that were ever typed wrong.
    DistinctErrors,
}

/// Cumulative counts for one session. Only ever grows until the session is replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionCounters {
    correct_chars: usize,
    total_typed_chars: usize,
    error_positions: HashSet<(usize, usize)>,
}

impl SessionCounters {
    /// Records the first judgement of a character slot.
    pub fn judge(&mut self, correct: bool) {
        self.total_typed_chars += 1;
        if correct {
            self.correct_chars += 1;
        }
    }

    /// Remembers `(word_index, char_index)` as mistyped; false if already known.
    pub fn record_error(&mut self, word_index: usize, char_index: usize) -> bool {
        self.error_positions.insert((word_index, char_index))
    }

    pub fn correct_chars(&self) -> usize {
        self.correct_chars
    }

    pub fn total_typed_chars(&self) -> usize {
        self.total_typed_chars
    }

    pub fn error_count(&self) -> usize {
        self.error_positions.len()
    }

    pub fn error_positions(&self) -> &HashSet<(usize, usize)> {
        &self.error_positions
    }

    pub fn snapshot(&self, elapsed_secs: f64, policy: AccuracyPolicy) -> MetricsSnapshot {
        compute(
            self.correct_chars,
            self.total_typed_chars,
            self.error_count(),
            elapsed_secs,
            policy,
        )
    }
}

/// Point-in-time view of speed and accuracy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsSnapshot {
    pub wpm: u32,
    /// Percentage in `0..=100`.
    pub accuracy: u32,
    pub elapsed_secs: f64,
}

pub fn compute(
    correct_chars: usize,
    total_typed_chars: usize,
    error_count: usize,
    elapsed_secs: f64,
    policy: AccuracyPolicy,
) -> MetricsSnapshot {
    MetricsSnapshot {
        wpm: wpm(correct_chars, elapsed_secs),
        accuracy: accuracy(correct_chars, total_typed_chars, error_count, policy),
        elapsed_secs,
    }
}

pub fn wpm(correct_chars: usize, elapsed_secs: f64) -> u32 {
    if !elapsed_secs.is_finite() || elapsed_secs <= 0.0 {
        return 0;
    }
    let minutes = elapsed_secs / 60.0;
    ((correct_chars as f64 / CHARS_PER_WORD) / minutes).round() as u32
}

pub fn accuracy(
    correct_chars: usize,
    total_typed_chars: usize,
    error_count: usize,
    policy: AccuracyPolicy,
) -> u32 {
    if total_typed_chars == 0 {
        return 100;
    }
    let total = total_typed_chars as f64;
    let ratio = match policy {
        AccuracyPolicy::FirstJudgment => correct_chars as f64 / total,
        AccuracyPolicy::DistinctErrors => 1.0 - error_count as f64 / total,
    };
    (ratio * 100.0).round().clamp(0.0, 100.0) as u32
}

fn mean(data: &[f64]) -> Option<f64> {
    match data.len() {
        0 => None,
        count => Some(data.iter().sum::<f64>() / count as f64),
    }
}

fn std_dev(data: &[f64]) -> Option<f64> {
    let data_mean = mean(data)?;
    let variance = data
        .iter()
        .map(|value| {
            let diff = data_mean - *value;

            diff * diff
        })
        .sum::<f64>()
        / data.len() as f64;

    Some(variance.sqrt())
}

/// Standard deviation of the sampled WPM values; lower is steadier.
pub fn consistency(samples: &[HistorySample]) -> Option<f64> {
    let wpms: Vec<f64> = samples.iter().map(|s| s.wpm as f64).collect();
    std_dev(&wpms)
}

/// One-line verdict for a final speed.
pub fn remark(wpm: u32) -> &'static str {
    match wpm {
        0..=29 => "Keep practicing! You'll get better.",
        30..=49 => "Not bad, but there's room for improvement.",
        50..=69 => "Great job! You're above average.",
        70..=89 => "Impressive! You're a fast typer.",
        _ => "Excellent! You're a typing master.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wpm_is_zero_without_elapsed_time() {
        assert_eq!(wpm(100, 0.0), 0);
        assert_eq!(wpm(100, -1.0), 0);
        assert_eq!(wpm(100, f64::NAN), 0);
    }

    #[test]
    fn wpm_normalizes_to_a_minute() {
        // 6 correct chars in 12 seconds
        assert_eq!(wpm(6, 12.0), 6);
        // 300 chars in a minute
        assert_eq!(wpm(300, 60.0), 60);
        // 150 chars in 30 seconds
        assert_eq!(wpm(150, 30.0), 60);
    }

    #[test]
    fn wpm_rounds_to_nearest() {
        // (7 / 5) / (30 / 60) = 2.8
        assert_eq!(wpm(7, 30.0), 3);
        // (11 / 5) / (60 / 60) = 2.2
        assert_eq!(wpm(11, 60.0), 2);
    }

    #[test]
    fn accuracy_is_full_before_typing() {
        assert_eq!(accuracy(0, 0, 0, AccuracyPolicy::FirstJudgment), 100);
        assert_eq!(accuracy(0, 0, 0, AccuracyPolicy::DistinctErrors), 100);
    }

    #[test]
    fn first_judgment_accuracy() {
        assert_eq!(accuracy(3, 4, 1, AccuracyPolicy::FirstJudgment), 75);
        assert_eq!(accuracy(2, 3, 1, AccuracyPolicy::FirstJudgment), 67);
        assert_eq!(accuracy(0, 5, 5, AccuracyPolicy::FirstJudgment), 0);
    }

    #[test]
    fn distinct_error_accuracy() {
        // A slot typed right first and wrong later only counts against this policy
        assert_eq!(accuracy(4, 4, 1, AccuracyPolicy::DistinctErrors), 75);
        assert_eq!(accuracy(4, 4, 1, AccuracyPolicy::FirstJudgment), 100);
    }

    #[test]
    fn accuracy_is_clamped() {
        assert_eq!(accuracy(0, 2, 9, AccuracyPolicy::DistinctErrors), 0);
        assert_eq!(accuracy(9, 2, 0, AccuracyPolicy::FirstJudgment), 100);
    }

    #[test]
    fn counters_feed_snapshot() {
        let mut counters = SessionCounters::default();
        for correct in [true, true, false, true] {
            counters.judge(correct);
        }
        assert!(counters.record_error(0, 2));
        assert!(!counters.record_error(0, 2));

        let snapshot = counters.snapshot(60.0, AccuracyPolicy::FirstJudgment);
        assert_eq!(counters.correct_chars(), 3);
        assert_eq!(counters.total_typed_chars(), 4);
        assert_eq!(counters.error_count(), 1);
        assert_eq!(snapshot.wpm, 1);
        assert_eq!(snapshot.accuracy, 75);
        assert_eq!(snapshot.elapsed_secs, 60.0);
    }

    #[test]
    fn compute_is_pure() {
        let a = compute(40, 50, 10, 30.0, AccuracyPolicy::FirstJudgment);
        let b = compute(40, 50, 10, 30.0, AccuracyPolicy::FirstJudgment);

        assert_eq!(a, b);
        assert_eq!(a.wpm, 16);
        assert_eq!(a.accuracy, 80);
    }

    #[test]
    fn consistency_of_samples() {
        let samples = [
            HistorySample::new(1.0, 100),
            HistorySample::new(2.0, 120),
            HistorySample::new(3.0, 90),
            HistorySample::new(4.0, 102),
            HistorySample::new(5.0, 94),
        ];
        let sd = consistency(&samples).unwrap();

        assert!((sd - 10.322790320451151).abs() < 1e-9);
        assert_eq!(consistency(&[]), None);
        assert_eq!(consistency(&[HistorySample::new(1.0, 42)]), Some(0.0));
    }

    #[test]
    fn remarks_follow_speed_bands() {
        assert_eq!(remark(0), "Keep practicing! You'll get better.");
        assert_eq!(remark(30), "Not bad, but there's room for improvement.");
        assert_eq!(remark(69), "Great job! You're above average.");
        assert_eq!(remark(70), "Impressive! You're a fast typer.");
        assert_eq!(remark(90), "Excellent! You're a typing master.");
    }

    #[test]
    fn policy_names_are_kebab_case() {
        assert_eq!(AccuracyPolicy::FirstJudgment.to_string(), "first-judgment");
        assert_eq!(
            serde_json::to_string(&AccuracyPolicy::DistinctErrors).unwrap(),
            "\"distinct-errors\""
        );
    }
}
