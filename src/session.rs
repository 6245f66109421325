use std::time::Duration;

use tracing::debug;

use crate::diff::{diff, Classification, WordDiff};
use crate::error::{ConfigIssue, SessionError};
use crate::metrics::{consistency, AccuracyPolicy, MetricsSnapshot, SessionCounters};
use crate::time_series::{HistoryBuffer, HistorySample};

/// Commits the current word when it ends the typed fragment.
pub const WORD_SEPARATOR: char = ' ';

/// Expected spacing of scheduler ticks, used to size the history.
pub const SAMPLE_INTERVAL_SECS: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub number_of_words: usize,
    pub number_of_secs: f64,
    pub accuracy_policy: AccuracyPolicy,
}

impl SessionConfig {
    pub fn new(number_of_words: usize, number_of_secs: f64) -> Self {
        Self {
            number_of_words,
            number_of_secs,
            accuracy_policy: AccuracyPolicy::default(),
        }
    }

    pub fn with_accuracy_policy(mut self, policy: AccuracyPolicy) -> Self {
        self.accuracy_policy = policy;
        self
    }

    pub fn validate(&self) -> Result<(), SessionError> {
        if self.number_of_words == 0 {
            return Err(ConfigIssue::ZeroWordCount.into());
        }
        if !self.number_of_secs.is_finite() || self.number_of_secs <= 0.0 {
            return Err(ConfigIssue::NonPositiveDuration(self.number_of_secs).into());
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(50, 30.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Lifecycle {
    Idle,
    Active,
    Finished,
}

/// Per-character picture of one target word.
#[derive(Debug, Clone, PartialEq)]
pub struct WordResult {
    target: String,
    typed: String,
    classifications: Vec<Classification>,
    frozen: bool,
}

impl WordResult {
    fn new(target: &str) -> Self {
        Self {
            target: target.to_string(),
            typed: String::new(),
            classifications: vec![Classification::Pending; target.chars().count()],
            frozen: false,
        }
    }

    fn update(&mut self, typed: &str, word_diff: WordDiff) {
        self.typed = typed.to_string();
        self.classifications = word_diff.classifications;
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Text typed for this word, without the separator.
    pub fn typed(&self) -> &str {
        &self.typed
    }

    pub fn classifications(&self) -> &[Classification] {
        &self.classifications
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn is_correct(&self) -> bool {
        self.typed == self.target
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputOutcome {
    pub word_advanced: bool,
    pub finished: bool,
    pub snapshot: MetricsSnapshot,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    pub finished: bool,
    pub snapshot: MetricsSnapshot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FinalReport {
    pub snapshot: MetricsSnapshot,
    pub history: Vec<HistorySample>,
    /// Standard deviation of the sampled wpm, if anything was sampled.
    pub consistency: Option<f64>,
}

/// One attempt at the test: target words, typing progress, counters and history.
///
/// Time comes in from outside: keystrokes carry a clock reading, ticks carry
/// the elapsed seconds computed by the scheduler.
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    words: Vec<String>,
    results: Vec<WordResult>,
    word_index: usize,
    // slots of the current word that already had their first judgement
    judged: usize,
    counters: SessionCounters,
    history: HistoryBuffer,
    started_at: Option<Duration>,
    ended_at_secs: Option<f64>,
    lifecycle: Lifecycle,
}

impl Session {
    pub fn new(config: SessionConfig, words: Vec<String>) -> Result<Self, SessionError> {
        config.validate()?;
        if words.is_empty() {
            return Err(ConfigIssue::ZeroWordCount.into());
        }

        let results = words.iter().map(|w| WordResult::new(w)).collect();
        let history = HistoryBuffer::with_expected(config.number_of_secs, SAMPLE_INTERVAL_SECS);

        Ok(Self {
            config,
            words,
            results,
            word_index: 0,
            judged: 0,
            counters: SessionCounters::default(),
            history,
            started_at: None,
            ended_at_secs: None,
            lifecycle: Lifecycle::Idle,
        })
    }

    /// Feeds the whole current contents of the input box.
    pub fn submit_input(&mut self, raw: &str, now: Duration) -> InputOutcome {
        match self.lifecycle {
            Lifecycle::Finished => return self.input_outcome(false, now),
            Lifecycle::Idle => {
                if raw.trim_start().is_empty() {
                    return self.input_outcome(false, now);
                }
                self.start(now);
            }
            Lifecycle::Active => {
                if self.raw_elapsed(now) >= self.config.number_of_secs {
                    self.finish_by_time();
                    return self.input_outcome(false, now);
                }
            }
        }

        // anything after the first separator belongs to the next word
        let (word, separated) = match raw.trim_start().split_once(WORD_SEPARATOR) {
            Some((word, _)) => (word, true),
            None => (raw.trim_start(), false),
        };

        let index = self.word_index;
        let target = &self.words[index];
        // the last word has no separator after it
        let committed = separated
            || (index + 1 == self.words.len() && word.chars().count() >= target.chars().count());
        let word_diff = diff(target, word);
        self.judge(index, &word_diff);
        self.results[index].update(word, word_diff);

        let mut word_advanced = false;
        if committed {
            self.results[index].frozen = true;
            self.word_index += 1;
            self.judged = 0;
            word_advanced = true;
            debug!(word_index = self.word_index, "word committed");

            if self.word_index == self.words.len() {
                let elapsed = self.elapsed_secs(now);
                self.finish(elapsed);
            }
        }

        self.input_outcome(word_advanced, now)
    }

    /// Samples the metrics at `elapsed_secs` into the history.
    pub fn tick(&mut self, elapsed_secs: f64) -> TickOutcome {
        match self.lifecycle {
            Lifecycle::Idle => TickOutcome {
                finished: false,
                snapshot: self.snapshot_at(0.0),
            },
            Lifecycle::Finished => TickOutcome {
                finished: true,
                snapshot: self.final_snapshot(),
            },
            Lifecycle::Active => {
                let elapsed = if elapsed_secs.is_finite() {
                    elapsed_secs.max(0.0)
                } else {
                    0.0
                };
                if elapsed >= self.config.number_of_secs {
                    self.finish_by_time();
                    return TickOutcome {
                        finished: true,
                        snapshot: self.final_snapshot(),
                    };
                }

                let snapshot = self.snapshot_at(elapsed);
                self.history.record(elapsed, snapshot.wpm);
                TickOutcome {
                    finished: false,
                    snapshot,
                }
            }
        }
    }

    /// Ends the session now if it is still running and reports the result.
    pub fn finalize(&mut self, now: Duration) -> FinalReport {
        match self.lifecycle {
            Lifecycle::Idle => self.finish(0.0),
            Lifecycle::Active => {
                let elapsed = self.elapsed_secs(now);
                self.finish(elapsed);
            }
            Lifecycle::Finished => {}
        }
        self.report()
    }

    /// Final result of a finished session; for a running one, the state so far.
    pub fn report(&self) -> FinalReport {
        let history = self.history.samples().to_vec();
        FinalReport {
            snapshot: self.final_snapshot(),
            consistency: consistency(&history),
            history,
        }
    }

    fn start(&mut self, now: Duration) {
        self.started_at = Some(now);
        self.lifecycle = Lifecycle::Active;
        debug!(words = self.words.len(), "session started");
    }

    fn finish_by_time(&mut self) {
        if let Some(result) = self.results.get_mut(self.word_index) {
            result.frozen = true;
        }
        self.finish(self.config.number_of_secs);
    }

    fn finish(&mut self, elapsed_secs: f64) {
        self.ended_at_secs = Some(elapsed_secs);
        self.lifecycle = Lifecycle::Finished;
        if elapsed_secs > 0.0 {
            let wpm = self.snapshot_at(elapsed_secs).wpm;
            self.history.record(elapsed_secs, wpm);
        }
        debug!(
            elapsed_secs,
            word_index = self.word_index,
            samples = self.history.len(),
            "session finished"
        );
    }

    // Each slot counts once, on the first time it is typed; errors are
    // remembered per slot for as long as the session lives.
    fn judge(&mut self, word_index: usize, word_diff: &WordDiff) {
        let typed_len = word_diff.typed_len();
        for i in self.judged..typed_len {
            self.counters
                .judge(word_diff.classifications[i] == Classification::Correct);
        }
        self.judged = self.judged.max(typed_len);

        for &i in &word_diff.errors {
            self.counters.record_error(word_index, i);
        }
    }

    fn input_outcome(&self, word_advanced: bool, now: Duration) -> InputOutcome {
        InputOutcome {
            word_advanced,
            finished: self.is_finished(),
            snapshot: self.snapshot(now),
        }
    }

    fn snapshot_at(&self, elapsed_secs: f64) -> MetricsSnapshot {
        self.counters
            .snapshot(elapsed_secs, self.config.accuracy_policy)
    }

    fn final_snapshot(&self) -> MetricsSnapshot {
        self.snapshot_at(self.ended_at_secs.unwrap_or(0.0))
    }

    fn raw_elapsed(&self, now: Duration) -> f64 {
        self.started_at
            .map(|start| now.saturating_sub(start).as_secs_f64())
            .unwrap_or(0.0)
    }

    /// Seconds since the first keystroke, capped at the test duration and
    /// frozen once the session has finished.
    pub fn elapsed_secs(&self, now: Duration) -> f64 {
        match self.ended_at_secs {
            Some(ended) => ended,
            None => self.raw_elapsed(now).min(self.config.number_of_secs),
        }
    }

    pub fn seconds_remaining(&self, now: Duration) -> f64 {
        (self.config.number_of_secs - self.elapsed_secs(now)).max(0.0)
    }

    pub fn snapshot(&self, now: Duration) -> MetricsSnapshot {
        self.snapshot_at(self.elapsed_secs(now))
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn word_results(&self) -> &[WordResult] {
        &self.results
    }

    pub fn current_word_index(&self) -> usize {
        self.word_index
    }

    pub fn current_word(&self) -> Option<&str> {
        self.words.get(self.word_index).map(String::as_str)
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Clock reading of the first keystroke.
    pub fn started_at(&self) -> Option<Duration> {
        self.started_at
    }

    pub fn has_started(&self) -> bool {
        self.lifecycle != Lifecycle::Idle
    }

    pub fn is_finished(&self) -> bool {
        self.lifecycle == Lifecycle::Finished
    }

    pub fn counters(&self) -> &SessionCounters {
        &self.counters
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use Classification::*;

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    fn session(words: &[&str], number_of_secs: f64) -> Session {
        Session::new(
            SessionConfig::new(words.len(), number_of_secs),
            words.iter().map(|w| w.to_string()).collect(),
        )
        .unwrap()
    }

    #[test]
    fn new_session_is_idle() {
        let s = session(&["cat", "dog"], 30.0);

        assert_eq!(s.lifecycle(), Lifecycle::Idle);
        assert_eq!(s.current_word_index(), 0);
        assert_eq!(s.current_word(), Some("cat"));
        assert_eq!(s.counters().total_typed_chars(), 0);
        assert!(s.word_results().iter().all(|r| !r.is_frozen()));
        assert_eq!(s.snapshot(secs(5.0)).wpm, 0);
        assert_eq!(s.snapshot(secs(5.0)).accuracy, 100);
    }

    #[test]
    fn config_is_validated() {
        assert_matches!(
            Session::new(SessionConfig::new(0, 30.0), vec!["a".into()]),
            Err(SessionError::InvalidConfiguration(ConfigIssue::ZeroWordCount))
        );
        assert_matches!(
            Session::new(SessionConfig::new(1, 0.0), vec!["a".into()]),
            Err(SessionError::InvalidConfiguration(ConfigIssue::NonPositiveDuration(_)))
        );
        assert_matches!(
            Session::new(SessionConfig::new(1, f64::INFINITY), vec!["a".into()]),
            Err(SessionError::InvalidConfiguration(ConfigIssue::NonPositiveDuration(_)))
        );
        assert_matches!(
            Session::new(SessionConfig::new(1, 30.0), vec![]),
            Err(SessionError::InvalidConfiguration(ConfigIssue::ZeroWordCount))
        );
    }

    #[test]
    fn first_keystroke_starts_the_session() {
        let mut s = session(&["cat", "dog"], 30.0);

        let outcome = s.submit_input("c", secs(3.0));

        assert_eq!(s.lifecycle(), Lifecycle::Active);
        assert!(!outcome.finished);
        assert!(!outcome.word_advanced);
        assert_eq!(outcome.snapshot.elapsed_secs, 0.0);
        // Elapsed time counts from the first keystroke
        assert_eq!(s.elapsed_secs(secs(5.0)), 2.0);
    }

    #[test]
    fn whitespace_alone_does_not_start_or_commit() {
        let mut s = session(&["cat", "dog"], 30.0);

        let outcome = s.submit_input("   ", secs(1.0));

        assert_eq!(s.lifecycle(), Lifecycle::Idle);
        assert!(!outcome.word_advanced);
        assert_eq!(s.current_word_index(), 0);
    }

    #[test]
    fn typing_both_words_finishes() {
        let mut s = session(&["cat", "dog"], 30.0);
        let mut last = s.submit_input("c", secs(0.0));
        for (raw, at) in [("ca", 1.0), ("cat", 2.0), ("cat ", 3.0)] {
            last = s.submit_input(raw, secs(at));
        }
        assert!(last.word_advanced);
        assert_eq!(s.current_word_index(), 1);
        for (raw, at) in [("d", 4.0), ("do", 5.0)] {
            last = s.submit_input(raw, secs(at));
            assert!(!last.finished);
        }

        last = s.submit_input("dog", secs(6.0));
        assert!(last.word_advanced);
        assert!(last.finished);
        assert!(s.word_results()[1].is_frozen());
        assert_eq!(s.current_word_index(), 2);
        assert_eq!(s.counters().correct_chars(), 6);
        assert_eq!(s.counters().total_typed_chars(), 6);
        assert_eq!(last.snapshot.accuracy, 100);
        assert_eq!(last.snapshot.elapsed_secs, 6.0);
    }

    #[test]
    fn last_word_finishes_without_a_separator() {
        let mut s = session(&["cat", "dog"], 30.0);
        s.submit_input("c", secs(0.0));
        s.submit_input("cat ", secs(5.0));

        let outcome = s.submit_input("dog", secs(12.0));

        assert!(outcome.finished);
        assert_eq!(s.current_word_index(), 2);
        assert_eq!(outcome.snapshot.wpm, 6);
        assert_eq!(outcome.snapshot.accuracy, 100);
    }

    #[test]
    fn mistyped_last_word_finishes_at_full_length() {
        let mut s = session(&["cat", "dog"], 30.0);
        s.submit_input("cat ", secs(0.0));

        assert!(!s.submit_input("dx", secs(1.0)).finished);
        let outcome = s.submit_input("dxg", secs(2.0));

        assert!(outcome.finished);
        assert!(!s.word_results()[1].is_correct());
        assert_eq!(s.counters().error_count(), 1);
    }

    #[test]
    fn inner_separator_is_not_judged() {
        let mut s = session(&["cat", "dog", "eel"], 30.0);

        let outcome = s.submit_input("c t", secs(0.0));

        assert!(outcome.word_advanced);
        assert_eq!(s.word_results()[0].typed(), "c");
        assert_eq!(s.counters().total_typed_chars(), 1);
        assert_eq!(s.counters().correct_chars(), 1);
        assert_eq!(s.current_word_index(), 1);
    }

    #[test]
    fn separator_on_the_last_word_also_finishes() {
        let mut s = session(&["cat", "dog"], 30.0);
        s.submit_input("c", secs(0.0));
        s.submit_input("cat ", secs(5.0));

        let outcome = s.submit_input("dog ", secs(12.0));

        assert!(outcome.finished);
        assert_eq!(outcome.snapshot.wpm, 6);
        assert_eq!(outcome.snapshot.accuracy, 100);
        assert_eq!(s.counters().correct_chars(), 6);
        assert_eq!(s.counters().total_typed_chars(), 6);
    }

    #[test]
    fn mistake_is_classified_and_counted() {
        let mut s = session(&["cat", "dog"], 30.0);

        s.submit_input("c", secs(0.0));
        s.submit_input("cb", secs(0.5));
        s.submit_input("cbt", secs(1.0));

        let current = &s.word_results()[0];
        assert_eq!(current.classifications(), &[Correct, Incorrect, Correct]);
        assert_eq!(s.counters().correct_chars(), 2);
        assert_eq!(s.counters().total_typed_chars(), 3);
        assert!(s.counters().error_positions().contains(&(0, 1)));
    }

    #[test]
    fn corrections_do_not_undo_first_judgement() {
        let mut s = session(&["cat", "dog"], 30.0);

        for raw in ["c", "cx", "c", "ca", "cat"] {
            s.submit_input(raw, secs(1.0));
        }

        assert_eq!(s.counters().total_typed_chars(), 3);
        assert_eq!(s.counters().correct_chars(), 2);
        assert_eq!(s.counters().error_count(), 1);
        assert_eq!(s.word_results()[0].classifications(), &[Correct; 3]);
        assert_eq!(s.snapshot(secs(1.0)).accuracy, 67);
    }

    #[test]
    fn distinct_error_policy_sees_later_mistakes() {
        let mut s = Session::new(
            SessionConfig::new(2, 30.0).with_accuracy_policy(AccuracyPolicy::DistinctErrors),
            vec!["cat".into(), "dog".into()],
        )
        .unwrap();

        // 'a' is right first, then retyped wrong, then fixed
        for raw in ["c", "ca", "c", "cx", "c", "ca", "cat"] {
            s.submit_input(raw, secs(1.0));
        }

        assert_eq!(s.counters().correct_chars(), 3);
        assert_eq!(s.counters().error_count(), 1);
        assert_eq!(s.snapshot(secs(1.0)).accuracy, 67);
    }

    #[test]
    fn leading_whitespace_is_ignored() {
        let mut s = session(&["cat", "dog"], 30.0);

        s.submit_input("  c", secs(0.0));
        let outcome = s.submit_input("  cat", secs(1.0));

        assert!(!outcome.word_advanced);
        assert_eq!(s.word_results()[0].classifications(), &[Correct; 3]);
        assert_eq!(s.word_results()[0].typed(), "cat");
    }

    #[test]
    fn over_typing_is_incorrect_not_rejected() {
        let mut s = session(&["at", "dog"], 30.0);

        s.submit_input("a", secs(0.0));
        s.submit_input("at", secs(0.1));
        s.submit_input("atx", secs(0.2));

        assert_eq!(
            s.word_results()[0].classifications(),
            &[Correct, Correct, Incorrect]
        );
        assert_eq!(s.counters().total_typed_chars(), 3);
        assert!(s.counters().error_positions().contains(&(0, 2)));
    }

    #[test]
    fn committed_word_is_frozen() {
        let mut s = session(&["cat", "dog", "eel"], 30.0);

        s.submit_input("c", secs(0.0));
        let outcome = s.submit_input("ca ", secs(1.0));

        assert!(outcome.word_advanced);
        let first = &s.word_results()[0];
        assert!(first.is_frozen());
        assert!(!first.is_correct());
        assert_eq!(first.classifications(), &[Correct, Correct, Pending]);
        assert!(!s.word_results()[1].is_frozen());
    }

    #[test]
    fn short_last_word_does_not_finish_early() {
        let mut s = session(&["cat", "dog"], 30.0);
        s.submit_input("cat ", secs(0.0));

        let outcome = s.submit_input("do", secs(1.0));

        assert!(!outcome.finished);
        assert_eq!(s.current_word_index(), 1);
    }

    #[test]
    fn ticks_sample_history() {
        let mut s = session(&["cat", "dog", "eel"], 30.0);
        s.submit_input("c", secs(0.0));
        s.submit_input("cat ", secs(0.9));

        let first = s.tick(1.0);
        let second = s.tick(2.0);

        assert!(!first.finished);
        assert_eq!(first.snapshot.wpm, 36);
        assert_eq!(second.snapshot.wpm, 18);
        assert_eq!(
            s.history().samples(),
            &[HistorySample::new(1.0, 36), HistorySample::new(2.0, 18)]
        );
    }

    #[test]
    fn repeated_tick_is_idempotent() {
        let mut s = session(&["cat", "dog", "eel"], 30.0);
        s.submit_input("ca", secs(0.0));

        let a = s.tick(1.0);
        let b = s.tick(1.0);

        assert_eq!(a, b);
        assert_eq!(s.history().len(), 1);
    }

    #[test]
    fn tick_while_idle_is_a_no_op() {
        let mut s = session(&["cat"], 30.0);

        let outcome = s.tick(5.0);

        assert!(!outcome.finished);
        assert_eq!(s.lifecycle(), Lifecycle::Idle);
        assert!(s.history().is_empty());
    }

    #[test]
    fn duration_ends_the_session() {
        let mut s = session(&["cat", "dog", "eel"], 3.0);
        s.submit_input("c", secs(0.0));
        s.submit_input("cat ", secs(0.5));

        for t in 1..=2 {
            assert!(!s.tick(t as f64).finished);
        }
        let outcome = s.tick(3.0);

        assert!(outcome.finished);
        assert_eq!(outcome.snapshot.elapsed_secs, 3.0);
        assert_eq!(s.history().len(), 3);
        assert!(s.word_results()[1].is_frozen());
        assert_eq!(s.current_word_index(), 1);
    }

    #[test]
    fn history_count_tracks_duration() {
        let mut s = session(&["problem"; 50], 30.0);
        s.submit_input("p", secs(0.0));

        let mut t = 1.0;
        while !s.tick(t).finished {
            t += 1.0;
        }

        let samples = s.history().samples();
        assert_eq!(samples.len(), 30);
        assert!(samples.windows(2).all(|w| w[0].t < w[1].t));
    }

    #[test]
    fn input_after_duration_finishes_and_is_ignored() {
        let mut s = session(&["cat", "dog"], 10.0);
        s.submit_input("c", secs(0.0));

        let outcome = s.submit_input("ca", secs(11.0));

        assert!(outcome.finished);
        assert_eq!(s.counters().total_typed_chars(), 1);
        assert_eq!(outcome.snapshot.elapsed_secs, 10.0);
    }

    #[test]
    fn finished_session_ignores_input_and_ticks() {
        let mut s = session(&["at"], 30.0);
        s.submit_input("a", secs(0.0));
        s.submit_input("at ", secs(6.0));
        assert!(s.is_finished());
        let counters = s.counters().clone();
        let results = s.word_results().to_vec();
        let history = s.history().clone();

        let input = s.submit_input("xyz", secs(7.0));
        let tick = s.tick(8.0);

        assert!(input.finished);
        assert!(tick.finished);
        assert_eq!(s.counters(), &counters);
        assert_eq!(s.word_results(), results.as_slice());
        assert_eq!(s.history(), &history);
        assert_eq!(tick.snapshot.elapsed_secs, 6.0);
    }

    #[test]
    fn finalize_stops_a_running_session() {
        let mut s = session(&["cat", "dog"], 30.0);
        s.submit_input("c", secs(0.0));
        s.submit_input("cat ", secs(1.0));
        s.tick(1.0);
        s.tick(2.0);

        let report = s.finalize(secs(2.5));

        assert!(s.is_finished());
        assert_eq!(report.snapshot.elapsed_secs, 2.5);
        assert_eq!(report.history.len(), 3);
        assert!(report.consistency.is_some());
        // finalizing again reports the same thing
        assert_eq!(s.finalize(secs(9.0)), report);
    }

    #[test]
    fn finalize_idle_session() {
        let mut s = session(&["cat"], 30.0);

        let report = s.finalize(secs(4.0));

        assert!(s.is_finished());
        assert_eq!(report.snapshot.wpm, 0);
        assert_eq!(report.snapshot.accuracy, 100);
        assert!(report.history.is_empty());
        assert_eq!(report.consistency, None);
    }

    #[test]
    fn seconds_remaining_counts_down() {
        let mut s = session(&["cat", "dog"], 30.0);
        assert_eq!(s.seconds_remaining(secs(100.0)), 30.0);

        s.submit_input("c", secs(10.0));
        assert_eq!(s.seconds_remaining(secs(15.0)), 25.0);
        assert_eq!(s.seconds_remaining(secs(50.0)), 0.0);
    }

    #[test]
    fn counters_never_exceed_bounds() {
        let mut s = session(&["problem", "another", "course"], 60.0);
        let inputs = [
            "p", "pr", "prx", "pr", "pro", "prob", "problem", "problemm", "problem ", "a",
            "an", "anx", "anxx", "an", "ano", "another ", "c", "co", "cou",
        ];
        for (i, raw) in inputs.iter().enumerate() {
            let outcome = s.submit_input(raw, secs(i as f64));
            let counters = s.counters();
            assert!(counters.correct_chars() <= counters.total_typed_chars());
            assert!(outcome.snapshot.accuracy <= 100);
        }
    }
}
