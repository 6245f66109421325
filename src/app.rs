use rand::RngCore;
use std::time::Duration;
use tracing::debug;

use crate::clock::{Clock, MonotonicClock};
use crate::engine::{Engine, SessionHandle};
use crate::error::SessionError;
use crate::metrics::MetricsSnapshot;
use crate::runtime::TickSchedule;
use crate::session::{FinalReport, Session, SessionConfig};
use crate::vocabulary::Vocabulary;

/// Spacing of the speed samples that feed the results chart.
pub const SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Typing,
    Results,
}

/// Front-end state: the live session, the hidden input box and the sampling
/// schedule. Keys and ticks from the event loop land here.
pub struct App<C: Clock = MonotonicClock> {
    engine: Engine<C>,
    handle: SessionHandle,
    input: String,
    schedule: TickSchedule,
    snapshot: MetricsSnapshot,
    report: Option<FinalReport>,
    pub state: AppState,
}

impl<C: Clock> App<C> {
    pub fn new<R>(
        mut engine: Engine<C>,
        vocabulary: Vocabulary,
        config: SessionConfig,
        rng: R,
    ) -> Result<Self, SessionError>
    where
        R: RngCore + Send + 'static,
    {
        let handle = engine.create_session(vocabulary, config, rng)?;
        let snapshot = engine.session(handle)?.snapshot(Duration::ZERO);

        Ok(Self {
            engine,
            handle,
            input: String::new(),
            schedule: TickSchedule::new(SAMPLE_INTERVAL),
            snapshot,
            report: None,
            state: AppState::Typing,
        })
    }

    pub fn type_char(&mut self, c: char) -> Result<(), SessionError> {
        if self.state != AppState::Typing {
            return Ok(());
        }
        self.input.push(c);
        self.submit()
    }

    pub fn backspace(&mut self) -> Result<(), SessionError> {
        if self.state != AppState::Typing || self.input.pop().is_none() {
            return Ok(());
        }
        self.submit()
    }

    /// Called on every wake-up of the event loop; samples when an interval
    /// has passed and ends the session once its time is up.
    pub fn on_tick(&mut self) -> Result<(), SessionError> {
        if self.state != AppState::Typing {
            return Ok(());
        }
        let now = self.engine.clock().now();
        let session = self.engine.session(self.handle)?;
        if !session.has_started() {
            return Ok(());
        }

        let duration = session.config().number_of_secs;
        let due = if session.elapsed_secs(now) >= duration {
            Some(duration)
        } else {
            self.schedule.due(now)
        };
        let Some(at) = due else {
            self.snapshot = session.snapshot(now);
            return Ok(());
        };

        let outcome = self.engine.tick(self.handle, at)?;
        self.snapshot = outcome.snapshot;
        if outcome.finished {
            self.finish()?;
        }
        Ok(())
    }

    /// Throws the current attempt away and starts over with fresh words.
    pub fn restart(&mut self) -> Result<(), SessionError> {
        self.schedule.stop();
        self.handle = self.engine.reset(self.handle)?;
        self.input.clear();
        self.report = None;
        self.snapshot = self.session()?.snapshot(Duration::ZERO);
        self.state = AppState::Typing;
        Ok(())
    }

    fn submit(&mut self) -> Result<(), SessionError> {
        let outcome = self.engine.submit_input(self.handle, &self.input)?;
        self.snapshot = outcome.snapshot;
        if outcome.word_advanced {
            self.input.clear();
        }
        if outcome.finished {
            return self.finish();
        }

        match self.engine.session(self.handle)?.started_at() {
            Some(started_at) => self.schedule.start(started_at),
            // whitespace before the first word
            None => self.input.clear(),
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SessionError> {
        self.schedule.stop();
        let report = self.engine.finalize(self.handle)?;
        debug!(wpm = report.snapshot.wpm, "showing results");
        self.snapshot = report.snapshot;
        self.report = Some(report);
        self.state = AppState::Results;
        Ok(())
    }

    pub fn session(&self) -> Result<&Session, SessionError> {
        self.engine.session(self.handle)
    }

    pub fn handle(&self) -> SessionHandle {
        self.handle
    }

    /// Current contents of the hidden input box.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        self.snapshot
    }

    pub fn report(&self) -> Option<&FinalReport> {
        self.report.as_ref()
    }

    pub fn seconds_remaining(&self) -> f64 {
        let now = self.engine.clock().now();
        self.session()
            .map(|session| session.seconds_remaining(now))
            .unwrap_or(0.0)
    }

    pub fn is_sampling(&self) -> bool {
        self.schedule.is_running()
    }
}
