use rand::RngCore;
use std::fmt;
use tracing::{info, warn};

use crate::clock::{Clock, MonotonicClock};
use crate::error::SessionError;
use crate::session::{FinalReport, InputOutcome, Session, SessionConfig, TickOutcome};
use crate::vocabulary::Vocabulary;
use crate::word_source::WordSource;

/// Names one session generation. Handles from replaced sessions are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionHandle(u64);

impl SessionHandle {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

struct LiveSession {
    handle: SessionHandle,
    session: Session,
    source: WordSource,
    rng: Box<dyn RngCore + Send>,
}

/// Owns the single live session and routes calls to it by handle.
pub struct Engine<C: Clock = MonotonicClock> {
    clock: C,
    generation: u64,
    live: Option<LiveSession>,
}

impl<C: Clock> Engine<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            generation: 0,
            live: None,
        }
    }

    /// Starts a fresh session, discarding any previous one.
    pub fn create_session<R>(
        &mut self,
        vocabulary: Vocabulary,
        config: SessionConfig,
        mut rng: R,
    ) -> Result<SessionHandle, SessionError>
    where
        R: RngCore + Send + 'static,
    {
        config.validate()?;
        let source = WordSource::new(vocabulary, config.number_of_words)?;
        let session = Session::new(config, source.generate(&mut rng))?;

        let handle = self.next_handle();
        info!(
            %handle,
            vocabulary = source.vocabulary().name(),
            words = source.count(),
            secs = session.config().number_of_secs,
            "session created"
        );
        self.live = Some(LiveSession {
            handle,
            session,
            source,
            rng: Box::new(rng),
        });
        Ok(handle)
    }

    pub fn submit_input(
        &mut self,
        handle: SessionHandle,
        raw: &str,
    ) -> Result<InputOutcome, SessionError> {
        let now = self.clock.now();
        let live = self.live_mut(handle)?;
        let outcome = live.session.submit_input(raw, now);
        if outcome.finished && outcome.word_advanced {
            info!(%handle, wpm = outcome.snapshot.wpm, "session completed all words");
        }
        Ok(outcome)
    }

    pub fn tick(
        &mut self,
        handle: SessionHandle,
        elapsed_secs: f64,
    ) -> Result<TickOutcome, SessionError> {
        let live = self.live_mut(handle)?;
        let was_finished = live.session.is_finished();
        let outcome = live.session.tick(elapsed_secs);
        if outcome.finished && !was_finished {
            info!(%handle, wpm = outcome.snapshot.wpm, "session ran out of time");
        }
        Ok(outcome)
    }

    pub fn finalize(&mut self, handle: SessionHandle) -> Result<FinalReport, SessionError> {
        let now = self.clock.now();
        let live = self.live_mut(handle)?;
        let report = live.session.finalize(now);
        info!(
            %handle,
            wpm = report.snapshot.wpm,
            accuracy = report.snapshot.accuracy,
            samples = report.history.len(),
            "session finalized"
        );
        Ok(report)
    }

    /// Replaces the session behind `handle` with a new one over fresh words.
    pub fn reset(&mut self, handle: SessionHandle) -> Result<SessionHandle, SessionError> {
        let next = SessionHandle(self.generation + 1);
        let live = self.live_mut(handle)?;

        let words = live.source.generate(&mut live.rng);
        live.session = Session::new(live.session.config().clone(), words)?;
        live.handle = next;
        self.generation = next.0;

        info!(old = %handle, new = %next, "session reset");
        Ok(next)
    }

    pub fn session(&self, handle: SessionHandle) -> Result<&Session, SessionError> {
        match self.live.as_ref() {
            Some(live) if live.handle == handle => Ok(&live.session),
            _ => Err(SessionError::StaleHandle(handle)),
        }
    }

    pub fn current_handle(&self) -> Option<SessionHandle> {
        self.live.as_ref().map(|live| live.handle)
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn next_handle(&mut self) -> SessionHandle {
        self.generation += 1;
        SessionHandle(self.generation)
    }

    fn live_mut(&mut self, handle: SessionHandle) -> Result<&mut LiveSession, SessionError> {
        match self.live.as_mut() {
            Some(live) if live.handle == handle => Ok(live),
            _ => {
                warn!(%handle, "ignoring call on stale session handle");
                Err(SessionError::StaleHandle(handle))
            }
        }
    }
}

impl Default for Engine<MonotonicClock> {
    fn default() -> Self {
        Self::new(MonotonicClock::new())
    }
}
