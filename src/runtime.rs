use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};
use tracing::{debug, trace};

/// What the event loop reacts to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypingEvent {
    Key(KeyEvent),
    Resize,
    /// Nothing arrived within the poll interval.
    Tick,
}

impl TypingEvent {
    /// Key releases, mouse, focus and paste events are dropped.
    fn from_terminal(event: CtEvent) -> Option<Self> {
        match event {
            CtEvent::Key(key) if key.kind != KeyEventKind::Release => Some(Self::Key(key)),
            CtEvent::Resize(_, _) => Some(Self::Resize),
            _ => None,
        }
    }
}

pub trait EventSource {
    /// Waits up to `timeout`; `None` when nothing arrived or the source is gone.
    fn next_event(&self, timeout: Duration) -> Option<TypingEvent>;
}

/// Events delivered over a channel, either from the terminal reader thread
/// or pushed directly by a test.
pub struct ChannelEventSource {
    rx: Receiver<TypingEvent>,
}

impl ChannelEventSource {
    pub fn new(rx: Receiver<TypingEvent>) -> Self {
        Self { rx }
    }

    /// Spawns a thread that forwards terminal input until the receiver is dropped.
    pub fn terminal() -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || forward_terminal_events(&tx));
        Self::new(rx)
    }
}

fn forward_terminal_events(tx: &Sender<TypingEvent>) {
    loop {
        let event = match event::read() {
            Ok(event) => event,
            Err(err) => {
                debug!(%err, "terminal event reader stopped");
                return;
            }
        };
        let Some(event) = TypingEvent::from_terminal(event) else {
            continue;
        };
        if tx.send(event).is_err() {
            return;
        }
    }
}

impl EventSource for ChannelEventSource {
    fn next_event(&self, timeout: Duration) -> Option<TypingEvent> {
        match self.rx.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}

/// Pulls one event at a time, turning quiet periods into ticks.
pub struct Runner<E: EventSource> {
    source: E,
    poll_interval: Duration,
}

impl<E: EventSource> Runner<E> {
    pub fn new(source: E, poll_interval: Duration) -> Self {
        Self {
            source,
            poll_interval,
        }
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn step(&self) -> TypingEvent {
        self.source
            .next_event(self.poll_interval)
            .unwrap_or(TypingEvent::Tick)
    }
}

/// Decides when a running session is due for its next sample.
///
/// The runner wakes up far more often than samples are taken; `due` turns a
/// clock reading into at most one sample time per elapsed interval.
#[derive(Debug, Clone, PartialEq)]
pub struct TickSchedule {
    interval: Duration,
    started_at: Option<Duration>,
    next_due: Duration,
}

impl TickSchedule {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            started_at: None,
            next_due: interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Starts counting at `now`. Restarting an already running schedule is ignored.
    pub fn start(&mut self, now: Duration) {
        if self.started_at.is_some() {
            return;
        }
        self.started_at = Some(now);
        self.next_due = self.interval;
        debug!(interval_ms = self.interval.as_millis() as u64, "tick schedule started");
    }

    /// Safe to call any number of times.
    pub fn stop(&mut self) {
        if self.started_at.take().is_some() {
            debug!("tick schedule stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Returns the elapsed seconds of the sample due at `now`, if any.
    ///
    /// Samples land on whole multiples of the interval. When several intervals
    /// were missed only the latest one is reported.
    pub fn due(&mut self, now: Duration) -> Option<f64> {
        let started_at = self.started_at?;
        if self.interval.is_zero() {
            return None;
        }
        let elapsed = now.saturating_sub(started_at);
        if elapsed < self.next_due {
            return None;
        }

        let periods = elapsed.as_nanos() / self.interval.as_nanos();
        let at = self.interval.as_secs_f64() * periods as f64;
        self.next_due = self.interval * (periods as u32 + 1);
        trace!(at, "tick due");
        Some(at)
    }
}
