use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

/// How long the loop idles when no tick is scheduled
pub const IDLE_POLL: Duration = Duration::from_millis(250);

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum TimerEvent {
    Key(KeyEvent),
    Resize,
    /// The wait expired; scheduled ticks may be due
    Tick,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait TimerEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<TimerEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<TimerEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let forwarded = match event::read() {
                // key release/repeat reports would double every command on some terminals
                Ok(CtEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                    tx.send(TimerEvent::Key(key))
                }
                Ok(CtEvent::Resize(_, _)) => tx.send(TimerEvent::Resize),
                Ok(_) => Ok(()),
                Err(err) => {
                    tracing::warn!(%err, "terminal event reader stopped");
                    break;
                }
            };
            if forwarded.is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TimerEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Channel-backed event source for tests
pub struct TestEventSource {
    rx: Receiver<TimerEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<TimerEvent>) -> Self {
        Self { rx }
    }
}

impl TimerEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TimerEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the application one event/tick at a time
pub struct Runner<E: TimerEventSource> {
    event_source: E,
    idle_poll: Duration,
}

impl<E: TimerEventSource> Runner<E> {
    pub fn new(event_source: E) -> Self {
        Self::with_idle_poll(event_source, IDLE_POLL)
    }

    pub fn with_idle_poll(event_source: E, idle_poll: Duration) -> Self {
        Self {
            event_source,
            idle_poll,
        }
    }

    /// Blocks until the next event, or returns Tick once `until_tick` (or the
    /// idle poll when nothing is scheduled) has passed.
    pub fn step(&self, until_tick: Option<Duration>) -> TimerEvent {
        let timeout = until_tick.map_or(self.idle_poll, |d| d.min(self.idle_poll));
        match self.event_source.recv_timeout(timeout) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) => TimerEvent::Tick,
            Err(RecvTimeoutError::Disconnected) => {
                // no input will ever arrive; keep ticks on schedule without spinning
                std::thread::sleep(timeout);
                TimerEvent::Tick
            }
        }
    }
}
