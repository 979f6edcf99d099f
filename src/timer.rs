use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::{
    display::format_ms,
    preset::{parse_preset_minutes, Preset, MS_PER_MINUTE},
    schedule::{RepeatingSchedule, TICK_INTERVAL},
    session_log::{LogEntry, SessionLog},
};

/// Remaining time removed by each tick
pub const TICK_MS: u64 = 1000;

pub const DEFAULT_DURATION_MS: u64 = Preset::DEFAULT.minutes() as u64 * MS_PER_MINUTE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum TimerStatus {
    Idle,
    Running,
    Finished,
}

/// Snapshot of the countdown fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerState {
    pub original_duration_ms: u64,
    pub remaining_ms: u64,
    pub is_running: bool,
}

impl Default for TimerState {
    fn default() -> Self {
        Self {
            original_duration_ms: DEFAULT_DURATION_MS,
            remaining_ms: DEFAULT_DURATION_MS,
            is_running: false,
        }
    }
}

/// Owns the countdown, its tick schedule and the session log.
///
/// All commands are total: a command that does not apply in the current
/// state leaves everything untouched.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    state: TimerState,
    schedule: RepeatingSchedule,
    log: SessionLog,
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerEngine {
    pub fn new() -> Self {
        Self::with_tick_interval(TICK_INTERVAL)
    }

    /// Ticks still remove [`TICK_MS`] each; only the wall-clock cadence changes
    pub fn with_tick_interval(interval: Duration) -> Self {
        Self {
            state: TimerState::default(),
            schedule: RepeatingSchedule::new(interval),
            log: SessionLog::new(),
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn remaining_ms(&self) -> u64 {
        self.state.remaining_ms
    }

    pub fn original_duration_ms(&self) -> u64 {
        self.state.original_duration_ms
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    pub fn status(&self) -> TimerStatus {
        match (self.state.is_running, self.state.remaining_ms) {
            (true, _) => TimerStatus::Running,
            (false, 0) => TimerStatus::Finished,
            (false, _) => TimerStatus::Idle,
        }
    }

    pub fn log(&self) -> &SessionLog {
        &self.log
    }

    /// Remaining time as `MM:SS`
    pub fn display(&self) -> String {
        format_ms(self.state.remaining_ms)
    }

    /// Preset whose duration matches the loaded countdown, if any
    pub fn active_preset(&self) -> Option<Preset> {
        Preset::ALL
            .into_iter()
            .find(|p| p.duration_ms() == self.state.original_duration_ms)
    }

    pub fn select_preset(&mut self, preset: Preset) {
        self.load_duration(preset.duration_ms());
        info!(preset = %preset, "preset selected");
    }

    /// Load the preset named by `label`, falling back to the default preset
    pub fn select_preset_label(&mut self, label: &str) {
        let preset = Preset::from_minutes(parse_preset_minutes(label)).unwrap_or_default();
        self.select_preset(preset);
    }

    /// Start or resume from now. Returns false if nothing changed.
    pub fn start(&mut self) -> bool {
        self.start_at(Instant::now())
    }

    pub fn start_at(&mut self, now: Instant) -> bool {
        if self.state.is_running || self.state.remaining_ms == 0 {
            return false;
        }
        self.state.original_duration_ms = self.state.remaining_ms;
        self.state.is_running = true;
        self.schedule.arm(now);
        info!(remaining = %self.display(), "timer started");
        true
    }

    /// Handle one tick. Returns the completion entry when this tick reached zero.
    pub fn tick(&mut self) -> Option<&LogEntry> {
        if !self.state.is_running {
            return None;
        }
        self.state.remaining_ms = self.state.remaining_ms.saturating_sub(TICK_MS);
        debug!(remaining = %self.display(), "tick");

        if self.state.remaining_ms > 0 {
            return None;
        }

        self.schedule.cancel();
        self.state.is_running = false;
        let planned = self.state.original_duration_ms;
        info!(planned = %format_ms(planned), "timer finished");
        self.log.append(LogEntry::new(planned, planned));
        self.log.newest()
    }

    /// Deliver every tick due at `now`. Returns how many were applied.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let due = self.schedule.take_due(now);
        let mut applied = 0;
        for _ in 0..due {
            if !self.state.is_running {
                break;
            }
            self.tick();
            applied += 1;
        }
        applied
    }

    /// How long the event loop may sleep before the next tick
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.schedule.time_until_due(now)
    }

    /// Pause and log the elapsed part. Returns the new entry, or None if not running.
    pub fn pause(&mut self) -> Option<&LogEntry> {
        if !self.state.is_running {
            return None;
        }
        self.schedule.cancel();
        self.state.is_running = false;

        let planned = self.state.original_duration_ms;
        let elapsed = planned.saturating_sub(self.state.remaining_ms);
        info!(
            elapsed = %format_ms(elapsed),
            planned = %format_ms(planned),
            "timer paused"
        );
        self.log.append(LogEntry::new(elapsed, planned));
        self.log.newest()
    }

    /// Pause if running, start otherwise
    pub fn toggle(&mut self) {
        if self.state.is_running {
            self.pause();
        } else {
            self.start();
        }
    }

    pub fn reset(&mut self) {
        self.load_duration(DEFAULT_DURATION_MS);
        info!("timer reset");
    }

    fn load_duration(&mut self, duration_ms: u64) {
        self.schedule.cancel();
        self.state = TimerState {
            original_duration_ms: duration_ms,
            remaining_ms: duration_ms,
            is_running: false,
        };
    }
}
