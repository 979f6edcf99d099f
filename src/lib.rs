// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod display;
pub mod logging;
pub mod preset;
pub mod runtime;
pub mod schedule;
pub mod session_log;
pub mod timer;

pub use preset::{parse_preset_minutes, Preset, PresetError};
pub use session_log::{LogEntry, SessionLog};
pub use timer::{TimerEngine, TimerState, TimerStatus};
