use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Minutes used whenever a preset label cannot be understood
pub const DEFAULT_PRESET_MINUTES: u32 = 5;

pub const MS_PER_MINUTE: u64 = 60 * 1000;

/// One of the six fixed countdown durations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Preset {
    Three,
    Five,
    Ten,
    Fifteen,
    TwentyFive,
    Thirty,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PresetError {
    #[error("preset label is empty")]
    Empty,
    #[error("preset label {0:?} does not start with a number")]
    NotANumber(String),
    #[error("{0} minutes is not one of the preset durations")]
    Unsupported(u32),
}

impl Preset {
    /// Button order, shortest first
    pub const ALL: [Preset; 6] = [
        Preset::Three,
        Preset::Five,
        Preset::Ten,
        Preset::Fifteen,
        Preset::TwentyFive,
        Preset::Thirty,
    ];

    pub const DEFAULT: Preset = Preset::Five;

    pub const fn minutes(self) -> u32 {
        match self {
            Preset::Three => 3,
            Preset::Five => 5,
            Preset::Ten => 10,
            Preset::Fifteen => 15,
            Preset::TwentyFive => 25,
            Preset::Thirty => 30,
        }
    }

    pub fn duration_ms(self) -> u64 {
        u64::from(self.minutes()) * MS_PER_MINUTE
    }

    pub fn from_minutes(minutes: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.minutes() == minutes)
    }

    /// Zero-based position in [`Preset::ALL`], used for the key bindings and the preset row
    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|p| *p == self)
            .unwrap_or_default()
    }

    pub fn label(self) -> String {
        self.to_string()
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min", self.minutes())
    }
}

impl FromStr for Preset {
    type Err = PresetError;

    /// Accepts a bare number or a button label such as `"25 min"`; only the
    /// first whitespace-separated token is read.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.split_whitespace().next().ok_or(PresetError::Empty)?;
        let minutes: u32 = token
            .parse()
            .map_err(|_| PresetError::NotANumber(token.to_string()))?;
        Preset::from_minutes(minutes).ok_or(PresetError::Unsupported(minutes))
    }
}

/// Minutes named by `label`, or [`DEFAULT_PRESET_MINUTES`] if the label is not
/// a preset. Never fails.
pub fn parse_preset_minutes(label: &str) -> u32 {
    match label.parse::<Preset>() {
        Ok(preset) => preset.minutes(),
        Err(err) => {
            tracing::debug!(%err, label, "falling back to default preset");
            DEFAULT_PRESET_MINUTES
        }
    }
}
