use embassy_time::Duration;

use crate::LightColor;

/// A color and how long it stays lit.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phase {
    pub color: LightColor,
    pub duration: Duration,
}

impl Phase {
    pub const fn from_millis(color: LightColor, millis: u64) -> Self {
        Self {
            color,
            duration: Duration::from_millis(millis),
        }
    }
}

/// The built-in schedule: 5s green, 1s yellow, 2s red.
pub const DEFAULT_PHASES: [Phase; 3] = [
    Phase::from_millis(LightColor::Green, 5000),
    Phase::from_millis(LightColor::Yellow, 1000),
    Phase::from_millis(LightColor::Red, 2000),
];

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceError {
    /// The table has no phases.
    Empty,
    /// The phase at `index` has a zero duration.
    ZeroDuration { index: usize },
}

impl core::fmt::Display for SequenceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Empty => f.write_str("sequence has no phases"),
            Self::ZeroDuration { index } => write!(f, "phase {index} has a zero duration"),
        }
    }
}

/// An ordered, non-empty table of phases with positive durations.
///
/// Read-only once built. Indices handed out by [`crate::Cycle`] are always in
/// range, so lookups by the driver cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sequence<'s> {
    phases: &'s [Phase],
}

#[allow(clippy::len_without_is_empty)]
impl<'s> Sequence<'s> {
    pub fn new(phases: &'s [Phase]) -> Result<Self, SequenceError> {
        if phases.is_empty() {
            return Err(SequenceError::Empty);
        }
        if let Some(index) = phases.iter().position(|p| p.duration.as_ticks() == 0) {
            return Err(SequenceError::ZeroDuration { index });
        }

        Ok(Self { phases })
    }

    pub const fn standard() -> Sequence<'static> {
        Sequence {
            phases: &DEFAULT_PHASES,
        }
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn get(&self, index: usize) -> Option<&'s Phase> {
        self.phases.get(index)
    }

    pub fn iter(&self) -> core::slice::Iter<'s, Phase> {
        self.phases.iter()
    }

    /// Time taken by one full traversal of the table.
    pub fn period(&self) -> Duration {
        self.phases
            .iter()
            .fold(Duration::from_ticks(0), |acc, p| acc + p.duration)
    }

    pub(crate) fn phase(&self, index: usize) -> &'s Phase {
        &self.phases[index]
    }
}

impl Default for Sequence<'static> {
    fn default() -> Self {
        Self::standard()
    }
}
