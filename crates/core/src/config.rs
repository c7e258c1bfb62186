//! Simulation rule configuration.
//!
//! Every policy the rule can reasonably be tuned on — tick delay, age
//! increment, what happens to fuel on a failed ignition, how far the
//! air-ignition search reaches vertically, and whether random draws use `<`
//! or `<=` — is an explicit field here rather than a hardcoded pick. Every
//! formula that mentions age is rescaled through the scale factor so
//! behavior stays comparable under a different age ceiling.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Reference age ceiling the probability formulas were tuned against.
pub const REFERENCE_MAX_AGE: u32 = 15;

/// Re-arm interval policy between successive ticks of the same fire cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickDelay {
    /// Always the same number of ticks.
    Fixed(u32),
    /// `base + uniform(0..spread)` ticks.
    Jittered { base: u32, spread: u32 },
}

impl TickDelay {
    /// Sample a concrete delay.
    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> u32 {
        match self {
            TickDelay::Fixed(delay) => delay,
            TickDelay::Jittered { base, spread } => {
                if spread == 0 {
                    base
                } else {
                    base + rng.random_range(0..spread)
                }
            }
        }
    }
}

/// How a surviving fire cell's age advances each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeIncrement {
    /// Always +1.
    Deterministic,
    /// `uniform(0..3) / 2`: +1 with probability 1/3, otherwise unchanged.
    Randomized,
}

/// What happens to a fuel block that was "affected" by direct spread but
/// failed the ignition gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailedSpread {
    /// Leave the fuel in place; it persists until actually ignited.
    LeaveFuel,
    /// Consume it outright (revert to air), modeling scorched fuel.
    ConsumeFuel,
}

/// Vertical extent of the air-ignition offset search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerticalSearch {
    /// Search only the fire cell's own plane.
    Planar,
    /// Search `below` levels down through `above` levels up.
    Column { below: u32, above: u32 },
}

impl VerticalSearch {
    /// Inclusive vertical offset range to scan.
    pub fn range(self) -> std::ops::RangeInclusive<i32> {
        match self {
            VerticalSearch::Planar => 0..=0,
            VerticalSearch::Column { below, above } => -(below as i32)..=(above as i32),
        }
    }
}

/// Boundary mode for the random spread draws.
///
/// Both boundaries are defensible and shift the odds by one part in the
/// resistance, so the comparison is configurable and applied uniformly to
/// the direct-burn and air-ignition draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawComparison {
    /// Accept when `draw < threshold`.
    Strict,
    /// Accept when `draw <= threshold`.
    Inclusive,
}

impl DrawComparison {
    /// Whether a uniform draw passes against the given threshold.
    pub fn accepts(self, draw: u32, threshold: u32) -> bool {
        match self {
            DrawComparison::Strict => draw < threshold,
            DrawComparison::Inclusive => draw <= threshold,
        }
    }
}

/// Tunable constants and policy choices for the spread rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FireRules {
    /// Age ceiling; must be a positive multiple of [`REFERENCE_MAX_AGE`].
    pub max_age: u32,
    /// Re-arm interval policy.
    pub tick_delay: TickDelay,
    /// Age advancement policy.
    pub age_increment: AgeIncrement,
    /// Failed direct-spread policy.
    pub failed_spread: FailedSpread,
    /// Whether direct spread also attacks the cells straight above and below.
    pub vertical_adjacent_spread: bool,
    /// Vertical extent of the air-ignition search.
    pub vertical_search: VerticalSearch,
    /// Boundary mode for the spread draws.
    pub draw_comparison: DrawComparison,
}

impl Default for FireRules {
    fn default() -> Self {
        FireRules {
            max_age: REFERENCE_MAX_AGE,
            tick_delay: TickDelay::Jittered {
                base: 30,
                spread: 10,
            },
            age_increment: AgeIncrement::Randomized,
            failed_spread: FailedSpread::LeaveFuel,
            vertical_adjacent_spread: true,
            vertical_search: VerticalSearch::Column { below: 1, above: 4 },
            draw_comparison: DrawComparison::Inclusive,
        }
    }
}

impl FireRules {
    /// Check the configuration for degenerate values.
    ///
    /// A `max_age` that is not a positive multiple of the reference ceiling
    /// would truncate [`FireRules::scale`] to zero and break every
    /// age-relative formula, so it is rejected up front, as is a zero tick
    /// delay (the cell would re-arm for the current tick forever).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_age == 0 || self.max_age % REFERENCE_MAX_AGE != 0 {
            return Err(ConfigError::UnscaledMaxAge {
                max_age: self.max_age,
            });
        }
        match self.tick_delay {
            // A jittered delay can sample its base, so the base itself must
            // be nonzero.
            TickDelay::Fixed(0) | TickDelay::Jittered { base: 0, .. } => {
                Err(ConfigError::ZeroTickDelay)
            }
            _ => Ok(()),
        }
    }

    /// Ratio between the configured age ceiling and the reference ceiling.
    pub fn scale(&self) -> u32 {
        self.max_age / REFERENCE_MAX_AGE
    }

    /// Age rescaled to the reference 0..=15 range.
    pub fn normalized_age(&self, age: u32) -> u32 {
        age / self.scale()
    }

    /// Advance `age` by the configured increment, clamped to the ceiling.
    ///
    /// Monotonically non-decreasing in `age` and never exceeds `max_age`.
    pub fn advance_age<R: Rng + ?Sized>(&self, age: u32, rng: &mut R) -> u32 {
        let increment = match self.age_increment {
            AgeIncrement::Deterministic => 1,
            AgeIncrement::Randomized => rng.random_range(0..3) / 2,
        };
        (age + increment).min(self.max_age)
    }
}

/// Errors rejected at engine construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `max_age` is zero or not a multiple of the reference ceiling.
    UnscaledMaxAge { max_age: u32 },
    /// The tick delay can sample to zero ticks.
    ZeroTickDelay,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::UnscaledMaxAge { max_age } => write!(
                f,
                "max_age {max_age} is not a positive multiple of {REFERENCE_MAX_AGE}"
            ),
            ConfigError::ZeroTickDelay => write!(f, "tick delay must be at least one tick"),
        }
    }
}

impl std::error::Error for ConfigError {}
