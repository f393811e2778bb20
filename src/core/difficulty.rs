//! Difficulty tiers and generation modes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Intended challenge level of a single group
///
/// Ordered from easiest to hardest; the ordering is also the order in which
/// mixed-mode generation tries to fill one slot per tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    /// All tiers, easiest first
    pub const ALL: [Self; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Expert];

    /// Lowercase identifier used on the wire and on the command line
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Expert => "expert",
        }
    }

    /// Human-readable tier name
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::Expert => "Expert",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for unrecognized difficulty or mode names
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty '{0}'; expected one of: mixed, easy, medium, hard, expert")]
pub struct ParseDifficultyError(pub String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            "expert" => Ok(Self::Expert),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}

/// Which groups a generated puzzle draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DifficultyMode {
    /// One group per tier when possible
    #[default]
    Mixed,
    /// All four groups from a single tier
    Tier(Difficulty),
}

impl DifficultyMode {
    /// Every selectable mode, in menu order
    pub const ALL: [Self; 5] = [
        Self::Mixed,
        Self::Tier(Difficulty::Easy),
        Self::Tier(Difficulty::Medium),
        Self::Tier(Difficulty::Hard),
        Self::Tier(Difficulty::Expert),
    ];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Mixed => "Mixed",
            Self::Tier(tier) => tier.display_name(),
        }
    }
}

impl fmt::Display for DifficultyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mixed => f.write_str("mixed"),
            Self::Tier(tier) => write!(f, "{tier}"),
        }
    }
}

impl FromStr for DifficultyMode {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("mixed") {
            return Ok(Self::Mixed);
        }
        s.parse::<Difficulty>().map(Self::Tier)
    }
}

impl TryFrom<String> for DifficultyMode {
    type Error = ParseDifficultyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DifficultyMode> for String {
    fn from(mode: DifficultyMode) -> Self {
        mode.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_ordering_is_easiest_first() {
        let mut tiers = vec![Difficulty::Expert, Difficulty::Easy, Difficulty::Hard, Difficulty::Medium];
        tiers.sort();
        assert_eq!(tiers, Difficulty::ALL.to_vec());
    }

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!(" easy ".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert!("impossible".parse::<Difficulty>().is_err());
    }

    #[test]
    fn mode_parses_mixed_and_tiers() {
        assert_eq!("mixed".parse::<DifficultyMode>(), Ok(DifficultyMode::Mixed));
        assert_eq!(
            "expert".parse::<DifficultyMode>(),
            Ok(DifficultyMode::Tier(Difficulty::Expert))
        );
        assert!("".parse::<DifficultyMode>().is_err());
    }

    #[test]
    fn mode_display_round_trips_through_parse() {
        for mode in DifficultyMode::ALL {
            assert_eq!(mode.to_string().parse::<DifficultyMode>(), Ok(mode));
        }
    }

    #[test]
    fn mode_deserializes_from_plain_string() {
        let mode: DifficultyMode = serde_json::from_str("\"hard\"").unwrap();
        assert_eq!(mode, DifficultyMode::Tier(Difficulty::Hard));
        assert!(serde_json::from_str::<DifficultyMode>("\"brutal\"").is_err());
    }

    #[test]
    fn difficulty_serializes_lowercase() {
        let json = serde_json::to_string(&Difficulty::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
    }
}
