//! Building levels.
//!
//! Floors are a partition attribute on nodes. The search code never
//! special-cases them; the only floor-aware logic lives in graph validation
//! (connector edges must change floor) and the A\* heuristic (each level
//! change costs at least the cheapest connector per level).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One level of the building, ordered from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Floor {
    #[serde(rename = "L2")]
    L2,
    #[serde(rename = "L1")]
    L1,
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
}

impl Floor {
    /// All floors in elevation order.
    pub const ALL: [Self; 5] = [Self::L2, Self::L1, Self::One, Self::Two, Self::Three];

    /// Zero-based elevation rank.
    #[must_use]
    pub const fn rank(self) -> usize {
        match self {
            Self::L2 => 0,
            Self::L1 => 1,
            Self::One => 2,
            Self::Two => 3,
            Self::Three => 4,
        }
    }

    /// Label used in exports and on the floor selector.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::L2 => "L2",
            Self::L1 => "L1",
            Self::One => "1",
            Self::Two => "2",
            Self::Three => "3",
        }
    }

    /// Number of level changes needed to go from `self` to `other`.
    #[must_use]
    pub const fn levels_between(self, other: Self) -> usize {
        self.rank().abs_diff(other.rank())
    }

    /// The floor above, wrapping from the top floor to the lowest.
    #[must_use]
    pub const fn next(self) -> Self {
        Self::ALL[(self.rank() + 1) % Self::ALL.len()]
    }

    /// The floor below, wrapping from the lowest floor to the top.
    #[must_use]
    pub const fn prev(self) -> Self {
        Self::ALL[(self.rank() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Floor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a floor label is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown floor {0:?}: expected one of L2, L1, 1, 2, 3")]
pub struct ParseFloorError(String);

impl FromStr for Floor {
    type Err = ParseFloorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L2" => Ok(Self::L2),
            "L1" => Ok(Self::L1),
            "1" | "ONE" => Ok(Self::One),
            "2" | "TWO" => Ok(Self::Two),
            "3" | "THREE" => Ok(Self::Three),
            _ => Err(ParseFloorError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_follows_elevation() {
        assert!(Floor::L2 < Floor::L1);
        assert!(Floor::L1 < Floor::One);
        assert!(Floor::Two < Floor::Three);
    }

    #[test]
    fn levels_between_is_symmetric() {
        assert_eq!(Floor::L1.levels_between(Floor::Three), 3);
        assert_eq!(Floor::Three.levels_between(Floor::L1), 3);
        assert_eq!(Floor::Two.levels_between(Floor::Two), 0);
    }

    #[test]
    fn selector_cycles_wrap() {
        assert_eq!(Floor::Three.next(), Floor::L2);
        assert_eq!(Floor::L2.prev(), Floor::Three);
        assert_eq!(Floor::One.next(), Floor::Two);
        for floor in Floor::ALL {
            assert_eq!(floor.next().prev(), floor);
        }
    }

    #[test]
    fn parse_and_display_agree() {
        for floor in Floor::ALL {
            let parsed: Floor = floor.to_string().parse().expect("label parses");
            assert_eq!(parsed, floor);
        }
        assert_eq!("l1".parse::<Floor>(), Ok(Floor::L1));
        assert!("4".parse::<Floor>().is_err());
    }

    #[test]
    fn serde_uses_labels() {
        let json = serde_json::to_string(&Floor::One).expect("serialize");
        assert_eq!(json, "\"1\"");
        let back: Floor = serde_json::from_str("\"L2\"").expect("deserialize");
        assert_eq!(back, Floor::L2);
    }
}
