//! Tracker provider enumeration.
//!
//! TorAPI routes are case-sensitive about provider names, so the
//! canonical casings live here and normalization from user input is
//! case-insensitive. Unknown names are rejected at the edge instead of
//! being passed through.

use serde::{Deserialize, Serialize};

use crate::errors::SearchError;

/// The fixed set of trackers TorAPI fronts, plus the all-of-them route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provider {
    All,
    RuTracker,
    Kinozal,
    RuTor,
    NoNameClub,
}

impl Provider {
    /// The exact path segment TorAPI expects.
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::All => "all",
            Provider::RuTracker => "RuTracker",
            Provider::Kinozal => "Kinozal",
            Provider::RuTor => "RuTor",
            Provider::NoNameClub => "NoNameClub",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Provider {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(Provider::All),
            "rutracker" => Ok(Provider::RuTracker),
            "kinozal" => Ok(Provider::Kinozal),
            "rutor" => Ok(Provider::RuTor),
            "nonameclub" => Ok(Provider::NoNameClub),
            _ => Err(SearchError::UnknownProvider {
                name: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization_is_case_insensitive() {
        for input in ["rutracker", "RUTRACKER", "RuTracker", " rutracker "] {
            assert_eq!(input.parse::<Provider>().unwrap(), Provider::RuTracker);
        }
        assert_eq!("nonameclub".parse::<Provider>().unwrap(), Provider::NoNameClub);
        assert_eq!("KINOZAL".parse::<Provider>().unwrap(), Provider::Kinozal);
    }

    #[test]
    fn test_empty_defaults_to_all() {
        assert_eq!("".parse::<Provider>().unwrap(), Provider::All);
        assert_eq!("all".parse::<Provider>().unwrap(), Provider::All);
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let err = "piratebay".parse::<Provider>().unwrap_err();
        assert!(matches!(err, SearchError::UnknownProvider { .. }));
    }

    #[test]
    fn test_canonical_casing_for_torapi() {
        assert_eq!(Provider::RuTracker.as_str(), "RuTracker");
        assert_eq!(Provider::NoNameClub.as_str(), "NoNameClub");
        assert_eq!(Provider::All.as_str(), "all");
    }
}
