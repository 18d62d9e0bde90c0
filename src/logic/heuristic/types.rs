//! Level Types
//!
//! Data structures only.

use serde::{Deserialize, Serialize};

/// Ordinal level produced by the heuristic (Low < Medium < High)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    Medium,
    High,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Low => "low",
            Level::Medium => "medium",
            Level::High => "high",
        }
    }

    pub fn severity(&self) -> u8 {
        match self {
            Level::Low => 0,
            Level::Medium => 1,
            Level::High => 2,
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_order() {
        assert!(Level::Low < Level::Medium);
        assert!(Level::Medium < Level::High);
        assert_eq!(Level::High.severity(), 2);
        assert_eq!(Level::Medium.to_string(), "medium");
    }

    #[test]
    fn test_level_serde() {
        assert_eq!(serde_json::to_string(&Level::High).unwrap(), "\"high\"");
        let parsed: Level = serde_json::from_str("\"low\"").unwrap();
        assert_eq!(parsed, Level::Low);
    }
}
