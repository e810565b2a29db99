use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Estimated effort to implement a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Effort {
    Quick,
    Easy,
    Medium,
    Hard,
    Complex,
}

impl Effort {
    pub const ALL: [Effort; 5] = [
        Self::Quick,
        Self::Easy,
        Self::Medium,
        Self::Hard,
        Self::Complex,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Quick => "quick",
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Complex => "complex",
        }
    }
}

impl fmt::Display for Effort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Effort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| format!("'{s}' is not one of quick|easy|medium|hard|complex"))
    }
}
