//! Parish enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Parishes a registrant may belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Parish {
    /// 1 교구
    #[serde(rename = "1 교구")]
    First,
    /// 2 교구
    #[serde(rename = "2 교구")]
    Second,
    /// 3 교구
    #[serde(rename = "3 교구")]
    Third,
    /// 4 교구
    #[serde(rename = "4 교구")]
    Fourth,
    /// 5 교구
    #[serde(rename = "5 교구")]
    Fifth,
    /// 6 교구
    #[serde(rename = "6 교구")]
    Sixth,
    /// 7 교구
    #[serde(rename = "7 교구")]
    Seventh,
    /// 8 교구
    #[serde(rename = "8 교구")]
    Eighth,
    /// 9 교구
    #[serde(rename = "9 교구")]
    Ninth,
    /// 다음세대 (next generation)
    #[serde(rename = "다음세대")]
    NextGeneration,
    /// 기타 (other)
    #[serde(rename = "기타")]
    Other,
}

impl Parish {
    /// Every parish in display order.
    pub const ALL: [Parish; 11] = [
        Self::First,
        Self::Second,
        Self::Third,
        Self::Fourth,
        Self::Fifth,
        Self::Sixth,
        Self::Seventh,
        Self::Eighth,
        Self::Ninth,
        Self::NextGeneration,
        Self::Other,
    ];

    /// Return the stored label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::First => "1 교구",
            Self::Second => "2 교구",
            Self::Third => "3 교구",
            Self::Fourth => "4 교구",
            Self::Fifth => "5 교구",
            Self::Sixth => "6 교구",
            Self::Seventh => "7 교구",
            Self::Eighth => "8 교구",
            Self::Ninth => "9 교구",
            Self::NextGeneration => "다음세대",
            Self::Other => "기타",
        }
    }
}

impl fmt::Display for Parish {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Parish {
    type Err = prayerhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s.trim())
            .ok_or_else(|| prayerhub_core::AppError::validation(format!("Unknown parish: '{s}'")))
    }
}
