//! Zoom granularity of the timeline.
//!
//! Variants are declared from finest to coarsest, so the derived ordering
//! reads as "wider window": `Scale::Day < Scale::Prehistoric`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scale {
    Day,
    Month,
    Year,
    Decade,
    Century,
    Millennium,
    Era,
    Prehistoric,
}

impl Scale {
    /// All scales, finest first.
    pub const ALL: [Scale; 8] = [
        Scale::Day,
        Scale::Month,
        Scale::Year,
        Scale::Decade,
        Scale::Century,
        Scale::Millennium,
        Scale::Era,
        Scale::Prehistoric,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Month => "month",
            Self::Year => "year",
            Self::Decade => "decade",
            Self::Century => "century",
            Self::Millennium => "millennium",
            Self::Era => "era",
            Self::Prehistoric => "prehistoric",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    /// One step toward finer granularity. Stays at `Day`.
    pub fn zoom_in(self) -> Self {
        match self.index() {
            0 => self,
            i => Self::ALL[i - 1],
        }
    }

    /// One step toward coarser granularity. Stays at `Prehistoric`.
    pub fn zoom_out(self) -> Self {
        Self::ALL.get(self.index() + 1).copied().unwrap_or(self)
    }

    pub fn is_finest(self) -> bool {
        self == Self::Day
    }

    pub fn is_coarsest(self) -> bool {
        self == Self::Prehistoric
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::Year
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scale {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|scale| scale.as_str() == lower)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "scale".to_string(),
                message: format!("unknown scale '{s}'"),
            })
    }
}
