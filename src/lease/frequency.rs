use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::LeaseError;

/// Billing recurrence unit of a lease.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Minute,
    Hour,
    Day,
    Week,
    #[default]
    Month,
    Year,
}

impl Frequency {
    pub const ALL: [Frequency; 6] = [
        Frequency::Minute,
        Frequency::Hour,
        Frequency::Day,
        Frequency::Week,
        Frequency::Month,
        Frequency::Year,
    ];

    /// Wire value, as the backend stores it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Minute => "minute",
            Frequency::Hour => "hour",
            Frequency::Day => "day",
            Frequency::Week => "week",
            Frequency::Month => "month",
            Frequency::Year => "year",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = LeaseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Frequency::ALL
            .into_iter()
            .find(|frequency| frequency.as_str() == normalized)
            .ok_or_else(|| LeaseError::UnsupportedFrequency(value.trim().to_string()))
    }
}
