use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Size class of a dog, stored in the `dogs.size` column by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DogSize {
    Small,
    Medium,
    Large,
    XLarge,
}

impl DogSize {
    /// All possible size values, in display order.
    pub const ALL: &'static [DogSize] = &[Self::Small, Self::Medium, Self::Large, Self::XLarge];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "Small",
            Self::Medium => "Medium",
            Self::Large => "Large",
            Self::XLarge => "XLarge",
        }
    }
}

impl fmt::Display for DogSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for DogSize {
    fn default() -> Self {
        Self::Medium
    }
}

impl FromStr for DogSize {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("size", s, Self::ALL.iter().map(|v| v.as_str())))
    }
}

/// Where a dog currently is in the shelter's intake-to-adoption flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DogStatus {
    /// Newly arrived, not yet evaluated.
    Intake,
    /// Medical, behavioral or legal hold; not available.
    Hold,
    /// Living with a foster family.
    Fostered,
    /// Ready to be adopted.
    Adoptable,
    Adopted,
}

impl DogStatus {
    /// All possible status values, in display order.
    pub const ALL: &'static [DogStatus] = &[
        Self::Intake,
        Self::Hold,
        Self::Fostered,
        Self::Adoptable,
        Self::Adopted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Intake => "Intake",
            Self::Hold => "Hold",
            Self::Fostered => "Fostered",
            Self::Adoptable => "Adoptable",
            Self::Adopted => "Adopted",
        }
    }
}

impl fmt::Display for DogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for DogStatus {
    fn default() -> Self {
        Self::Intake
    }
}

impl FromStr for DogStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("status", s, Self::ALL.iter().map(|v| v.as_str())))
    }
}

/// Error when parsing an invalid size or status string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    field: &'static str,
    invalid: String,
    valid: String,
}

impl ParseEnumError {
    fn new<'a>(field: &'static str, invalid: &str, valid: impl Iterator<Item = &'a str>) -> Self {
        Self {
            field,
            invalid: invalid.to_string(),
            valid: valid.collect::<Vec<_>>().join(", "),
        }
    }
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid {} '{}'. Valid values: {}",
            self.field, self.invalid, self.valid
        )
    }
}

impl std::error::Error for ParseEnumError {}
