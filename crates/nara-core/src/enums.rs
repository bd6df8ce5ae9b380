//! Categories, queue statuses, and translation targets.
//!
//! Categories serialize as the upper-case material codes used by the library
//! catalogue (`THESIS`, `RBOOK`, ...). Everything else uses `snake_case`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Library material category assigned to harvested works.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Thesis,
    Bobp,
    Map,
    Jr,
    Rpaper,
    Rbook,
}

impl Category {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Thesis => "THESIS",
            Self::Bobp => "BOBP",
            Self::Map => "MAP",
            Self::Jr => "JR",
            Self::Rpaper => "RPAPER",
            Self::Rbook => "RBOOK",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "THESIS" => Ok(Self::Thesis),
            "BOBP" => Ok(Self::Bobp),
            "MAP" => Ok(Self::Map),
            "JR" => Ok(Self::Jr),
            "RPAPER" => Ok(Self::Rpaper),
            "RBOOK" => Ok(Self::Rbook),
            _ => Err(CoreError::Validation(format!("unknown category: {s}"))),
        }
    }
}

// ---------------------------------------------------------------------------
// QueueStatus
// ---------------------------------------------------------------------------

/// Status of an upload queue item.
///
/// ```text
/// pending → uploaded
///         → failed → pending (retried on next run)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QueueStatus {
    Pending,
    Uploaded,
    Failed,
}

impl QueueStatus {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Uploaded, Self::Failed],
            Self::Failed => &[Self::Pending],
            Self::Uploaded => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Uploaded => "uploaded",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for QueueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Language
// ---------------------------------------------------------------------------

/// Translation target language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    Tamil,
    Sinhala,
}

impl Language {
    /// All translation targets, in processing order.
    pub const ALL: [Self; 2] = [Self::Tamil, Self::Sinhala];

    /// Key used in the catalogue `translations` map.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Tamil => "tamil",
            Self::Sinhala => "sinhala",
        }
    }

    /// ISO 639-1 code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Tamil => "ta",
            Self::Sinhala => "si",
        }
    }

    /// English display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Tamil => "Tamil",
            Self::Sinhala => "Sinhala",
        }
    }

    /// Storage folder that holds translations in this language.
    #[must_use]
    pub const fn folder(self) -> &'static str {
        match self {
            Self::Tamil => "pdfs_tamil",
            Self::Sinhala => "pdfs_sinhala",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Language {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tamil" | "ta" => Ok(Self::Tamil),
            "sinhala" | "si" => Ok(Self::Sinhala),
            _ => Err(CoreError::Validation(format!("unsupported language: {s}"))),
        }
    }
}
