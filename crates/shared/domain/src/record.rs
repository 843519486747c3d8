//! Record lifecycle state shared by catalog entities.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a stored record.
///
/// Catalog rows embed this by composition instead of inheriting a base
/// entity class; the database stores the string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordState {
    Active,
    Inactive,
}

impl RecordState {
    /// String form stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordState::Active => "ACTIVE",
            RecordState::Inactive => "INACTIVE",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, RecordState::Active)
    }
}

impl Default for RecordState {
    fn default() -> Self {
        RecordState::Active
    }
}

impl From<&str> for RecordState {
    fn from(s: &str) -> Self {
        match s {
            "INACTIVE" => RecordState::Inactive,
            _ => RecordState::Active,
        }
    }
}

impl std::fmt::Display for RecordState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_storage_form() {
        assert_eq!(RecordState::from(RecordState::Active.as_str()), RecordState::Active);
        assert_eq!(RecordState::from(RecordState::Inactive.as_str()), RecordState::Inactive);
    }

    #[test]
    fn test_unknown_state_defaults_to_active() {
        assert_eq!(RecordState::from("GARBAGE"), RecordState::Active);
    }
}
