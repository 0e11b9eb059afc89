use serde::{Deserialize, Serialize};

/// Coarse classification shared by every failure this crate can report.
///
/// Callers that only care whether something went wrong can ignore it;
/// callers that want to show a reason can branch on it without matching
/// every concrete error variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The read could not be completed: unreachable host, non-success
    /// status, missing file, timeout.
    Transport,
    /// The body was read but is not valid JSON.
    Parse,
    /// A date input could not be interpreted.
    InvalidDateInput,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Transport => "transport",
            FailureKind::Parse => "parse",
            FailureKind::InvalidDateInput => "invalid_date_input",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
