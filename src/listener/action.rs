//! Installer action vocabulary
//!
//! The installer reports every node it touches with a one-letter action
//! code. Codes this crate does not know are kept verbatim.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::ListenerError;

/// Progress reporting mode of the installer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Free-form progress text
    Text,
    /// One path per message
    Paths,
}

/// Action code attached to a mutation event
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ActionCode {
    /// `A`: node added
    Added,
    /// `U`: node updated
    Updated,
    /// `D`: node deleted
    Deleted,
    /// `R`: node replaced
    Replaced,
    /// `M`: node modified (older installers)
    Modified,
    /// `-`: node visited, nothing changed
    Unchanged,
    /// `E`: error reported for the node
    Error,
    /// Any other code, kept as reported
    Other(String),
}

impl ActionCode {
    /// Returns the installer's code for this action
    pub fn code(&self) -> &str {
        match self {
            ActionCode::Added => "A",
            ActionCode::Updated => "U",
            ActionCode::Deleted => "D",
            ActionCode::Replaced => "R",
            ActionCode::Modified => "M",
            ActionCode::Unchanged => "-",
            ActionCode::Error => "E",
            ActionCode::Other(code) => code,
        }
    }
}

impl FromStr for ActionCode {
    type Err = ListenerError;

    fn from_str(s: &str) -> Result<Self, ListenerError> {
        let code = match s.trim() {
            "" => return Err(ListenerError::EmptyActionCode),
            "A" => ActionCode::Added,
            "U" => ActionCode::Updated,
            "D" => ActionCode::Deleted,
            "R" => ActionCode::Replaced,
            "M" => ActionCode::Modified,
            "-" => ActionCode::Unchanged,
            "E" => ActionCode::Error,
            other => ActionCode::Other(other.to_string()),
        };
        Ok(code)
    }
}

impl TryFrom<String> for ActionCode {
    type Error = ListenerError;

    fn try_from(value: String) -> Result<Self, ListenerError> {
        value.parse()
    }
}

impl From<ActionCode> for String {
    fn from(action: ActionCode) -> Self {
        action.code().to_string()
    }
}

impl fmt::Display for ActionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Set of action codes a listener reacts to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionFilter {
    actions: HashSet<ActionCode>,
}

impl ActionFilter {
    /// Create a filter accepting exactly the given actions
    pub fn new(actions: impl IntoIterator<Item = ActionCode>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
        }
    }

    /// Whether the action passes the filter
    pub fn contains(&self, action: &ActionCode) -> bool {
        self.actions.contains(action)
    }

    /// Whether the filter accepts nothing
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl FromIterator<ActionCode> for ActionFilter {
    fn from_iter<I: IntoIterator<Item = ActionCode>>(iter: I) -> Self {
        Self::new(iter)
    }
}
