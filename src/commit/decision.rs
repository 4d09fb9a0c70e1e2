//! Parsing the user's answer to the approval prompt.

use std::fmt;

/// What the user wants to do with the current candidate message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Regenerate,
    Edit,
    Cancel,
    Invalid,
}

impl Decision {
    /// Parse one line of input.
    ///
    /// Case-insensitive and whitespace-tolerant; accepts full words and
    /// single-letter shorthands. Anything unrecognized is `Invalid`.
    pub fn parse(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "y" | "yes" => Decision::Approve,
            "n" | "no" => Decision::Regenerate,
            "e" | "edit" => Decision::Edit,
            "c" | "cancel" => Decision::Cancel,
            _ => Decision::Invalid,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Approve => "approve",
            Decision::Regenerate => "regenerate",
            Decision::Edit => "edit",
            Decision::Cancel => "cancel",
            Decision::Invalid => "invalid",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
