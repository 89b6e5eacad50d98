//! Topic and option identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a votable topic (question).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TopicId(String);

impl TopicId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TopicId({})", self.0)
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of one answer option within a topic.
///
/// The abstain pseudo-option is a first-class option: it is legal on every
/// topic and counted in the tally like any other, which keeps the
/// sum-of-counts == distinct-voters invariant exact.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OptionId(String);

impl OptionId {
    /// The abstain pseudo-option, legal on every topic.
    pub const ABSTAIN_STR: &'static str = "abstain";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn abstain() -> Self {
        Self(Self::ABSTAIN_STR.to_string())
    }

    pub fn is_abstain(&self) -> bool {
        self.0 == Self::ABSTAIN_STR
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OptionId({})", self.0)
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abstain_recognised() {
        assert!(OptionId::abstain().is_abstain());
        assert!(!OptionId::new("yes").is_abstain());
    }
}
