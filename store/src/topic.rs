//! Topic metadata storage trait.

use crate::StoreError;
use agora_types::{OptionId, TopicId};
use serde::{Deserialize, Serialize};

/// The ledger-relevant slice of a topic: its legal options and whether it
/// still accepts votes. Everything else about topics (titles, arguments,
/// curation) lives with the surrounding product.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    pub options: Vec<OptionId>,
    pub open: bool,
    /// Whether this topic uses quadratic allocation instead of
    /// single-choice voting.
    pub quadratic: bool,
}

impl Topic {
    /// Whether an option is legal on this topic. Abstain always is.
    pub fn has_option(&self, option: &OptionId) -> bool {
        option.is_abstain() || self.options.contains(option)
    }
}

/// Trait for topic metadata storage.
pub trait TopicStore {
    fn get_topic(&self, id: &TopicId) -> Result<Option<Topic>, StoreError>;
    fn put_topic(&self, topic: &Topic) -> Result<(), StoreError>;
}
