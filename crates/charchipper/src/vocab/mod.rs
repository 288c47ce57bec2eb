//! # Character Vocabulary
//!
//! A [`Vocabulary`] is a bidirectional mapping between atomic units
//! (single characters, plus registered multi-character special tokens)
//! and dense token ids.
//!
//! Ids are assigned in order of first appearance, starting at 0, and
//! never change once assigned; training only ever appends.

pub mod io;

use crate::errors::{CCError, CCResult};

/// Token id type for vocabulary entries.
pub type TokenId = u32;

/// Training emits one progress log line every this many texts.
pub const TRAIN_LOG_INTERVAL: usize = 10_000;

/// Bidirectional unit ↔ id mapping, plus the registered special tokens.
///
/// Every instance owns its own freshly allocated maps; there is no
/// process-wide vocabulary state of any kind.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Vocabulary {
    /// Unit string → token id.
    unit_to_id: ahash::HashMap<String, TokenId>,

    /// Exact inverse of `unit_to_id`, indexed by id.
    id_to_unit: Vec<String>,

    /// Registration-ordered special tokens; each is a key of `unit_to_id`.
    special_tokens: Vec<String>,
}

impl Vocabulary {
    /// Create an empty vocabulary with no special tokens.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a vocabulary seeded with special tokens.
    ///
    /// The special tokens are inserted as atomic units in the given order,
    /// taking ids `0, 1, 2, ...`. A duplicate special token is a no-op on
    /// its second occurrence (the id is not reassigned), but the list is
    /// stored verbatim for segmentation priority.
    ///
    /// ## Arguments
    /// * `specials` - the special tokens, in registration order.
    pub fn with_special_tokens<I, S>(specials: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut vocab = Self::new();
        vocab.special_tokens = specials.into_iter().map(Into::into).collect();
        for token in vocab.special_tokens.clone() {
            vocab.insert_unit(&token);
        }
        vocab
    }

    /// Insert a unit, assigning the next sequential id if it is new.
    ///
    /// Idempotent: re-inserting an existing unit keeps its original id.
    ///
    /// ## Arguments
    /// * `unit` - the atomic unit to register.
    ///
    /// ## Returns
    /// The unit's id, whether fresh or previously assigned.
    pub fn insert_unit(
        &mut self,
        unit: &str,
    ) -> TokenId {
        if let Some(&id) = self.unit_to_id.get(unit) {
            return id;
        }

        let id = self.id_to_unit.len() as TokenId;
        self.unit_to_id.insert(unit.to_string(), id);
        self.id_to_unit.push(unit.to_string());
        id
    }

    /// Train over an iterator of texts, one pass, registering every
    /// character (by Unicode scalar, not byte) as an atomic unit.
    ///
    /// Logs progress every [`TRAIN_LOG_INTERVAL`] texts; the log side
    /// effect has no bearing on the resulting vocabulary.
    ///
    /// ## Arguments
    /// * `texts` - a finite, single-pass sequence of training texts.
    pub fn train_from_iter<I>(
        &mut self,
        texts: I,
    ) where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut buf = [0u8; 4];
        for (i, text) in texts.into_iter().enumerate() {
            if i % TRAIN_LOG_INTERVAL == 0 {
                log::info!("training vocabulary: {i} texts");
            }
            for ch in text.as_ref().chars() {
                self.insert_unit(ch.encode_utf8(&mut buf));
            }
        }
    }

    /// The number of distinct units ever registered.
    pub fn size(&self) -> usize {
        self.id_to_unit.len()
    }

    /// True if no unit has been registered.
    pub fn is_empty(&self) -> bool {
        self.id_to_unit.is_empty()
    }

    /// Look up the id of a unit.
    pub fn id_of(
        &self,
        unit: &str,
    ) -> Option<TokenId> {
        self.unit_to_id.get(unit).copied()
    }

    /// Look up the id of a unit, failing with [`CCError::UnknownUnit`].
    pub fn try_id_of(
        &self,
        unit: &str,
    ) -> CCResult<TokenId> {
        self.id_of(unit)
            .ok_or_else(|| CCError::unknown_unit(unit))
    }

    /// Look up the unit string for an id.
    pub fn unit_of(
        &self,
        id: TokenId,
    ) -> Option<&str> {
        self.id_to_unit.get(id as usize).map(String::as_str)
    }

    /// Look up the unit string for an id, failing with [`CCError::UnknownId`].
    pub fn try_unit_of(
        &self,
        id: TokenId,
    ) -> CCResult<&str> {
        self.unit_of(id).ok_or(CCError::UnknownId { id })
    }

    /// True if the unit has been registered.
    pub fn contains_unit(
        &self,
        unit: &str,
    ) -> bool {
        self.unit_to_id.contains_key(unit)
    }

    /// The registered special tokens, in registration order.
    pub fn special_tokens(&self) -> &[String] {
        &self.special_tokens
    }

    /// True if the unit is a registered special token.
    pub fn is_special(
        &self,
        unit: &str,
    ) -> bool {
        self.special_tokens.iter().any(|s| s == unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_unit_is_idempotent() {
        let mut vocab = Vocabulary::new();

        assert_eq!(vocab.insert_unit("a"), 0);
        assert_eq!(vocab.insert_unit("b"), 1);
        assert_eq!(vocab.insert_unit("a"), 0);
        assert_eq!(vocab.insert_unit("b"), 1);

        assert_eq!(vocab.size(), 2);
        assert_eq!(vocab.id_of("a"), Some(0));
        assert_eq!(vocab.unit_of(1), Some("b"));
    }

    #[test]
    fn test_inverse_mapping_stays_exact() {
        let mut vocab = Vocabulary::with_special_tokens(["[BLANK]"]);
        vocab.train_from_iter(["abcab", "cba"]);

        for id in 0..vocab.size() as TokenId {
            let unit = vocab.unit_of(id).unwrap();
            assert_eq!(vocab.id_of(unit), Some(id));
        }
        assert_eq!(vocab.size(), 4);
    }

    #[test]
    fn test_special_tokens_seed_first() {
        let vocab = Vocabulary::with_special_tokens(["[BLANK]", "[SEP]"]);

        assert_eq!(vocab.id_of("[BLANK]"), Some(0));
        assert_eq!(vocab.id_of("[SEP]"), Some(1));
        assert_eq!(vocab.special_tokens(), &["[BLANK]", "[SEP]"]);
        assert!(vocab.is_special("[SEP]"));
        assert!(!vocab.is_special("a"));
    }

    #[test]
    fn test_duplicate_special_tokens_keep_first_id() {
        let vocab = Vocabulary::with_special_tokens(["[BLANK]", "[BLANK]"]);

        assert_eq!(vocab.size(), 1);
        assert_eq!(vocab.id_of("[BLANK]"), Some(0));
        // The list itself is stored verbatim.
        assert_eq!(vocab.special_tokens().len(), 2);
    }

    #[test]
    fn test_train_iterates_by_scalar_not_byte() {
        let mut vocab = Vocabulary::new();
        vocab.train_from_iter(["héllo héllo"]);

        // h, é, l, o, space; é is 2 bytes but one unit.
        assert_eq!(vocab.size(), 5);
        assert_eq!(vocab.id_of("é"), Some(1));
    }

    #[test]
    fn test_empty_training_input() {
        let mut vocab = Vocabulary::with_special_tokens(["[BLANK]"]);
        vocab.train_from_iter(Vec::<String>::new());
        assert_eq!(vocab.size(), 1);

        let mut bare = Vocabulary::new();
        bare.train_from_iter(Vec::<String>::new());
        assert!(bare.is_empty());
    }

    #[test]
    fn test_instances_do_not_share_state() {
        let mut a = Vocabulary::with_special_tokens(["[BLANK]"]);
        let b = Vocabulary::with_special_tokens(["[BLANK]"]);

        a.insert_unit("x");
        assert_eq!(a.size(), 2);
        assert_eq!(b.size(), 1);
    }

    #[test]
    fn test_try_lookups_fail_hard() {
        let vocab = Vocabulary::with_special_tokens(["[BLANK]"]);

        assert!(matches!(
            vocab.try_id_of("z"),
            Err(CCError::UnknownUnit { .. })
        ));
        assert!(matches!(
            vocab.try_unit_of(17),
            Err(CCError::UnknownId { id: 17 })
        ));
    }
}
