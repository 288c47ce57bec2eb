//! # Character Codec
//!
//! Encode text to token ids and decode ids back to text against an
//! immutable, fully-trained [`Vocabulary`].
//!
//! Decoding is deliberately lossy: it sits downstream of models whose
//! outputs repeat an id across consecutive frames (a CTC-style blank
//! spanning multiple slots), so immediate repeats are collapsed and
//! special tokens stripped before the text is rebuilt. As a result
//! `decode(encode(x))` differs from `x` whenever `x` contains adjacent
//! equal characters.

use crate::errors::CCResult;
use crate::segmentation::{SpanRef, SpecialScanner};
use crate::vocab::{TokenId, Vocabulary};

/// Character-level encoder/decoder over a borrowed [`Vocabulary`].
#[derive(Clone, Debug)]
pub struct CharCodec<'a> {
    vocab: &'a Vocabulary,
    scanner: SpecialScanner,
}

impl<'a> CharCodec<'a> {
    /// Build a codec for a vocabulary, pre-building the special-token
    /// scanner from its registered specials.
    pub fn new(vocab: &'a Vocabulary) -> Self {
        let scanner = SpecialScanner::new(vocab.special_tokens().iter().cloned());
        Self { vocab, scanner }
    }

    /// The backing vocabulary.
    pub fn vocab(&self) -> &Vocabulary {
        self.vocab
    }

    /// Encode text into token ids.
    ///
    /// The text is segmented around special tokens first; special spans
    /// emit one id, plain spans emit one id per character.
    ///
    /// ## Arguments
    /// * `text` - the text to encode.
    ///
    /// ## Returns
    /// The id sequence, or [`CCError::UnknownUnit`] on the first unit
    /// never registered in the vocabulary.
    ///
    /// [`CCError::UnknownUnit`]: crate::errors::CCError::UnknownUnit
    pub fn encode(
        &self,
        text: &str,
    ) -> CCResult<Vec<TokenId>> {
        let mut ids = Vec::with_capacity(text.chars().count());
        let mut buf = [0u8; 4];

        for span in self.scanner.split_spans(text) {
            match span {
                SpanRef::Special(range) => {
                    ids.push(self.vocab.try_id_of(&text[range])?);
                }
                SpanRef::Plain(range) => {
                    for ch in text[range].chars() {
                        ids.push(self.vocab.try_id_of(ch.encode_utf8(&mut buf))?);
                    }
                }
            }
        }
        Ok(ids)
    }

    /// Decode token ids back into text.
    ///
    /// Two phases:
    /// 1. adjacent-duplicate collapse: an id equal to the last *kept* id
    ///    is dropped, so runs collapse to one occurrence while
    ///    non-adjacent repeats survive;
    /// 2. special-token stripping: surviving ids that map to special
    ///    tokens contribute nothing; all other units are concatenated.
    ///
    /// ## Arguments
    /// * `ids` - the id sequence to decode.
    ///
    /// ## Returns
    /// The decoded text, or [`CCError::UnknownId`] on the first id with
    /// no vocabulary entry.
    ///
    /// [`CCError::UnknownId`]: crate::errors::CCError::UnknownId
    pub fn decode(
        &self,
        ids: &[TokenId],
    ) -> CCResult<String> {
        let mut text = String::new();
        let mut last_kept: Option<TokenId> = None;

        for &id in ids {
            if last_kept == Some(id) {
                continue;
            }
            last_kept = Some(id);

            let unit = self.vocab.try_unit_of(id)?;
            if !self.vocab.is_special(unit) {
                text.push_str(unit);
            }
        }
        Ok(text)
    }
}
