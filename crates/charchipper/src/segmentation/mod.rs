//! # Special-Token Segmentation
//!
//! Splits raw text into alternating plain / special-token spans ahead of
//! per-character encoding.
//!
//! Special tokens are always matched as literal substrings by an explicit
//! scanner; no regex engine is involved, so tokens containing regex
//! metacharacters need no escaping.

use core::ops::Range;

/// A labeled byte-range span of the segmented text.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpanRef {
    /// A run of plain characters.
    Plain(Range<usize>),

    /// A whole special-token match.
    Special(Range<usize>),
}

impl From<SpanRef> for Range<usize> {
    fn from(span: SpanRef) -> Self {
        match span {
            SpanRef::Plain(range) => range,
            SpanRef::Special(range) => range,
        }
    }
}

/// Literal-substring scanner over a registered special-token list.
///
/// Match policy: the earliest-starting match wins; at equal start
/// positions the longest token wins, and a length tie goes to the
/// first-registered token.
#[derive(Clone, Debug, Default)]
pub struct SpecialScanner {
    specials: Vec<String>,
}

impl SpecialScanner {
    /// Build a scanner from the registered special tokens, in order.
    ///
    /// Empty-string tokens are dropped; they can never span text.
    pub fn new<I, S>(specials: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            specials: specials
                .into_iter()
                .map(Into::into)
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// The byte length of the winning special token at `pos`, if any.
    fn match_len_at(
        &self,
        text: &str,
        pos: usize,
    ) -> Option<usize> {
        let rest = &text[pos..];
        let mut best: Option<usize> = None;
        for token in &self.specials {
            if rest.starts_with(token.as_str()) && best.map_or(true, |len| token.len() > len) {
                best = Some(token.len());
            }
        }
        best
    }

    /// Split text into alternating [`SpanRef::Plain`] and
    /// [`SpanRef::Special`] spans covering the whole input.
    ///
    /// With no registered special tokens the whole text is one plain
    /// span; empty text yields no spans.
    ///
    /// ## Arguments
    /// * `text` - the text to split.
    ///
    /// ## Returns
    /// A vector of `SpanRef` items in left-to-right order.
    pub fn split_spans(
        &self,
        text: &str,
    ) -> Vec<SpanRef> {
        let mut spans = Vec::new();
        if self.specials.is_empty() {
            if !text.is_empty() {
                spans.push(SpanRef::Plain(0..text.len()));
            }
            return spans;
        }

        let mut plain_start = 0;
        let mut pos = 0;
        while pos < text.len() {
            match self.match_len_at(text, pos) {
                Some(len) => {
                    if plain_start < pos {
                        spans.push(SpanRef::Plain(plain_start..pos));
                    }
                    spans.push(SpanRef::Special(pos..pos + len));
                    pos += len;
                    plain_start = pos;
                }
                None => {
                    // Advance one whole character, never into a scalar.
                    pos += text[pos..].chars().next().map_or(1, char::len_utf8);
                }
            }
        }
        if plain_start < text.len() {
            spans.push(SpanRef::Plain(plain_start..text.len()));
        }
        spans
    }
}
