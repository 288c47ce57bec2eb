//! # charchipper
//!
//! A character-level tokenizer: every Unicode scalar is an atomic unit,
//! plus a registered list of multi-character special tokens that are
//! segmented out of the text and encoded as single ids.
//!
//! Built as a preprocessing front-end for sequence models whose outputs
//! repeat ids across frames; see [`codec::CharCodec::decode`] for the
//! collapse/strip semantics.
//!
//! ## Usage
//!
//! ```rust
//! use charchipper::{CharCodec, Vocabulary};
//!
//! # fn main() -> charchipper::CCResult<()> {
//! let mut vocab = Vocabulary::with_special_tokens(["[BLANK]"]);
//! vocab.train_from_iter(["HELLO WORLD"]);
//!
//! let codec = CharCodec::new(&vocab);
//! let ids = codec.encode("HELLO[BLANK] WORLD")?;
//!
//! // Adjacent repeats collapse and specials strip on decode.
//! assert_eq!(codec.decode(&ids)?, "HELO WORLD");
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod errors;
pub mod segmentation;
pub mod vocab;

#[doc(inline)]
pub use codec::CharCodec;
#[doc(inline)]
pub use errors::{CCError, CCResult};
#[doc(inline)]
pub use vocab::io::{load_vocab_path, save_vocab_path};
#[doc(inline)]
pub use vocab::{TokenId, Vocabulary};
