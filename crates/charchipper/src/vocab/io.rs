//! # Vocabulary IO
//!
//! Persists a [`Vocabulary`] as a JSON record:
//!
//! ```json
//! {
//!   "unit_to_id": { "<unit>": <id>, ... },
//!   "special_tokens": ["<token>", ...]
//! }
//! ```
//!
//! Loading validates the record before any vocabulary is produced: ids
//! must form a contiguous, duplicate-free range `[0, N)`, and every
//! listed special token must be a registered unit. A record that fails
//! validation yields [`CCError::Format`] and no partially-valid
//! vocabulary.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CCError, CCResult};
use crate::vocab::{TokenId, Vocabulary};

/// The persisted wire shape of a [`Vocabulary`].
///
/// `id_to_unit` is not stored; it is rebuilt as the exact inverse on load.
#[derive(Debug, Serialize, Deserialize)]
struct VocabRecord {
    unit_to_id: ahash::HashMap<String, TokenId>,
    special_tokens: Vec<String>,
}

fn parse_error(err: serde_json::Error) -> CCError {
    if err.classify() == serde_json::error::Category::Io {
        CCError::Io(err.into())
    } else {
        CCError::format(format!("invalid vocabulary record: {err}"))
    }
}

/// Reconstruct a [`Vocabulary`] from a parsed record, validating the
/// id range and the specials-are-units invariant.
fn vocab_from_record(record: VocabRecord) -> CCResult<Vocabulary> {
    let size = record.unit_to_id.len();

    let mut slots: Vec<Option<String>> = vec![None; size];
    for (unit, &id) in &record.unit_to_id {
        let slot = slots.get_mut(id as usize).ok_or_else(|| {
            CCError::format(format!("id {id} out of range for {size} units"))
        })?;
        if slot.is_some() {
            return Err(CCError::format(format!("duplicate id {id}")));
        }
        *slot = Some(unit.clone());
    }
    // Unique keys + in-range + duplicate-free means every slot is filled.
    let id_to_unit: Vec<String> = slots.into_iter().flatten().collect();
    debug_assert_eq!(id_to_unit.len(), size);

    for token in &record.special_tokens {
        if !record.unit_to_id.contains_key(token) {
            return Err(CCError::format(format!(
                "special token {token:?} is not a registered unit"
            )));
        }
    }

    Ok(Vocabulary {
        unit_to_id: record.unit_to_id,
        id_to_unit,
        special_tokens: record.special_tokens,
    })
}

/// Write a vocabulary record to a writer.
pub fn write_vocab<W: Write>(
    vocab: &Vocabulary,
    writer: W,
) -> CCResult<()> {
    let record = VocabRecord {
        unit_to_id: vocab.unit_to_id.clone(),
        special_tokens: vocab.special_tokens.clone(),
    };
    serde_json::to_writer(writer, &record).map_err(|err| CCError::Io(err.into()))
}

/// Read and validate a vocabulary record from a reader.
pub fn read_vocab<R: Read>(reader: R) -> CCResult<Vocabulary> {
    let record: VocabRecord = serde_json::from_reader(reader).map_err(parse_error)?;
    vocab_from_record(record)
}

/// Save a vocabulary to a file path.
///
/// ## Arguments
/// * `vocab` - the vocabulary to persist.
/// * `path` - the destination path.
pub fn save_vocab_path<P: AsRef<Path>>(
    vocab: &Vocabulary,
    path: P,
) -> CCResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_vocab(vocab, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Load a vocabulary from a file path.
///
/// ## Arguments
/// * `path` - the source path.
///
/// ## Returns
/// The reconstructed vocabulary, with `id_to_unit` rebuilt as the
/// exact inverse of the stored mapping.
pub fn load_vocab_path<P: AsRef<Path>>(path: P) -> CCResult<Vocabulary> {
    let file = File::open(path)?;
    read_vocab(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    fn sample_vocab() -> Vocabulary {
        let mut vocab = Vocabulary::with_special_tokens(["[BLANK]"]);
        vocab.train_from_iter(["HELLO WORLD", "héllo"]);
        vocab
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = TempDir::new("charchipper-io").unwrap();
        let path = dir.path().join("vocab.json");

        let vocab = sample_vocab();
        save_vocab_path(&vocab, &path).unwrap();

        let loaded = load_vocab_path(&path).unwrap();
        assert_eq!(loaded, vocab);
    }

    #[test]
    fn test_load_missing_path_is_io_error() {
        let dir = TempDir::new("charchipper-io").unwrap();
        let path = dir.path().join("nope.json");

        assert!(matches!(load_vocab_path(&path), Err(CCError::Io(_))));
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let err = read_vocab("{not json".as_bytes()).unwrap_err();
        assert!(matches!(err, CCError::Format(_)));
    }

    #[test]
    fn test_load_rejects_unregistered_special_token() {
        let record = br#"{"unit_to_id": {"a": 0}, "special_tokens": ["[BLANK]"]}"#;
        let err = read_vocab(&record[..]).unwrap_err();
        assert!(matches!(err, CCError::Format(_)));
    }

    #[test]
    fn test_load_rejects_gapped_ids() {
        let record = br#"{"unit_to_id": {"a": 0, "b": 2}, "special_tokens": []}"#;
        let err = read_vocab(&record[..]).unwrap_err();
        assert!(matches!(err, CCError::Format(_)));
    }

    #[test]
    fn test_load_rejects_duplicate_ids() {
        let record = br#"{"unit_to_id": {"a": 0, "b": 0}, "special_tokens": []}"#;
        let err = read_vocab(&record[..]).unwrap_err();
        assert!(matches!(err, CCError::Format(_)));
    }

    #[test]
    fn test_load_rebuilds_exact_inverse() {
        let record = br#"{"unit_to_id": {"b": 1, "a": 0, "c": 2}, "special_tokens": []}"#;
        let vocab = read_vocab(&record[..]).unwrap();

        assert_eq!(vocab.unit_of(0), Some("a"));
        assert_eq!(vocab.unit_of(1), Some("b"));
        assert_eq!(vocab.unit_of(2), Some("c"));
        assert_eq!(vocab.size(), 3);
    }

    #[test]
    fn test_loaded_vocab_still_grows_correctly() {
        let mut vocab = read_vocab(
            &br#"{"unit_to_id": {"a": 0, "b": 1}, "special_tokens": []}"#[..],
        )
        .unwrap();

        assert_eq!(vocab.insert_unit("c"), 2);
        assert_eq!(vocab.insert_unit("a"), 0);
    }
}
