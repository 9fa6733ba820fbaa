//! Encrypted collection of PIN records
//!
//! The container is a JSON list of record strings sealed by a [`PinCipher`].
//! Records are kept as a set, so duplicates collapse and insertion order is
//! not preserved.

use std::collections::BTreeSet;

use crate::cipher::PinCipher;
use crate::config::GridConfig;
use crate::error::{PinError, Result};
use crate::grid::PinTable;

/// Duplicate-free set of encoded PIN records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinCollection {
    records: BTreeSet<String>,
}

impl PinCollection {
    pub fn new() -> Self {
        Self {
            records: BTreeSet::new(),
        }
    }

    /// Open a sealed container; `None` means nothing has been saved yet
    pub fn from_encrypted<C: PinCipher + ?Sized>(
        cipher: &C,
        sealed: Option<&[u8]>,
    ) -> Result<Self> {
        let Some(sealed) = sealed else {
            log::info!("No saved PINs found, starting fresh");
            return Ok(Self::new());
        };

        let plain = cipher.decrypt(sealed)?;
        let records: BTreeSet<String> = serde_json::from_slice(&plain)?;
        log::info!("Loaded {} saved PINs", records.len());
        Ok(Self { records })
    }

    /// Sealed container bytes for the current set of records
    pub fn to_encrypted<C: PinCipher + ?Sized>(&self, cipher: &C) -> Result<Vec<u8>> {
        let plain = serde_json::to_vec(&self.records)?;
        let sealed = cipher.encrypt(&plain)?;
        log::debug!("Sealed {} PINs into {} bytes", self.records.len(), sealed.len());
        Ok(sealed)
    }

    /// All saved records, sorted
    pub fn retrieve_pins<C: PinCipher + ?Sized>(
        cipher: &C,
        sealed: Option<&[u8]>,
    ) -> Result<Vec<String>> {
        Ok(Self::from_encrypted(cipher, sealed)?.records.into_iter().collect())
    }

    /// Add a raw record; returns false if it was already present
    pub fn insert(&mut self, record: Vec<u8>) -> Result<bool> {
        let record = String::from_utf8(record)
            .map_err(|_| PinError::malformed("record is not valid UTF-8"))?;
        Ok(self.records.insert(record))
    }

    /// Encode a filled table and add it
    pub fn insert_table(&mut self, table: &PinTable) -> Result<bool> {
        self.insert(table.get_data()?)
    }

    pub fn remove(&mut self, record: &str) -> bool {
        self.records.remove(record)
    }

    pub fn contains(&self, record: &str) -> bool {
        self.records.contains(record)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(String::as_str)
    }

    /// Decode every record independently against `config`
    pub fn decode_all(&self, config: GridConfig) -> Result<Vec<PinTable>> {
        self.records()
            .map(|r| PinTable::from_data(config, r.as_bytes()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher::{ChaChaCipher, CipherError, CipherOp};
    use crate::grid::Pattern;

    /// Always fails, to check errors pass through untouched
    struct BrokenCipher;

    impl PinCipher for BrokenCipher {
        fn encrypt(&self, _: &[u8]) -> std::result::Result<Vec<u8>, CipherError> {
            Err(CipherError::new(CipherOp::Encrypt, "keystore locked"))
        }

        fn decrypt(&self, _: &[u8]) -> std::result::Result<Vec<u8>, CipherError> {
            Err(CipherError::new(CipherOp::Decrypt, "keystore locked"))
        }
    }

    fn filled_table(seed: u64) -> PinTable {
        let config = GridConfig::default();
        let mut table = PinTable::new(config, Pattern::from_seed(&config, seed)).unwrap();
        table.fill();
        table
    }

    #[test]
    fn test_no_container_is_empty() {
        let (cipher, _) = ChaChaCipher::generate();
        let pins = PinCollection::retrieve_pins(&cipher, None).unwrap();
        assert!(pins.is_empty());
    }

    #[test]
    fn test_empty_collection_round_trip() {
        let (cipher, _) = ChaChaCipher::generate();
        let sealed = PinCollection::new().to_encrypted(&cipher).unwrap();
        let pins = PinCollection::retrieve_pins(&cipher, Some(sealed.as_slice())).unwrap();
        assert!(pins.is_empty());
    }

    #[test]
    fn test_duplicates_collapse() {
        let mut collection = PinCollection::new();
        assert!(collection.insert(b"1-12-34".to_vec()).unwrap());
        assert!(!collection.insert(b"1-12-34".to_vec()).unwrap());
        assert_eq!(collection.len(), 1);
        assert!(collection.remove("1-12-34"));
        assert!(collection.is_empty());
    }

    #[test]
    fn test_non_utf8_record_rejected() {
        let mut collection = PinCollection::new();
        assert!(matches!(
            collection.insert(vec![0xff, 0xfe]),
            Err(PinError::MalformedRecord(_))
        ));
    }

    #[test]
    fn test_unfilled_table_not_inserted() {
        let config = GridConfig::default();
        let table = PinTable::new(config, Pattern::from_seed(&config, 1)).unwrap();
        let mut collection = PinCollection::new();
        assert!(matches!(
            collection.insert_table(&table),
            Err(PinError::IncompleteGrid)
        ));
    }

    #[test]
    fn test_sealed_round_trip_decodes_tables() {
        let (cipher, _) = ChaChaCipher::generate();
        let a = filled_table(1);
        let b = filled_table(2);

        let mut collection = PinCollection::new();
        collection.insert_table(&a).unwrap();
        collection.insert_table(&b).unwrap();
        let sealed = collection.to_encrypted(&cipher).unwrap();

        let restored = PinCollection::from_encrypted(&cipher, Some(sealed.as_slice())).unwrap();
        assert_eq!(restored, collection);

        let tables = restored.decode_all(GridConfig::default()).unwrap();
        assert_eq!(tables.len(), 2);
        assert!(tables.contains(&a));
        assert!(tables.contains(&b));
    }

    #[test]
    fn test_retrieve_is_sorted() {
        let (cipher, _) = ChaChaCipher::generate();
        let mut collection = PinCollection::new();
        for record in ["3-00-11", "1-00-11", "2-00-11"] {
            collection.insert(record.as_bytes().to_vec()).unwrap();
        }
        let sealed = collection.to_encrypted(&cipher).unwrap();
        let pins = PinCollection::retrieve_pins(&cipher, Some(sealed.as_slice())).unwrap();
        assert_eq!(pins, vec!["1-00-11", "2-00-11", "3-00-11"]);
    }

    #[test]
    fn test_cipher_failure_propagates() {
        let err = PinCollection::from_encrypted(&BrokenCipher, Some(&b"anything"[..])).unwrap_err();
        match err {
            PinError::EnDecryption(e) => {
                assert_eq!(e.op, CipherOp::Decrypt);
                assert_eq!(e.trace, "keystore locked");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(
            PinCollection::new().to_encrypted(&BrokenCipher),
            Err(PinError::EnDecryption(_))
        ));
    }

    #[test]
    fn test_garbage_plaintext_is_serialization_error() {
        let (cipher, _) = ChaChaCipher::generate();
        let sealed = cipher.encrypt(b"not json").unwrap();
        assert!(matches!(
            PinCollection::from_encrypted(&cipher, Some(sealed.as_slice())),
            Err(PinError::Serialization(_))
        ));
    }

    #[test]
    fn test_decode_all_surfaces_malformed_record() {
        let mut collection = PinCollection::new();
        collection.insert(b"1-123-456".to_vec()).unwrap();
        assert!(matches!(
            collection.decode_all(GridConfig::new(2, 2).unwrap()),
            Err(PinError::MalformedRecord(_))
        ));
    }
}
