//! Symmetric cipher used to seal the PIN collection
//!
//! Key derivation and key storage belong to the host application; this
//! module only needs a 256-bit key.
//!
//! Sealed layout: `nonce (12 bytes) || ciphertext || Poly1305 tag`

use std::fmt;

use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{ChaCha20Poly1305, Key, Nonce};
use rand::RngCore;
use thiserror::Error;

/// Key size in bytes
pub const KEY_SIZE: usize = 32;
/// Nonce size in bytes
pub const NONCE_SIZE: usize = 12;

/// Which direction failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherOp {
    Encrypt,
    Decrypt,
}

impl fmt::Display for CipherOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CipherOp::Encrypt => f.write_str("encryption"),
            CipherOp::Decrypt => f.write_str("decryption"),
        }
    }
}

/// Opaque cipher failure with a diagnostic trace
#[derive(Debug, Clone, Error)]
#[error("{op} failed: {trace}")]
pub struct CipherError {
    pub op: CipherOp,
    pub trace: String,
}

impl CipherError {
    pub fn new(op: CipherOp, trace: impl Into<String>) -> Self {
        Self {
            op,
            trace: trace.into(),
        }
    }
}

/// Encrypt/decrypt collaborator; `decrypt(encrypt(x)) == x`
pub trait PinCipher {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CipherError>;
    fn decrypt(&self, sealed: &[u8]) -> Result<Vec<u8>, CipherError>;
}

/// ChaCha20-Poly1305 with a fresh random nonce per message
#[derive(Clone)]
pub struct ChaChaCipher {
    cipher: ChaCha20Poly1305,
}

impl fmt::Debug for ChaChaCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChaChaCipher").finish_non_exhaustive()
    }
}

impl ChaChaCipher {
    pub fn new(key: [u8; KEY_SIZE]) -> Self {
        Self {
            cipher: ChaCha20Poly1305::new(Key::from_slice(&key)),
        }
    }

    /// Cipher over a freshly generated random key, returned alongside it
    pub fn generate() -> (Self, [u8; KEY_SIZE]) {
        let mut key = [0u8; KEY_SIZE];
        rand::rng().fill_bytes(&mut key);
        (Self::new(key), key)
    }
}

impl PinCipher for ChaChaCipher {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CipherError> {
        let mut nonce = [0u8; NONCE_SIZE];
        rand::rng().fill_bytes(&mut nonce);

        let ciphertext = self
            .cipher
            .encrypt(Nonce::from_slice(&nonce), plaintext)
            .map_err(|e| CipherError::new(CipherOp::Encrypt, format!("aead: {e}")))?;

        let mut sealed = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        sealed.extend_from_slice(&nonce);
        sealed.extend_from_slice(&ciphertext);
        Ok(sealed)
    }

    fn decrypt(&self, sealed: &[u8]) -> Result<Vec<u8>, CipherError> {
        if sealed.len() < NONCE_SIZE {
            return Err(CipherError::new(
                CipherOp::Decrypt,
                format!("input of {} bytes is shorter than a nonce", sealed.len()),
            ));
        }
        let (nonce, ciphertext) = sealed.split_at(NONCE_SIZE);
        self.cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|e| CipherError::new(CipherOp::Decrypt, format!("aead: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let (cipher, _) = ChaChaCipher::generate();
        let sealed = cipher.encrypt(b"7-0123-4567").unwrap();
        assert_ne!(&sealed[NONCE_SIZE..], b"7-0123-4567");
        assert_eq!(cipher.decrypt(&sealed).unwrap(), b"7-0123-4567");
    }

    #[test]
    fn test_same_key_reopens() {
        let (cipher, key) = ChaChaCipher::generate();
        let sealed = cipher.encrypt(b"secret").unwrap();
        assert_eq!(ChaChaCipher::new(key).decrypt(&sealed).unwrap(), b"secret");
    }

    #[test]
    fn test_nonce_differs_per_message() {
        let (cipher, _) = ChaChaCipher::generate();
        let a = cipher.encrypt(b"same").unwrap();
        let b = cipher.encrypt(b"same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_tampering_detected() {
        let (cipher, _) = ChaChaCipher::generate();
        let mut sealed = cipher.encrypt(b"secret").unwrap();
        let last = sealed.len() - 1;
        sealed[last] ^= 0x01;
        let err = cipher.decrypt(&sealed).unwrap_err();
        assert_eq!(err.op, CipherOp::Decrypt);
    }

    #[test]
    fn test_wrong_key_fails() {
        let (a, _) = ChaChaCipher::generate();
        let (b, _) = ChaChaCipher::generate();
        let sealed = a.encrypt(b"secret").unwrap();
        assert!(b.decrypt(&sealed).is_err());
    }

    #[test]
    fn test_truncated_input_fails() {
        let (cipher, _) = ChaChaCipher::generate();
        let err = cipher.decrypt(&[0u8; 4]).unwrap_err();
        assert!(err.to_string().starts_with("decryption failed"));
    }
}
