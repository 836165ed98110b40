use aes_gcm::aead::{Aead, Payload};
use aes_gcm::{Aes256Gcm, Key, KeyInit, Nonce};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;

const TOKEN_VERSION: u8 = 1;
const NONCE_LEN: usize = 12;
// version (1) + unix timestamp (8) + nonce
const HEADER_LEN: usize = 1 + 8 + NONCE_LEN;
const TAG_LEN: usize = 16;

#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("Malformed token: {0}")]
    Malformed(String),
    #[error("Unsupported token version: {0}")]
    UnsupportedVersion(u8),
    #[error("Integrity check failed: wrong key or tampered token")]
    Integrity,
    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// Flat 256-bit symmetric session key. Generated once per session (or
/// supplied by the caller) and retained externally for later decryption.
#[derive(Clone)]
pub struct SealKey([u8; 32]);

impl SealKey {
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn from_base64(encoded: &str) -> Result<Self, CryptoError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(encoded.trim())
            .map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| CryptoError::InvalidKey("key must decode to 32 bytes".to_string()))?;
        Ok(Self(bytes))
    }

    pub fn to_base64(&self) -> String {
        URL_SAFE_NO_PAD.encode(self.0)
    }
}

/// Seals answer text into an opaque, self-describing token:
/// base64url(version || timestamp || nonce || ciphertext+tag), AES-256-GCM,
/// with version and timestamp authenticated as associated data. Any altered
/// byte, or a mismatched key, fails the integrity check on unseal.
pub struct AnswerSealer {
    cipher: Aes256Gcm,
}

impl AnswerSealer {
    pub fn new(key: &SealKey) -> Self {
        Self {
            cipher: Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key.0)),
        }
    }

    pub fn seal(&self, plaintext: &str) -> Result<String, CryptoError> {
        let mut header = [0u8; HEADER_LEN];
        header[0] = TOKEN_VERSION;
        let timestamp = Utc::now().timestamp().max(0) as u64;
        header[1..9].copy_from_slice(&timestamp.to_be_bytes());
        OsRng.fill_bytes(&mut header[9..]);

        let nonce = Nonce::from_slice(&header[9..]);
        let ciphertext = self
            .cipher
            .encrypt(
                nonce,
                Payload {
                    msg: plaintext.as_bytes(),
                    aad: &header[..9],
                },
            )
            .map_err(|_| CryptoError::Integrity)?;

        let mut token = Vec::with_capacity(HEADER_LEN + ciphertext.len());
        token.extend_from_slice(&header);
        token.extend_from_slice(&ciphertext);
        Ok(URL_SAFE_NO_PAD.encode(token))
    }

    pub fn unseal(&self, token: &str) -> Result<String, CryptoError> {
        let raw = URL_SAFE_NO_PAD
            .decode(token.trim())
            .map_err(|e| CryptoError::Malformed(e.to_string()))?;

        if raw.len() < HEADER_LEN + TAG_LEN {
            return Err(CryptoError::Malformed("token too short".to_string()));
        }
        if raw[0] != TOKEN_VERSION {
            return Err(CryptoError::UnsupportedVersion(raw[0]));
        }

        let (header, ciphertext) = raw.split_at(HEADER_LEN);
        let nonce = Nonce::from_slice(&header[9..]);
        let plaintext = self
            .cipher
            .decrypt(
                nonce,
                Payload {
                    msg: ciphertext,
                    aad: &header[..9],
                },
            )
            .map_err(|_| CryptoError::Integrity)?;

        String::from_utf8(plaintext).map_err(|e| CryptoError::Malformed(e.to_string()))
    }

    /// Reads the embedded timestamp without decrypting. The value is only
    /// trustworthy once `unseal` has accepted the token.
    pub fn issued_at(token: &str) -> Result<DateTime<Utc>, CryptoError> {
        let raw = URL_SAFE_NO_PAD
            .decode(token.trim())
            .map_err(|e| CryptoError::Malformed(e.to_string()))?;
        if raw.len() < HEADER_LEN {
            return Err(CryptoError::Malformed("token too short".to_string()));
        }
        if raw[0] != TOKEN_VERSION {
            return Err(CryptoError::UnsupportedVersion(raw[0]));
        }

        let mut ts_bytes = [0u8; 8];
        ts_bytes.copy_from_slice(&raw[1..9]);
        let timestamp = u64::from_be_bytes(ts_bytes);

        DateTime::from_timestamp(timestamp as i64, 0)
            .ok_or_else(|| CryptoError::Malformed("timestamp out of range".to_string()))
    }
}
