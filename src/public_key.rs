use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use std::convert::{TryFrom, TryInto};
use std::fmt::{Display, Formatter};

const PUBLIC_KEY_BYTE_COUNT: usize = 32;
const SIGNATURE_BYTE_COUNT: usize = 64;

/// The Ed25519 public key of the recipient of a transaction output.
/// Only the owner of the matching secret key can authorize spending the output.
#[derive(Debug, Copy, Clone, Hash, Ord, PartialOrd, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PublicKey([u8; PUBLIC_KEY_BYTE_COUNT]);

impl PublicKey {
    pub fn as_slice(&self) -> &[u8] {
        &self.0[..]
    }

    pub fn from_hex(s: &str) -> Result<Self, String> {
        decode_hex_array(s).map(Self)
    }

    /// Returns true iff `signature` is a valid signature of `message` under this key.
    /// Bytes that do not form a valid curve point never verify anything.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        match VerifyingKey::from_bytes(&self.0) {
            Ok(verifying_key) => verifying_key
                .verify(message, &ed25519_dalek::Signature::from_bytes(&signature.0))
                .is_ok(),
            Err(_) => false,
        }
    }
}

impl Display for PublicKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl TryFrom<String> for PublicKey {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<PublicKey> for String {
    fn from(value: PublicKey) -> Self {
        value.to_string()
    }
}

/// An Ed25519 signature authorizing a single transaction input.
#[derive(Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Signature([u8; SIGNATURE_BYTE_COUNT]);

impl Signature {
    pub const fn from_raw(raw_bytes: [u8; SIGNATURE_BYTE_COUNT]) -> Self {
        Self(raw_bytes)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0[..]
    }

    pub fn from_hex(s: &str) -> Result<Self, String> {
        decode_hex_array(s).map(Self)
    }
}

impl std::fmt::Debug for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Signature({})", self)
    }
}

impl Display for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl TryFrom<String> for Signature {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Signature> for String {
    fn from(value: Signature) -> Self {
        value.to_string()
    }
}

/// The secret half of an account. It never leaves the process that owns it.
pub struct KeyPair {
    signing_key: SigningKey,
}

impl KeyPair {
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    pub fn from_secret(secret: [u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&secret),
        }
    }

    pub fn from_secret_hex(s: &str) -> Result<Self, String> {
        decode_hex_array(s).map(Self::from_secret)
    }

    pub fn secret_hex(&self) -> String {
        hex::encode(self.signing_key.to_bytes())
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.signing_key.verifying_key().to_bytes())
    }

    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature(self.signing_key.sign(message).to_bytes())
    }
}

fn decode_hex_array<const N: usize>(s: &str) -> Result<[u8; N], String> {
    let bytes = hex::decode(s).map_err(|e| e.to_string())?;
    let len = bytes.len();
    bytes
        .try_into()
        .map_err(|_| format!("Expected {} bytes but got: {} in: {}", N, len, s))
}
