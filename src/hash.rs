use serde::{Deserialize, Serialize};
use sha2::Digest;
use std::convert::TryFrom;
use std::fmt::{Display, Formatter};

const SHA256_BYTE_COUNT: usize = 32;

/// Sha-256 is a 256-bit array or 32 bytes.
/// It provides an API to display as hex-encoded string and parse it from a hex-encoded string,
/// which is also how it is serialized.
#[derive(Copy, Clone, Debug, Hash, Ord, PartialOrd, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Sha256([u8; SHA256_BYTE_COUNT]);

impl Sha256 {
    pub const fn from_raw(raw_bytes: [u8; SHA256_BYTE_COUNT]) -> Self {
        Self(raw_bytes)
    }

    pub fn digest(data: &[u8]) -> Self {
        let mut hasher = sha2::Sha256::new();
        hasher.update(data);
        let mut output = [0; SHA256_BYTE_COUNT];
        output.copy_from_slice(hasher.finalize().as_slice());
        Sha256::from_raw(output)
    }

    /// SHA-256 applied twice, which is how transaction ids are computed.
    pub fn double_digest(data: &[u8]) -> Self {
        let first_hash = Self::digest(data);
        Self::digest(first_hash.as_slice())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0[..]
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.as_slice())
    }

    pub fn from_hex(s: &str) -> Result<Self, String> {
        let bytes = hex::decode(s).map_err(|e| e.to_string())?;
        if bytes.len() == SHA256_BYTE_COUNT {
            let mut sha = [0; SHA256_BYTE_COUNT];
            sha.copy_from_slice(&bytes);
            Ok(Sha256::from_raw(sha))
        } else {
            Err(format!(
                "Invalid SHA-256 length. Expected: {} but got: {} in: {}",
                SHA256_BYTE_COUNT,
                bytes.len(),
                s
            ))
        }
    }
}

impl Display for Sha256 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl TryFrom<String> for Sha256 {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Sha256> for String {
    fn from(value: Sha256) -> Self {
        value.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_hello_world() {
        assert_eq!(
            Sha256::digest(b"hello world").to_hex(),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn double_digest_hashes_the_first_digest() {
        let first = Sha256::digest(b"hello world");
        assert_eq!(
            Sha256::double_digest(b"hello world"),
            Sha256::digest(first.as_slice())
        );
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        assert!(Sha256::from_hex("abcd").is_err());
        assert!(Sha256::from_hex("not hex").is_err());
    }

    #[test]
    fn hex_display_parses_back() {
        let hash = Sha256::digest(b"utxo");
        assert_eq!(Sha256::from_hex(&hash.to_string()), Ok(hash));
    }
}
