use crate::{OutputIndex, TransactionId};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A reference to a transaction output: the id of the transaction that created it and the
/// index of the output within that transaction.
/// Two references are the same key iff both parts are equal.
#[derive(Debug, Copy, Clone, Hash, Ord, PartialOrd, Eq, PartialEq, Serialize, Deserialize)]
pub struct Utxo {
    transaction_id: TransactionId,
    output_index: OutputIndex,
}

impl Utxo {
    pub const fn new(transaction_id: TransactionId, output_index: OutputIndex) -> Self {
        Self {
            transaction_id,
            output_index,
        }
    }

    pub fn transaction_id(&self) -> &TransactionId {
        &self.transaction_id
    }

    pub fn output_index(&self) -> OutputIndex {
        self.output_index
    }

    /// 32 bytes of the transaction id followed by 4 bytes of the little-endian index.
    pub fn to_bytes(&self) -> [u8; 36] {
        let mut bytes = [0u8; 36];
        bytes[..32].copy_from_slice(self.transaction_id.as_slice());
        bytes[32..].copy_from_slice(&self.output_index.value().to_le_bytes());
        bytes
    }
}

impl Display for Utxo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.transaction_id, self.output_index)
    }
}

/// Parses the `<TXID>:<OutputIndex>` format.
impl FromStr for Utxo {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (transaction_id, output_index) = s
            .split_once(':')
            .ok_or_else(|| format!("Expected <TXID>:<OutputIndex> but got: {}", s))?;
        let transaction_id = TransactionId::from_hex(transaction_id)?;
        let output_index = output_index
            .parse::<u32>()
            .map_err(|e| format!("Invalid output index in: {}: {}", s, e))?;
        Ok(Self::new(transaction_id, OutputIndex::new(output_index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Sha256;
    use std::collections::HashSet;

    fn transaction_id(byte: u8) -> TransactionId {
        TransactionId::new(Sha256::from_raw([byte; 32]))
    }

    #[test]
    fn independently_built_references_are_the_same_key() {
        let mut keys = HashSet::new();
        keys.insert(Utxo::new(transaction_id(1), OutputIndex::new(0)));
        assert!(keys.contains(&Utxo::new(transaction_id(1), OutputIndex::new(0))));
        assert!(!keys.contains(&Utxo::new(transaction_id(1), OutputIndex::new(1))));
        assert!(!keys.contains(&Utxo::new(transaction_id(2), OutputIndex::new(0))));
    }

    #[test]
    fn display_parses_back() {
        let utxo = Utxo::new(transaction_id(9), OutputIndex::new(3));
        assert_eq!(utxo.to_string().parse::<Utxo>(), Ok(utxo));
    }

    #[test]
    fn parse_rejects_malformed_references() {
        assert!("no-separator".parse::<Utxo>().is_err());
        assert!(format!("{}:x", transaction_id(1)).parse::<Utxo>().is_err());
        assert!("abcd:0".parse::<Utxo>().is_err());
    }

    #[test]
    fn bytes_hold_id_then_index() {
        let utxo = Utxo::new(transaction_id(5), OutputIndex::new(258));
        let bytes = utxo.to_bytes();
        assert_eq!(&bytes[..32], &[5; 32]);
        assert_eq!(&bytes[32..], &[2, 1, 0, 0]);
    }
}
