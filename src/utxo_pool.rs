use crate::{TransactionOutput, Utxo};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::iter::FromIterator;

/// A pool of confirmed and unspent transaction outputs.
/// Cloning the pool produces an independent copy: mutating the clone never affects the
/// original.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<UtxoEntry>", into = "Vec<UtxoEntry>")]
pub struct UtxoPool {
    // Unspent transaction outputs, indexed by their transaction ID and their index in the
    // transaction.
    utxos: HashMap<Utxo, TransactionOutput>,
}

/// A single pool entry as it appears in a snapshot file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UtxoEntry {
    pub utxo: Utxo,
    pub output: TransactionOutput,
}

impl UtxoPool {
    pub fn new() -> Self {
        Self {
            utxos: HashMap::new(),
        }
    }

    pub fn contains(&self, utxo: &Utxo) -> bool {
        self.utxos.contains_key(utxo)
    }

    pub fn get(&self, utxo: &Utxo) -> Option<&TransactionOutput> {
        self.utxos.get(utxo)
    }

    /// Inserts the output, replacing any previous output under the same reference.
    pub fn add(&mut self, utxo: Utxo, output: TransactionOutput) {
        self.utxos.insert(utxo, output);
    }

    pub fn remove(&mut self, utxo: &Utxo) -> Option<TransactionOutput> {
        self.utxos.remove(utxo)
    }

    pub fn len(&self) -> usize {
        self.utxos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.utxos.is_empty()
    }

    /// All references in the pool, sorted so that the result is deterministic.
    pub fn all_utxos(&self) -> Vec<Utxo> {
        let mut utxos = self.utxos.keys().copied().collect::<Vec<Utxo>>();
        utxos.sort();
        utxos
    }
}

impl FromIterator<(Utxo, TransactionOutput)> for UtxoPool {
    fn from_iter<I: IntoIterator<Item = (Utxo, TransactionOutput)>>(iter: I) -> Self {
        Self {
            utxos: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<UtxoEntry>> for UtxoPool {
    fn from(entries: Vec<UtxoEntry>) -> Self {
        entries
            .into_iter()
            .map(|entry| (entry.utxo, entry.output))
            .collect()
    }
}

impl From<UtxoPool> for Vec<UtxoEntry> {
    fn from(pool: UtxoPool) -> Self {
        let mut entries = pool
            .utxos
            .into_iter()
            .map(|(utxo, output)| UtxoEntry { utxo, output })
            .collect::<Vec<UtxoEntry>>();
        entries.sort_by(|lhs, rhs| lhs.utxo.cmp(&rhs.utxo));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Amount, KeyPair, OutputIndex, Sha256, TransactionId};

    fn utxo(byte: u8, index: u32) -> Utxo {
        Utxo::new(
            TransactionId::new(Sha256::from_raw([byte; 32])),
            OutputIndex::new(index),
        )
    }

    fn output(amount: i64) -> TransactionOutput {
        TransactionOutput::new(
            Amount::new(amount),
            KeyPair::from_secret([1; 32]).public_key(),
        )
    }

    #[test]
    fn add_get_remove() {
        let mut pool = UtxoPool::new();
        assert!(pool.is_empty());

        pool.add(utxo(1, 0), output(10));
        assert!(pool.contains(&utxo(1, 0)));
        assert_eq!(pool.get(&utxo(1, 0)), Some(&output(10)));
        assert_eq!(pool.get(&utxo(1, 1)), None);

        pool.add(utxo(1, 0), output(20));
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.get(&utxo(1, 0)), Some(&output(20)));

        assert_eq!(pool.remove(&utxo(1, 0)), Some(output(20)));
        assert!(!pool.contains(&utxo(1, 0)));
        assert_eq!(pool.remove(&utxo(1, 0)), None);
    }

    #[test]
    fn clone_is_independent_of_the_original() {
        let mut original = UtxoPool::new();
        original.add(utxo(1, 0), output(10));

        let mut copy = original.clone();
        assert_eq!(copy, original);

        copy.remove(&utxo(1, 0));
        copy.add(utxo(2, 0), output(5));
        assert!(original.contains(&utxo(1, 0)));
        assert!(!original.contains(&utxo(2, 0)));
        assert_eq!(original.len(), 1);
    }

    #[test]
    fn all_utxos_are_sorted() {
        let pool = vec![(utxo(2, 0), output(1)), (utxo(1, 1), output(1)), (utxo(1, 0), output(1))]
            .into_iter()
            .collect::<UtxoPool>();
        assert_eq!(pool.all_utxos(), vec![utxo(1, 0), utxo(1, 1), utxo(2, 0)]);
    }

    #[test]
    fn json_snapshot_round_trip() {
        let pool = vec![(utxo(1, 0), output(10)), (utxo(2, 3), output(7))]
            .into_iter()
            .collect::<UtxoPool>();
        let json = serde_json::to_string(&pool).unwrap();
        assert_eq!(serde_json::from_str::<UtxoPool>(&json).unwrap(), pool);
    }
}
