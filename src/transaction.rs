use crate::{Amount, KeyPair, PublicKey, Sha256, Signature, TransactionError, Utxo};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt::{Display, Formatter};

/// A double SHA-256 hash of the transaction data.
#[derive(Debug, Hash, Ord, PartialOrd, Eq, PartialEq, Copy, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(Sha256);

impl Display for TransactionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TransactionId {
    pub fn new(data: Sha256) -> Self {
        Self(data)
    }

    pub fn from_hex(s: &str) -> Result<Self, String> {
        Sha256::from_hex(s).map(Self)
    }

    pub fn as_slice(&self) -> &[u8] {
        self.0.as_slice()
    }
}

/// The index of the transaction output, the first one is 0.
#[derive(Debug, Hash, Ord, PartialOrd, Eq, PartialEq, Copy, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutputIndex(u32);

impl Display for OutputIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl OutputIndex {
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TransactionInput {
    // A pointer to the transaction output to be spent.
    utxo: Utxo,
    // Signs the payload of this input with the key that the spent output is locked to.
    signature: Signature,
}

impl Display for TransactionInput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.utxo)
    }
}

impl TransactionInput {
    pub fn new(utxo: Utxo, signature: Signature) -> Self {
        Self { utxo, signature }
    }

    pub fn utxo(&self) -> &Utxo {
        &self.utxo
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TransactionOutput {
    amount: Amount,
    public_key: PublicKey,
}

impl Display for TransactionOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.amount, self.public_key)
    }
}

impl TransactionOutput {
    pub fn new(amount: Amount, public_key: PublicKey) -> Self {
        Self { amount, public_key }
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    fn write_bytes(&self, buffer: &mut Vec<u8>) {
        buffer.extend_from_slice(&self.amount.to_le_bytes());
        buffer.extend_from_slice(self.public_key.as_slice());
    }
}

/// A transaction whose id is fixed at construction.
/// Deserialization recomputes the id from the content and refuses a mismatching declared id.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TransactionData")]
pub struct Transaction {
    id: TransactionId,
    inputs: Vec<TransactionInput>,
    outputs: Vec<TransactionOutput>,
}

#[derive(Deserialize)]
struct TransactionData {
    #[serde(default)]
    id: Option<TransactionId>,
    inputs: Vec<TransactionInput>,
    outputs: Vec<TransactionOutput>,
}

impl TryFrom<TransactionData> for Transaction {
    type Error = TransactionError;

    fn try_from(data: TransactionData) -> Result<Self, Self::Error> {
        let transaction = Transaction::new(data.inputs, data.outputs);
        match data.id {
            Some(declared) if declared != transaction.id => Err(TransactionError::IdMismatch {
                declared: declared.to_string(),
                actual: transaction.id.to_string(),
            }),
            _ => Ok(transaction),
        }
    }
}

impl Transaction {
    pub fn new(inputs: Vec<TransactionInput>, outputs: Vec<TransactionOutput>) -> Self {
        let id = Self::hash_transaction_data(&inputs, &outputs);
        Self {
            id,
            inputs,
            outputs,
        }
    }

    pub fn id(&self) -> &TransactionId {
        &self.id
    }

    pub fn inputs(&self) -> &Vec<TransactionInput> {
        &self.inputs
    }

    pub fn outputs(&self) -> &Vec<TransactionOutput> {
        &self.outputs
    }

    /// The bytes that the input at `index` must sign, or `None` if there is no such input.
    pub fn signing_payload(&self, index: usize) -> Option<Vec<u8>> {
        let utxos = self
            .inputs
            .iter()
            .map(|input| input.utxo)
            .collect::<Vec<Utxo>>();
        signing_payload(&utxos, &self.outputs, index)
    }

    // Serialized transaction data, signatures included.
    fn raw_transaction_data(
        inputs: &[TransactionInput],
        outputs: &[TransactionOutput],
    ) -> Vec<u8> {
        let mut data = Vec::with_capacity(8 + inputs.len() * 100 + outputs.len() * 40);
        data.extend_from_slice(&(inputs.len() as u32).to_le_bytes());
        for input in inputs {
            data.extend_from_slice(&input.utxo.to_bytes());
            data.extend_from_slice(input.signature.as_slice());
        }
        data.extend_from_slice(&(outputs.len() as u32).to_le_bytes());
        for output in outputs {
            output.write_bytes(&mut data);
        }
        data
    }

    fn hash_transaction_data(
        inputs: &[TransactionInput],
        outputs: &[TransactionOutput],
    ) -> TransactionId {
        TransactionId(Sha256::double_digest(&Self::raw_transaction_data(
            inputs, outputs,
        )))
    }
}

/// A transaction under construction: inputs are bare references until each one is signed.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct UnsignedTransaction {
    inputs: Vec<Utxo>,
    outputs: Vec<TransactionOutput>,
}

impl UnsignedTransaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_input(mut self, utxo: Utxo) -> Self {
        self.inputs.push(utxo);
        self
    }

    pub fn add_output(mut self, amount: Amount, public_key: PublicKey) -> Self {
        self.outputs.push(TransactionOutput::new(amount, public_key));
        self
    }

    pub fn inputs(&self) -> &Vec<Utxo> {
        &self.inputs
    }

    pub fn outputs(&self) -> &Vec<TransactionOutput> {
        &self.outputs
    }

    pub fn signing_payload(&self, index: usize) -> Option<Vec<u8>> {
        signing_payload(&self.inputs, &self.outputs, index)
    }

    /// Signs the input at position `i` with `key_pairs[i]`.
    pub fn sign(self, key_pairs: &[&KeyPair]) -> Result<Transaction, TransactionError> {
        if key_pairs.len() != self.inputs.len() {
            return Err(TransactionError::SignatureCountMismatch {
                inputs: self.inputs.len(),
                signatures: key_pairs.len(),
            });
        }
        let signatures = (0..self.inputs.len())
            .zip(key_pairs)
            .filter_map(|(index, key_pair)| {
                self.signing_payload(index)
                    .map(|payload| key_pair.sign(&payload))
            })
            .collect();
        self.with_signatures(signatures)
    }

    /// Attaches signatures produced elsewhere, one per input in order.
    pub fn with_signatures(
        self,
        signatures: Vec<Signature>,
    ) -> Result<Transaction, TransactionError> {
        if signatures.len() != self.inputs.len() {
            return Err(TransactionError::SignatureCountMismatch {
                inputs: self.inputs.len(),
                signatures: signatures.len(),
            });
        }
        let inputs = self
            .inputs
            .into_iter()
            .zip(signatures)
            .map(|(utxo, signature)| TransactionInput::new(utxo, signature))
            .collect();
        Ok(Transaction::new(inputs, self.outputs))
    }
}

/// Bytes signed by the input at `index`: the position itself, the output it spends, every
/// input reference and every output of the transaction. Signatures are left out.
fn signing_payload(
    inputs: &[Utxo],
    outputs: &[TransactionOutput],
    index: usize,
) -> Option<Vec<u8>> {
    let spent = inputs.get(index)?;
    let mut payload = Vec::with_capacity(48 + inputs.len() * 36 + outputs.len() * 40);
    payload.extend_from_slice(&(index as u32).to_le_bytes());
    payload.extend_from_slice(&spent.to_bytes());
    payload.extend_from_slice(&(inputs.len() as u32).to_le_bytes());
    for utxo in inputs {
        payload.extend_from_slice(&utxo.to_bytes());
    }
    payload.extend_from_slice(&(outputs.len() as u32).to_le_bytes());
    for output in outputs {
        output.write_bytes(&mut payload);
    }
    Some(payload)
}
