use crate::{Amount, Utxo};
use thiserror::Error;

/// Why a candidate transaction was not accepted.
/// These are ordinary validation outcomes, not faults: the batch carries on without the
/// transaction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    #[error("Referenced output: {0} is not in the UTXO pool")]
    MissingInput(Utxo),

    #[error("Signature of input: {input_index} does not authorize spending: {utxo}")]
    BadSignature { input_index: usize, utxo: Utxo },

    #[error("Output: {0} is claimed more than once by the transaction")]
    DoubleClaim(Utxo),

    #[error("Output: {output_index} has a negative amount: {amount}")]
    NegativeOutput { output_index: usize, amount: Amount },

    #[error("Inputs: {inputs} are less than outputs: {outputs}")]
    InputsLessThanOutputs { inputs: Amount, outputs: Amount },

    #[error("Sum of amounts overflows")]
    ValueOverflow,
}

/// Errors while assembling a transaction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransactionError {
    #[error("Transaction has {inputs} inputs but {signatures} signatures were provided")]
    SignatureCountMismatch { inputs: usize, signatures: usize },

    #[error("Transaction id: {actual} does not match the declared id: {declared}")]
    IdMismatch { declared: String, actual: String },
}
