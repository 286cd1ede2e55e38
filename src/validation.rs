use crate::{
    Amount, OutputIndex, RejectReason, Transaction, TransactionId, TransactionOutput, Utxo,
    UtxoPool,
};
use log::{debug, info};
use std::collections::HashSet;

/// A candidate that did not make it into the accepted set, and why.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Rejection {
    pub transaction_id: TransactionId,
    pub reason: RejectReason,
}

/// The result of processing one batch of candidates.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    /// Accepted transactions in the order they were accepted.
    pub accepted: Vec<Transaction>,
    /// Rejected transactions in the order they were rejected.
    pub rejected: Vec<Rejection>,
}

/// Returns true iff `transaction` is valid with respect to `utxo_pool`.
pub fn validate(utxo_pool: &UtxoPool, transaction: &Transaction) -> bool {
    check_transaction(utxo_pool, transaction).is_ok()
}

/// Checks the transaction against the pool and returns its fee, i.e. the value of the spent
/// outputs that the transaction does not pass on.
///
/// For every input, in order: the spent output must be in the pool, the input's signature must
/// verify under the output's key, and the output must not be claimed by an earlier input.
/// Then every output amount must be non-negative and the outputs must not exceed the inputs.
pub fn check_transaction(
    utxo_pool: &UtxoPool,
    transaction: &Transaction,
) -> Result<Amount, RejectReason> {
    let mut claimed = HashSet::with_capacity(transaction.inputs().len());
    let mut total_input = Amount::zero();

    for (input_index, input) in transaction.inputs().iter().enumerate() {
        let utxo = input.utxo();
        let spent_output = utxo_pool
            .get(utxo)
            .ok_or(RejectReason::MissingInput(*utxo))?;

        let authorized = transaction
            .signing_payload(input_index)
            .map(|payload| {
                spent_output
                    .public_key()
                    .verify(&payload, input.signature())
            })
            .unwrap_or(false);
        if !authorized {
            return Err(RejectReason::BadSignature {
                input_index,
                utxo: *utxo,
            });
        }

        if !claimed.insert(*utxo) {
            return Err(RejectReason::DoubleClaim(*utxo));
        }

        total_input = total_input
            .checked_add(spent_output.amount())
            .ok_or(RejectReason::ValueOverflow)?;
    }

    for (output_index, output) in transaction.outputs().iter().enumerate() {
        if output.amount().is_negative() {
            return Err(RejectReason::NegativeOutput {
                output_index,
                amount: output.amount(),
            });
        }
    }
    let total_output = Amount::checked_sum(
        transaction
            .outputs()
            .iter()
            .map(TransactionOutput::amount),
    )
    .ok_or(RejectReason::ValueOverflow)?;

    if total_output > total_input {
        return Err(RejectReason::InputsLessThanOutputs {
            inputs: total_input,
            outputs: total_output,
        });
    }
    Ok(total_input - total_output)
}

/// The public ledger: a private UTXO pool and the logic that accepts transactions into it.
///
/// Candidates are processed in the order the caller supplies them, each against the pool as
/// left by the candidates accepted before it. When two candidates spend the same output, the
/// first valid one wins, so the accepted set depends on that order.
pub struct TxHandler {
    utxo_pool: UtxoPool,
}

impl TxHandler {
    /// Creates a ledger whose current pool is a copy of `utxo_pool`.
    pub fn new(utxo_pool: &UtxoPool) -> Self {
        Self {
            utxo_pool: utxo_pool.clone(),
        }
    }

    pub fn utxo_pool(&self) -> &UtxoPool {
        &self.utxo_pool
    }

    pub fn into_utxo_pool(self) -> UtxoPool {
        self.utxo_pool
    }

    pub fn is_valid_tx(&self, transaction: &Transaction) -> bool {
        validate(&self.utxo_pool, transaction)
    }

    pub fn check(&self, transaction: &Transaction) -> Result<Amount, RejectReason> {
        check_transaction(&self.utxo_pool, transaction)
    }

    /// Accepts every candidate that is valid at the time it is reached and applies it to the
    /// pool. Returns the accepted transactions in acceptance order.
    pub fn handle_transactions(&mut self, candidates: &[Transaction]) -> Vec<Transaction> {
        self.handle_transactions_with_report(candidates).accepted
    }

    /// Same as `handle_transactions`, but also reports why each rejected candidate failed.
    pub fn handle_transactions_with_report(&mut self, candidates: &[Transaction]) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        for transaction in candidates {
            match self.check(transaction) {
                Ok(fee) => {
                    debug!("Accepted transaction: {} with fee: {}", transaction.id(), fee);
                    self.apply(transaction);
                    outcome.accepted.push(transaction.clone());
                }
                Err(reason) => {
                    debug!("Rejected transaction: {}: {}", transaction.id(), reason);
                    outcome.rejected.push(Rejection {
                        transaction_id: *transaction.id(),
                        reason,
                    });
                }
            }
        }
        info!(
            "Processed {} candidate transactions: {} accepted, {} rejected, {} unspent outputs",
            candidates.len(),
            outcome.accepted.len(),
            outcome.rejected.len(),
            self.utxo_pool.len()
        );
        outcome
    }

    // The transaction must have been checked against the current pool.
    fn apply(&mut self, transaction: &Transaction) {
        for (index, output) in transaction.outputs().iter().enumerate() {
            let utxo = Utxo::new(*transaction.id(), OutputIndex::new(index as u32));
            self.utxo_pool.add(utxo, output.clone());
        }
        for input in transaction.inputs() {
            let spent = self.utxo_pool.remove(input.utxo());
            assert!(
                spent.is_some(),
                "Accepted transaction: {} spends unknown output: {}",
                transaction.id(),
                input.utxo()
            );
        }
    }
}
