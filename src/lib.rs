pub mod amount;
pub mod commands;
pub mod error;
pub mod hash;
pub mod public_key;
pub mod transaction;
pub mod utxo;
pub mod utxo_pool;
pub mod validation;

pub use self::{
    amount::*, error::*, hash::*, public_key::*, transaction::*, utxo::*, utxo_pool::*,
    validation::*,
};
