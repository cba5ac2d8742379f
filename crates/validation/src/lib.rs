//! Consensus-critical transaction validation.
//!
//! Pure functions over explicit snapshots: a [`CoinView`] of unspent
//! outputs, a [`BlockAncestry`] view of chain history, and per-network
//! [`ConsensusParams`](iond_consensus::ConsensusParams). Callers run
//! [`check_transaction`] once per transaction, then [`check_tx_inputs`] and
//! the lock-time evaluators against a consistent snapshot. Nothing here
//! mutates state or retries; every "not yet" condition comes back as an
//! error for the caller to handle.

pub mod check;
pub mod coins;
pub mod error;
pub mod inputs;
pub mod invalid;
pub mod locktime;
pub mod sigops;

pub use check::check_transaction;
pub use coins::{Coin, CoinView};
pub use error::TxValidationError;
pub use inputs::check_tx_inputs;
pub use invalid::InvalidOutputs;
pub use locktime::{
    calculate_sequence_locks, evaluate_sequence_locks, is_final_tx, sequence_locks,
    BlockAncestry, SequenceLockBound,
};
pub use sigops::{legacy_sigop_count, p2sh_sigop_count, transaction_sigop_count};
