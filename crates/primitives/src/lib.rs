//! Transaction primitives shared by the validation core.

pub mod encoding;
pub mod hash;
pub mod outpoint;
pub mod transaction;

pub use outpoint::OutPoint;
pub use transaction::{Transaction, TxIn, TxOut, TxType, OP_ZEROCOINSPEND};
