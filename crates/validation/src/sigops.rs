//! Transaction-level signature operation accounting.

use iond_primitives::Transaction;
use iond_script::{is_pay_to_script_hash, sigop_count, VERIFY_P2SH};

use crate::coins::CoinView;

/// Worst-case sigop count over every input and output script.
pub fn legacy_sigop_count(tx: &Transaction) -> u32 {
    let inputs: u32 = tx
        .vin
        .iter()
        .map(|input| sigop_count(&input.script_sig, false))
        .sum();
    let outputs: u32 = tx
        .vout
        .iter()
        .map(|output| sigop_count(&output.script_pubkey, false))
        .sum();
    inputs + outputs
}

/// Sigops added by P2SH redeem scripts referenced by `tx`'s inputs.
///
/// The caller guarantees the coins are present; this runs after input
/// validation. Coinbase and zerocoin-spend transactions reference no real
/// prior outputs and count zero.
pub fn p2sh_sigop_count<V: CoinView>(tx: &Transaction, view: &V) -> u32 {
    if tx.is_coinbase() || tx.has_zerocoin_spend_inputs() {
        return 0;
    }

    let mut count = 0;
    for input in &tx.vin {
        let coin = view
            .coin(&input.prevout)
            .expect("coin view returned spent coin");
        if is_pay_to_script_hash(&coin.script_pubkey) {
            count += iond_script::p2sh_sigop_count(&input.script_sig);
        }
    }
    count
}

/// Total sigop cost of `tx`. Coinbase transactions count legacy only,
/// regardless of flags.
pub fn transaction_sigop_count<V: CoinView>(tx: &Transaction, view: &V, flags: u32) -> u32 {
    let mut count = legacy_sigop_count(tx);
    if tx.is_coinbase() {
        return count;
    }
    if flags & VERIFY_P2SH != 0 {
        count += p2sh_sigop_count(tx, view);
    }
    count
}
