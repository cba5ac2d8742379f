//! Context-free structural transaction checks.

use std::collections::HashSet;

use iond_consensus::constants::{MAX_LEGACY_BLOCK_SIZE, MAX_TX_EXTRA_PAYLOAD};
use iond_consensus::money::{money_range, MAX_MONEY};
use iond_primitives::{Transaction, TxType};

use crate::error::TxValidationError;

const MIN_COINBASE_SCRIPT_SIG: usize = 2;
const MAX_COINBASE_SCRIPT_SIG: usize = 150;

/// Validate a transaction independent of any chain state.
///
/// `zerocoin_active` gates the null-prevout exemption for marked zerocoin
/// spend inputs. Checks run in a fixed order and stop at the first failure;
/// the reported reason is part of the observable contract.
pub fn check_transaction(
    tx: &Transaction,
    zerocoin_active: bool,
) -> Result<(), TxValidationError> {
    let allow_empty_in_out = tx.tx_type.allows_empty_in_out();

    if !allow_empty_in_out && tx.vin.is_empty() {
        return Err(TxValidationError::VinEmpty);
    }
    if !allow_empty_in_out && tx.vout.is_empty() {
        return Err(TxValidationError::VoutEmpty);
    }

    if tx.serialized_size() > MAX_LEGACY_BLOCK_SIZE as usize {
        return Err(TxValidationError::Oversize);
    }
    if tx.extra_payload.len() > MAX_TX_EXTRA_PAYLOAD {
        return Err(TxValidationError::PayloadOversize);
    }

    let mut value_out: i64 = 0;
    for output in &tx.vout {
        if output.value < 0 {
            return Err(TxValidationError::VoutNegative);
        }
        if output.value > MAX_MONEY {
            return Err(TxValidationError::VoutTooLarge);
        }
        value_out += output.value;
        if !money_range(value_out) {
            return Err(TxValidationError::TxOutTotalTooLarge);
        }
    }

    let mut prevouts = HashSet::with_capacity(tx.vin.len());
    for input in &tx.vin {
        if prevouts.contains(&input.prevout) {
            return Err(TxValidationError::InputsDuplicate);
        }
        // Zerocoin spend serials are deduplicated by their own check, not
        // by prevout.
        if !input.is_zerocoin_spend() {
            prevouts.insert(input.prevout);
        }
    }

    if tx.is_coinbase() {
        // Coinbase-typed transactions carry the height in their payload, so
        // the script no longer has to.
        let min_len = if tx.tx_type == TxType::Coinbase {
            1
        } else {
            MIN_COINBASE_SCRIPT_SIG
        };
        let script_len = tx.vin[0].script_sig.len();
        if script_len < min_len || script_len > MAX_COINBASE_SCRIPT_SIG {
            return Err(TxValidationError::BadCoinbaseLength);
        }
    } else {
        for input in &tx.vin {
            if input.prevout.is_null() && zerocoin_active && !input.is_zerocoin_spend() {
                return Err(TxValidationError::PrevoutNull);
            }
        }
    }

    Ok(())
}
