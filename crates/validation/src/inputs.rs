//! Contextual input validation against a coin view snapshot.

use iond_consensus::constants::{BOOTSTRAP_MATURITY_DEPTH, BOOTSTRAP_MATURITY_END_HEIGHT};
use iond_consensus::money::{money_range, Amount};
use iond_consensus::ConsensusParams;
use iond_log::log_warn;
use iond_primitives::hash::hash256_to_hex;
use iond_primitives::Transaction;
use iond_script::is_grouped_authority;

use crate::coins::CoinView;
use crate::error::TxValidationError;
use crate::invalid::InvalidOutputs;

/// Validate `tx`'s inputs against `view` for inclusion at `spend_height`
/// and compute the fee.
///
/// Reward coins must mature before being spent; the first hundred blocks of
/// a chain use a reduced bootstrap depth so early mining can sustain
/// itself. Coinstake fees are zero by convention since their value flow is
/// accounted for in the stake reward.
pub fn check_tx_inputs<V: CoinView>(
    tx: &Transaction,
    view: &V,
    spend_height: i32,
    params: &ConsensusParams,
    invalid: &InvalidOutputs,
) -> Result<Amount, TxValidationError> {
    if !view.have_inputs(tx) {
        log_warn!(
            "tx {}: inputs missing/spent at height {spend_height}",
            hash256_to_hex(&tx.txid())
        );
        return Err(TxValidationError::InputsMissingOrSpent);
    }

    let maturity = if spend_height <= BOOTSTRAP_MATURITY_END_HEIGHT {
        BOOTSTRAP_MATURITY_DEPTH
    } else {
        params.coinbase_maturity
    };

    let mut value_in: Amount = 0;
    for input in &tx.vin {
        // Null prevouts reference no coin; their value is accounted for by
        // the zerocoin spend checks, same set `have_inputs` skips.
        if input.prevout.is_null() {
            continue;
        }
        // The view just reported every input present; a miss here means the
        // snapshot was mutated under us.
        let coin = view
            .coin(&input.prevout)
            .expect("coin view returned spent coin");
        let depth = spend_height - coin.height;

        if coin.is_coinstake && depth < maturity {
            return Err(TxValidationError::PrematureCoinstakeSpend { depth });
        }
        if coin.is_coinbase && depth < maturity {
            return Err(TxValidationError::PrematureCoinbaseSpend { depth });
        }

        if is_grouped_authority(&coin.script_pubkey)
            && depth < params.op_group_required_confirmations
        {
            return Err(TxValidationError::PrematureAuthoritySpend {
                required_confirmations: params.op_group_required_confirmations,
            });
        }

        if spend_height >= params.pospow_start_height
            && invalid.contains_script(&coin.script_pubkey)
        {
            return Err(TxValidationError::InvalidInputScript);
        }

        if !money_range(coin.value) {
            return Err(TxValidationError::InputValuesOutOfRange);
        }
        value_in += coin.value;
        if !money_range(value_in) {
            return Err(TxValidationError::InputValuesOutOfRange);
        }
    }

    if tx.is_coinstake() {
        return Ok(0);
    }

    let value_out = tx.value_out();
    if value_in < value_out {
        return Err(TxValidationError::InBelowOut {
            value_in,
            value_out,
        });
    }

    let fee = value_in - value_out;
    if !money_range(fee) {
        return Err(TxValidationError::FeeOutOfRange);
    }
    Ok(fee)
}
