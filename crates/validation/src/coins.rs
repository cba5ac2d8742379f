//! Read-only unspent output views.

use iond_consensus::money::Amount;
use iond_primitives::{OutPoint, Transaction};

/// An unspent output as seen by input validation.
#[derive(Clone, Debug, PartialEq)]
pub struct Coin {
    pub value: Amount,
    pub script_pubkey: Vec<u8>,
    /// Height of the block that created the output.
    pub height: i32,
    pub is_coinbase: bool,
    pub is_coinstake: bool,
}

/// A consistent snapshot of the unspent output set.
///
/// Implementations must never return a spent coin; validation treats the
/// snapshot as immutable for the duration of a call and asserts on coins
/// that a prior `have_inputs` said were present.
pub trait CoinView {
    /// Look up an unspent output. `None` if missing or already spent.
    fn coin(&self, outpoint: &OutPoint) -> Option<Coin>;

    /// Whether every non-null input of `tx` is present and unspent.
    fn have_inputs(&self, tx: &Transaction) -> bool {
        tx.vin
            .iter()
            .filter(|input| !input.prevout.is_null())
            .all(|input| self.coin(&input.prevout).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use iond_primitives::{TxIn, TxOut, TxType};

    struct MapView(HashMap<OutPoint, Coin>);

    impl CoinView for MapView {
        fn coin(&self, outpoint: &OutPoint) -> Option<Coin> {
            self.0.get(outpoint).cloned()
        }
    }

    fn spend(prevouts: &[OutPoint]) -> Transaction {
        Transaction {
            version: 1,
            tx_type: TxType::Normal,
            vin: prevouts
                .iter()
                .map(|prevout| TxIn {
                    prevout: *prevout,
                    script_sig: Vec::new(),
                    sequence: TxIn::SEQUENCE_FINAL,
                })
                .collect(),
            vout: vec![TxOut {
                value: 1,
                script_pubkey: vec![0x51],
            }],
            lock_time: 0,
            extra_payload: Vec::new(),
        }
    }

    #[test]
    fn have_inputs_requires_every_prevout() {
        let known = OutPoint::new([1u8; 32], 0);
        let unknown = OutPoint::new([2u8; 32], 0);
        let view = MapView(HashMap::from([(
            known,
            Coin {
                value: 10,
                script_pubkey: vec![0x51],
                height: 5,
                is_coinbase: false,
                is_coinstake: false,
            },
        )]));

        assert!(view.have_inputs(&spend(&[known])));
        assert!(!view.have_inputs(&spend(&[known, unknown])));
    }
}
