//! End-to-end validation flow: structural checks, contextual input checks,
//! then sequence-lock evaluation, the way mempool admission runs them.

use std::collections::HashMap;

use iond_consensus::constants::STANDARD_LOCKTIME_VERIFY_FLAGS;
use iond_consensus::{consensus_params, Network};
use iond_primitives::{OutPoint, Transaction, TxIn, TxOut, TxType};
use iond_script::VERIFY_P2SH;
use iond_validation::{
    calculate_sequence_locks, check_transaction, check_tx_inputs, evaluate_sequence_locks,
    is_final_tx, transaction_sigop_count, BlockAncestry, Coin, CoinView, InvalidOutputs,
    TxValidationError,
};

struct TestChain {
    height: i32,
    mtp: i64,
    parent: Option<Box<TestChain>>,
}

impl BlockAncestry for TestChain {
    fn height(&self) -> i32 {
        self.height
    }

    fn parent(&self) -> Option<&Self> {
        self.parent.as_deref()
    }

    fn median_time_past(&self) -> i64 {
        self.mtp
    }
}

fn chain(tip_height: i32) -> TestChain {
    let mut block = TestChain {
        height: 0,
        mtp: 1_600_000_000,
        parent: None,
    };
    for height in 1..=tip_height {
        block = TestChain {
            height,
            mtp: 1_600_000_000 + i64::from(height) * 90,
            parent: Some(Box::new(block)),
        };
    }
    block
}

struct MapView(HashMap<OutPoint, Coin>);

impl CoinView for MapView {
    fn coin(&self, outpoint: &OutPoint) -> Option<Coin> {
        self.0.get(outpoint).cloned()
    }
}

fn p2pkh(hash_byte: u8) -> Vec<u8> {
    let mut script = vec![0x76, 0xa9, 0x14];
    script.extend_from_slice(&[hash_byte; 20]);
    script.extend_from_slice(&[0x88, 0xac]);
    script
}

fn spend(prevouts: &[(OutPoint, u32)], out_value: i64) -> Transaction {
    Transaction {
        version: 2,
        tx_type: TxType::Normal,
        vin: prevouts
            .iter()
            .map(|&(prevout, sequence)| TxIn {
                prevout,
                script_sig: vec![0x51],
                sequence,
            })
            .collect(),
        vout: vec![TxOut {
            value: out_value,
            script_pubkey: p2pkh(0x42),
        }],
        lock_time: 0,
        extra_payload: Vec::new(),
    }
}

#[test]
fn mature_spend_passes_the_full_flow() {
    let params = consensus_params(Network::Regtest);
    let prevout = OutPoint::new([7u8; 32], 1);
    let view = MapView(HashMap::from([(
        prevout,
        Coin {
            value: 5_000,
            script_pubkey: p2pkh(0x11),
            height: 200,
            is_coinbase: true,
            is_coinstake: false,
        },
    )]));

    // Three blocks past maturity with a 3-block relative lock.
    let spend_height = 200 + params.coinbase_maturity + 3;
    let tx = spend(&[(prevout, 3)], 4_900);
    let tip = chain(spend_height);

    assert_eq!(check_transaction(&tx, true), Ok(()));
    assert!(is_final_tx(&tx, spend_height, tip.median_time_past()));

    let fee = check_tx_inputs(&tx, &view, spend_height, &params, &InvalidOutputs::new());
    assert_eq!(fee, Ok(100));

    let mut prev_heights = vec![200];
    let bound =
        calculate_sequence_locks(&tx, STANDARD_LOCKTIME_VERIFY_FLAGS, &mut prev_heights, &tip);
    assert_eq!(bound.min_height, 202);
    assert!(evaluate_sequence_locks(&tip, bound));

    // One sigop from the P2PKH output, nothing from the inputs.
    assert_eq!(transaction_sigop_count(&tx, &view, VERIFY_P2SH), 1);
}

#[test]
fn immature_spend_fails_before_lock_evaluation() {
    let params = consensus_params(Network::Regtest);
    let prevout = OutPoint::new([7u8; 32], 1);
    let view = MapView(HashMap::from([(
        prevout,
        Coin {
            value: 5_000,
            script_pubkey: p2pkh(0x11),
            height: 200,
            is_coinbase: true,
            is_coinstake: false,
        },
    )]));

    let spend_height = 200 + params.coinbase_maturity - 1;
    let tx = spend(&[(prevout, TxIn::SEQUENCE_FINAL)], 4_900);

    assert_eq!(check_transaction(&tx, true), Ok(()));
    let err = check_tx_inputs(&tx, &view, spend_height, &params, &InvalidOutputs::new())
        .expect_err("premature spend");
    assert_eq!(err.reject_reason(), "bad-txns-premature-spend-of-coinbase");
    assert_eq!(err.dos_score(), 0);
}

#[test]
fn structural_rejection_short_circuits() {
    let prevout = OutPoint::new([7u8; 32], 1);
    let tx = spend(&[(prevout, 0), (prevout, 0)], 1);
    assert_eq!(
        check_transaction(&tx, true),
        Err(TxValidationError::InputsDuplicate)
    );
}

#[test]
fn unsatisfied_relative_lock_blocks_inclusion() {
    let prevout = OutPoint::new([7u8; 32], 1);
    let tx = spend(&[(prevout, 10)], 4_900);
    let tip = chain(205);

    let mut prev_heights = vec![200];
    let bound =
        calculate_sequence_locks(&tx, STANDARD_LOCKTIME_VERIFY_FLAGS, &mut prev_heights, &tip);
    assert_eq!(bound.min_height, 209);
    assert!(!evaluate_sequence_locks(&tip, bound));
    assert!(evaluate_sequence_locks(&chain(210), bound));
}
