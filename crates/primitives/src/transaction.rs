//! Transaction types and serialization.

use iond_consensus::money::Amount;
use iond_consensus::Hash256;

use crate::encoding::{encode, Encodable, Encoder};
use crate::hash::sha256d;
use crate::outpoint::OutPoint;

/// Opcode marking a zerocoin spend input's unlocking script.
pub const OP_ZEROCOINSPEND: u8 = 0xc2;

/// Transaction version from which the type tag and extra payload are serialized.
pub const SPECIAL_TX_VERSION: i16 = 3;

/// Special transaction type tags. The set is closed; unknown tags are rejected
/// by the deserializing caller before a `Transaction` is ever built.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(u16)]
pub enum TxType {
    Normal = 0,
    ProviderRegister = 1,
    ProviderUpdateService = 2,
    ProviderUpdateRegistrar = 3,
    ProviderUpdateRevoke = 4,
    Coinbase = 5,
    QuorumCommitment = 6,
}

impl TxType {
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Payload-only types carry no regular inputs or outputs.
    pub fn allows_empty_in_out(self) -> bool {
        matches!(self, TxType::QuorumCommitment)
    }

    pub fn is_special(self) -> bool {
        !matches!(self, TxType::Normal)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TxIn {
    pub prevout: OutPoint,
    pub script_sig: Vec<u8>,
    pub sequence: u32,
}

impl TxIn {
    /// Sequence value that exempts the input from lock-time rules.
    pub const SEQUENCE_FINAL: u32 = 0xffff_ffff;
    /// If set, the sequence number carries no relative lock-time meaning.
    pub const SEQUENCE_LOCKTIME_DISABLE_FLAG: u32 = 1 << 31;
    /// If set, the relative lock-time is time-based, otherwise height-based.
    pub const SEQUENCE_LOCKTIME_TYPE_FLAG: u32 = 1 << 22;
    /// Bits of the sequence number that encode the relative lock-time.
    pub const SEQUENCE_LOCKTIME_MASK: u32 = 0x0000_ffff;
    /// Time-based lock-times are in units of 2^9 = 512 seconds.
    pub const SEQUENCE_LOCKTIME_GRANULARITY: u32 = 9;

    /// Zerocoin spends consume minted notes rather than a prior output; they
    /// are marked by a null prevout and a leading `OP_ZEROCOINSPEND`.
    pub fn is_zerocoin_spend(&self) -> bool {
        self.prevout.is_null() && self.script_sig.first() == Some(&OP_ZEROCOINSPEND)
    }
}

impl Encodable for TxIn {
    fn consensus_encode(&self, encoder: &mut Encoder) {
        self.prevout.consensus_encode(encoder);
        encoder.write_var_bytes(&self.script_sig);
        encoder.write_u32_le(self.sequence);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TxOut {
    pub value: Amount,
    pub script_pubkey: Vec<u8>,
}

impl TxOut {
    /// The empty marker output that opens every coinstake.
    pub fn is_empty(&self) -> bool {
        self.value == 0 && self.script_pubkey.is_empty()
    }
}

impl Encodable for TxOut {
    fn consensus_encode(&self, encoder: &mut Encoder) {
        encoder.write_i64_le(self.value);
        encoder.write_var_bytes(&self.script_pubkey);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Transaction {
    pub version: i16,
    pub tx_type: TxType,
    pub vin: Vec<TxIn>,
    pub vout: Vec<TxOut>,
    pub lock_time: u32,
    /// Present only on special transaction types.
    pub extra_payload: Vec<u8>,
}

impl Transaction {
    pub fn is_coinbase(&self) -> bool {
        self.vin.len() == 1 && self.vin[0].prevout.is_null() && !self.vin[0].is_zerocoin_spend()
    }

    /// Stake reward transactions spend a real prior output and open with an
    /// empty marker output.
    pub fn is_coinstake(&self) -> bool {
        !self.vin.is_empty()
            && !self.vin[0].prevout.is_null()
            && self.vout.len() >= 2
            && self.vout[0].is_empty()
    }

    pub fn has_zerocoin_spend_inputs(&self) -> bool {
        self.vin.iter().any(TxIn::is_zerocoin_spend)
    }

    /// Sum of output values. Structural validation bounds every output and
    /// the running total, so overflow here means a caller skipped it.
    pub fn value_out(&self) -> Amount {
        self.vout.iter().fold(0, |total, out| {
            total
                .checked_add(out.value)
                .expect("output total within money range")
        })
    }

    pub fn serialized_size(&self) -> usize {
        encode(self).len()
    }

    pub fn txid(&self) -> Hash256 {
        sha256d(&encode(self))
    }
}

impl Encodable for Transaction {
    fn consensus_encode(&self, encoder: &mut Encoder) {
        // Version and type share one little-endian u32, type in the top half.
        let packed = (self.version as u16 as u32) | ((self.tx_type.as_u16() as u32) << 16);
        encoder.write_u32_le(packed);
        encoder.write_varint(self.vin.len() as u64);
        for input in &self.vin {
            input.consensus_encode(encoder);
        }
        encoder.write_varint(self.vout.len() as u64);
        for output in &self.vout {
            output.consensus_encode(encoder);
        }
        encoder.write_u32_le(self.lock_time);
        if self.tx_type.is_special() {
            encoder.write_var_bytes(&self.extra_payload);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normal_tx(vin: Vec<TxIn>, vout: Vec<TxOut>) -> Transaction {
        Transaction {
            version: 1,
            tx_type: TxType::Normal,
            vin,
            vout,
            lock_time: 0,
            extra_payload: Vec::new(),
        }
    }

    fn input(prevout: OutPoint) -> TxIn {
        TxIn {
            prevout,
            script_sig: vec![0x51],
            sequence: TxIn::SEQUENCE_FINAL,
        }
    }

    #[test]
    fn coinbase_detection() {
        let tx = normal_tx(
            vec![TxIn {
                prevout: OutPoint::null(),
                script_sig: vec![0x01, 0x02],
                sequence: TxIn::SEQUENCE_FINAL,
            }],
            vec![TxOut {
                value: 50,
                script_pubkey: vec![0x51],
            }],
        );
        assert!(tx.is_coinbase());
        assert!(!tx.is_coinstake());
    }

    #[test]
    fn zerocoin_spend_is_not_coinbase() {
        let tx = normal_tx(
            vec![TxIn {
                prevout: OutPoint::null(),
                script_sig: vec![OP_ZEROCOINSPEND],
                sequence: TxIn::SEQUENCE_FINAL,
            }],
            vec![TxOut {
                value: 50,
                script_pubkey: vec![0x51],
            }],
        );
        assert!(!tx.is_coinbase());
        assert!(tx.has_zerocoin_spend_inputs());
    }

    #[test]
    fn coinstake_detection() {
        let tx = normal_tx(
            vec![input(OutPoint::new([1u8; 32], 0))],
            vec![
                TxOut {
                    value: 0,
                    script_pubkey: Vec::new(),
                },
                TxOut {
                    value: 100,
                    script_pubkey: vec![0x51],
                },
            ],
        );
        assert!(tx.is_coinstake());
        assert!(!tx.is_coinbase());
    }

    #[test]
    fn value_out_sums_outputs() {
        let tx = normal_tx(
            vec![input(OutPoint::new([1u8; 32], 0))],
            vec![
                TxOut {
                    value: 40,
                    script_pubkey: vec![0x51],
                },
                TxOut {
                    value: 2,
                    script_pubkey: vec![0x52],
                },
            ],
        );
        assert_eq!(tx.value_out(), 42);
    }

    #[test]
    fn payload_serialized_only_for_special_types() {
        let mut tx = normal_tx(vec![input(OutPoint::new([1u8; 32], 0))], Vec::new());
        let normal_size = tx.serialized_size();
        tx.tx_type = TxType::QuorumCommitment;
        tx.extra_payload = vec![0u8; 16];
        // varint length byte plus the payload itself.
        assert_eq!(tx.serialized_size(), normal_size + 17);
    }

    #[test]
    fn txid_changes_with_lock_time() {
        let mut tx = normal_tx(
            vec![input(OutPoint::new([1u8; 32], 0))],
            vec![TxOut {
                value: 1,
                script_pubkey: vec![0x51],
            }],
        );
        let before = tx.txid();
        tx.lock_time = 7;
        assert_ne!(before, tx.txid());
    }
}
