//! Standard script classification utilities.

use iond_primitives::hash::hash160;

use crate::groups::group_annotation;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScriptType {
    NonStandard,
    PubKey,
    PubKeyHash,
    ScriptHash,
    Multisig,
    NullData,
    GroupedPubKeyHash,
    GroupedScriptHash,
}

/// A locking script's destination. The set is fixed and exhaustively matched
/// wherever it is consumed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Destination {
    None,
    PubKeyHash([u8; 20]),
    ScriptHash([u8; 20]),
}

impl Destination {
    pub fn is_valid(&self) -> bool {
        !matches!(self, Destination::None)
    }
}

const OP_RETURN: u8 = 0x6a;
const OP_DUP: u8 = 0x76;
const OP_EQUAL: u8 = 0x87;
const OP_EQUALVERIFY: u8 = 0x88;
const OP_HASH160: u8 = 0xa9;
const OP_CHECKSIG: u8 = 0xac;
const OP_CHECKMULTISIG: u8 = 0xae;
const OP_1: u8 = 0x51;
const OP_16: u8 = 0x60;

pub fn classify_script(script: &[u8]) -> ScriptType {
    if let Some(annotation) = group_annotation(script) {
        return match classify_plain(annotation.inner) {
            ScriptType::PubKeyHash => ScriptType::GroupedPubKeyHash,
            ScriptType::ScriptHash => ScriptType::GroupedScriptHash,
            _ => ScriptType::NonStandard,
        };
    }
    classify_plain(script)
}

pub fn is_pay_to_script_hash(script: &[u8]) -> bool {
    script.len() == 23 && script[0] == OP_HASH160 && script[1] == 0x14 && script[22] == OP_EQUAL
}

pub fn extract_destination(script: &[u8]) -> Destination {
    match classify_plain(script) {
        ScriptType::PubKeyHash => {
            let mut hash = [0u8; 20];
            hash.copy_from_slice(&script[3..23]);
            Destination::PubKeyHash(hash)
        }
        ScriptType::ScriptHash => {
            let mut hash = [0u8; 20];
            hash.copy_from_slice(&script[2..22]);
            Destination::ScriptHash(hash)
        }
        ScriptType::PubKey => {
            let key_len = script[0] as usize;
            Destination::PubKeyHash(hash160(&script[1..1 + key_len]))
        }
        _ => Destination::None,
    }
}

fn classify_plain(script: &[u8]) -> ScriptType {
    if is_p2pkh(script) {
        ScriptType::PubKeyHash
    } else if is_pay_to_script_hash(script) {
        ScriptType::ScriptHash
    } else if is_null_data(script) {
        ScriptType::NullData
    } else if is_p2pk(script) {
        ScriptType::PubKey
    } else if is_multisig(script) {
        ScriptType::Multisig
    } else {
        ScriptType::NonStandard
    }
}

fn is_p2pkh(script: &[u8]) -> bool {
    script.len() == 25
        && script[0] == OP_DUP
        && script[1] == OP_HASH160
        && script[2] == 0x14
        && script[23] == OP_EQUALVERIFY
        && script[24] == OP_CHECKSIG
}

fn is_p2pk(script: &[u8]) -> bool {
    let key_len = match script.first().copied() {
        Some(len @ 33) => len,
        Some(len @ 65) => len,
        _ => return false,
    };
    script.len() == key_len as usize + 2 && script[script.len() - 1] == OP_CHECKSIG
}

fn is_null_data(script: &[u8]) -> bool {
    script.first() == Some(&OP_RETURN)
}

// OP_m <pubkey>... OP_n OP_CHECKMULTISIG, direct pushes only.
fn is_multisig(script: &[u8]) -> bool {
    if script.len() < 4 {
        return false;
    }
    let required = script[0];
    if !(OP_1..=OP_16).contains(&required) {
        return false;
    }
    if script[script.len() - 1] != OP_CHECKMULTISIG {
        return false;
    }
    let total = script[script.len() - 2];
    if !(required..=OP_16).contains(&total) {
        return false;
    }
    let mut keys = 0usize;
    let mut cursor = 1usize;
    while cursor < script.len() - 2 {
        let len = script[cursor] as usize;
        if len != 33 && len != 65 {
            return false;
        }
        cursor += 1 + len;
        if cursor > script.len() - 2 {
            return false;
        }
        keys += 1;
    }
    usize::from(total - OP_1 + 1) == keys
}
