//! Signature operation counting over raw scripts.

pub const MAX_PUBKEYS_PER_MULTISIG: u32 = 20;

const OP_PUSHDATA1: u8 = 0x4c;
const OP_PUSHDATA2: u8 = 0x4d;
const OP_PUSHDATA4: u8 = 0x4e;
const OP_1: u8 = 0x51;
const OP_16: u8 = 0x60;
const OP_CHECKSIG: u8 = 0xac;
const OP_CHECKSIGVERIFY: u8 = 0xad;
const OP_CHECKMULTISIG: u8 = 0xae;
const OP_CHECKMULTISIGVERIFY: u8 = 0xaf;

/// Count signature check operations in a script.
///
/// With `accurate` set, CHECKMULTISIG is charged the key count taken from the
/// preceding small-integer opcode (post-P2SH accounting); otherwise the
/// worst case of [`MAX_PUBKEYS_PER_MULTISIG`] is charged. Counting stops at
/// the first truncated push.
pub fn sigop_count(script: &[u8], accurate: bool) -> u32 {
    let mut count = 0u32;
    let mut cursor = 0usize;
    let mut last_opcode = 0xffu8;
    while let Some((opcode, _, next)) = parse_op(script, cursor) {
        match opcode {
            OP_CHECKSIG | OP_CHECKSIGVERIFY => count += 1,
            OP_CHECKMULTISIG | OP_CHECKMULTISIGVERIFY => {
                if accurate && (OP_1..=OP_16).contains(&last_opcode) {
                    count += (last_opcode - OP_1 + 1) as u32;
                } else {
                    count += MAX_PUBKEYS_PER_MULTISIG;
                }
            }
            _ => {}
        }
        last_opcode = opcode;
        cursor = next;
    }
    count
}

/// Sigops implied by spending a P2SH output with `script_sig`.
///
/// The scriptSig must be push-only; its final push is interpreted as the
/// redeem script and counted in accurate mode. Anything else counts zero.
pub fn p2sh_sigop_count(script_sig: &[u8]) -> u32 {
    let mut cursor = 0usize;
    let mut redeem: &[u8] = &[];
    while cursor < script_sig.len() {
        let Some((opcode, data, next)) = parse_op(script_sig, cursor) else {
            return 0;
        };
        if opcode > OP_16 {
            return 0;
        }
        redeem = data;
        cursor = next;
    }
    sigop_count(redeem, true)
}

// Decode one opcode and its pushed data, if any. None on truncated pushes.
fn parse_op(script: &[u8], cursor: usize) -> Option<(u8, &[u8], usize)> {
    let opcode = *script.get(cursor)?;
    let mut cursor = cursor + 1;
    let len = match opcode {
        0x01..=0x4b => opcode as usize,
        OP_PUSHDATA1 => {
            let len = *script.get(cursor)? as usize;
            cursor += 1;
            len
        }
        OP_PUSHDATA2 => {
            let bytes = script.get(cursor..cursor + 2)?;
            cursor += 2;
            u16::from_le_bytes([bytes[0], bytes[1]]) as usize
        }
        OP_PUSHDATA4 => {
            let bytes = script.get(cursor..cursor + 4)?;
            cursor += 4;
            u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize
        }
        _ => 0,
    };
    let data = script.get(cursor..cursor + len)?;
    Some((opcode, data, cursor + len))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p2pkh() -> Vec<u8> {
        let mut script = vec![0x76, 0xa9, 0x14];
        script.extend_from_slice(&[0x11; 20]);
        script.extend_from_slice(&[0x88, OP_CHECKSIG]);
        script
    }

    fn multisig_2_of_3() -> Vec<u8> {
        let mut script = vec![0x52];
        for byte in [2u8, 3, 4] {
            script.push(33);
            script.extend_from_slice(&[byte; 33]);
        }
        script.extend_from_slice(&[0x53, OP_CHECKMULTISIG]);
        script
    }

    #[test]
    fn checksig_counts_one() {
        assert_eq!(sigop_count(&p2pkh(), false), 1);
        assert_eq!(sigop_count(&p2pkh(), true), 1);
    }

    #[test]
    fn multisig_worst_case_vs_accurate() {
        let script = multisig_2_of_3();
        assert_eq!(sigop_count(&script, false), MAX_PUBKEYS_PER_MULTISIG);
        assert_eq!(sigop_count(&script, true), 3);
    }

    #[test]
    fn truncated_push_stops_counting() {
        let script = vec![OP_CHECKSIG, 0x4b, 0x00];
        assert_eq!(sigop_count(&script, false), 1);
    }

    #[test]
    fn p2sh_counts_redeem_script() {
        let redeem = multisig_2_of_3();
        let mut script_sig = vec![0x00];
        script_sig.push(OP_PUSHDATA1);
        script_sig.push(redeem.len() as u8);
        script_sig.extend_from_slice(&redeem);
        assert_eq!(p2sh_sigop_count(&script_sig), 3);
    }

    #[test]
    fn p2sh_rejects_non_push_script_sig() {
        let script_sig = vec![OP_CHECKSIG];
        assert_eq!(p2sh_sigop_count(&script_sig), 0);
    }
}
