//! Token group script annotations.
//!
//! A grouped output prefixes an otherwise standard locking script with the
//! group id, a serialized quantity, and `OP_GROUP`. Authority outputs, which
//! grant issuance and administration rights over the group, mark the top bit
//! of the quantity field.

pub const OP_GROUP: u8 = 0xc3;

/// Quantity bit marking a group authority output.
pub const GROUP_AUTHORITY_FLAG: u64 = 1 << 63;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GroupAnnotation<'a> {
    pub group_id: &'a [u8],
    pub quantity: u64,
    /// The standard locking script following the annotation.
    pub inner: &'a [u8],
}

impl GroupAnnotation<'_> {
    pub fn is_authority(&self) -> bool {
        self.quantity & GROUP_AUTHORITY_FLAG != 0
    }
}

/// Parse the group annotation prefix, if present and well formed.
pub fn group_annotation(script: &[u8]) -> Option<GroupAnnotation<'_>> {
    let (group_id, rest) = read_direct_push(script)?;
    if group_id.len() != 20 && group_id.len() != 32 {
        return None;
    }
    let (quantity_bytes, rest) = read_direct_push(rest)?;
    let quantity = decode_quantity(quantity_bytes)?;
    let (&opcode, inner) = rest.split_first()?;
    if opcode != OP_GROUP {
        return None;
    }
    Some(GroupAnnotation {
        group_id,
        quantity,
        inner,
    })
}

pub fn is_grouped_authority(script: &[u8]) -> bool {
    group_annotation(script).is_some_and(|annotation| annotation.is_authority())
}

fn read_direct_push(script: &[u8]) -> Option<(&[u8], &[u8])> {
    let (&opcode, rest) = script.split_first()?;
    let len = opcode as usize;
    if !(0x01..=0x4b).contains(&len) || rest.len() < len {
        return None;
    }
    Some(rest.split_at(len))
}

// Quantities are minimally serialized as 2, 4, or 8 little-endian bytes.
fn decode_quantity(bytes: &[u8]) -> Option<u64> {
    match bytes.len() {
        2 => Some(u16::from_le_bytes(bytes.try_into().ok()?) as u64),
        4 => Some(u32::from_le_bytes(bytes.try_into().ok()?) as u64),
        8 => Some(u64::from_le_bytes(bytes.try_into().ok()?)),
        _ => None,
    }
}
