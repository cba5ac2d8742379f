//! Finality and BIP68 relative lock-time evaluation.

use iond_consensus::constants::{LOCKTIME_THRESHOLD, LOCKTIME_VERIFY_SEQUENCE};
use iond_primitives::{Transaction, TxIn};

/// Chain history as seen from one block.
///
/// Every block except the chain origin exposes its immediate predecessor;
/// lock evaluation is never called on the origin block.
pub trait BlockAncestry {
    fn height(&self) -> i32;
    fn parent(&self) -> Option<&Self>;
    fn median_time_past(&self) -> i64;

    /// The ancestor at `height`, reached by walking parents. `None` if
    /// `height` is above this block or below the chain this block knows.
    fn ancestor(&self, height: i32) -> Option<&Self>
    where
        Self: Sized,
    {
        if height > self.height() {
            return None;
        }
        let mut block = self;
        while block.height() > height {
            block = block.parent()?;
        }
        Some(block)
    }
}

/// The earliest point at which all relative lock-time constraints of a
/// transaction are satisfied. Both fields use last-invalid semantics, so -1
/// means unconstrained, matching absolute lock-time convention.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SequenceLockBound {
    pub min_height: i32,
    pub min_time: i64,
}

impl SequenceLockBound {
    pub const UNCONSTRAINED: SequenceLockBound = SequenceLockBound {
        min_height: -1,
        min_time: -1,
    };
}

/// Whether `tx` is final for a block at `block_height`/`block_time`.
///
/// A lock-time below [`LOCKTIME_THRESHOLD`] is compared against the height,
/// otherwise against the time. Inputs all carrying the final sequence
/// sentinel force finality regardless of lock-time.
pub fn is_final_tx(tx: &Transaction, block_height: i32, block_time: i64) -> bool {
    if tx.lock_time == 0 {
        return true;
    }
    let lock_time = i64::from(tx.lock_time);
    let cutoff = if lock_time < LOCKTIME_THRESHOLD {
        i64::from(block_height)
    } else {
        block_time
    };
    if lock_time < cutoff {
        return true;
    }
    tx.vin
        .iter()
        .all(|input| input.sequence == TxIn::SEQUENCE_FINAL)
}

/// Compute the height/time bound implied by `tx`'s sequence numbers.
///
/// `prev_heights` holds the creation height of each input's coin,
/// positionally aligned with `tx.vin`; entries for disabled inputs are
/// zeroed in place since their height is irrelevant. Enforcement requires
/// transaction version >= 2 (compared as unsigned) and the
/// [`LOCKTIME_VERIFY_SEQUENCE`] flag; otherwise the bound is unconstrained.
pub fn calculate_sequence_locks<B: BlockAncestry>(
    tx: &Transaction,
    flags: u32,
    prev_heights: &mut [i32],
    block: &B,
) -> SequenceLockBound {
    assert_eq!(prev_heights.len(), tx.vin.len());

    let mut bound = SequenceLockBound::UNCONSTRAINED;

    // Signed version compared as unsigned so the negative half of the range
    // still opts in to BIP68.
    let enforce_bip68 = (tx.version as u16) >= 2 && flags & LOCKTIME_VERIFY_SEQUENCE != 0;
    if !enforce_bip68 {
        return bound;
    }

    for (input, prev_height) in tx.vin.iter().zip(prev_heights.iter_mut()) {
        if input.sequence & TxIn::SEQUENCE_LOCKTIME_DISABLE_FLAG != 0 {
            *prev_height = 0;
            continue;
        }

        let coin_height = *prev_height;
        let masked = input.sequence & TxIn::SEQUENCE_LOCKTIME_MASK;

        if input.sequence & TxIn::SEQUENCE_LOCKTIME_TYPE_FLAG != 0 {
            // Time-based locks are measured from the smallest timestamp the
            // coin's block could have carried, the median time past of the
            // block before it.
            let coin_time = block
                .ancestor(coin_height.saturating_sub(1).max(0))
                .expect("coin height within known ancestry")
                .median_time_past();
            // Subtract 1: the lock encodes the first valid time, the bound
            // carries the last invalid one.
            let min_time = coin_time + i64::from(masked << TxIn::SEQUENCE_LOCKTIME_GRANULARITY) - 1;
            bound.min_time = bound.min_time.max(min_time);
        } else {
            bound.min_height = bound.min_height.max(coin_height + masked as i32 - 1);
        }
    }

    bound
}

/// Whether `bound` is satisfied for inclusion in `block`.
///
/// `block` must have a parent; call sites never evaluate locks against the
/// chain origin.
pub fn evaluate_sequence_locks<B: BlockAncestry>(block: &B, bound: SequenceLockBound) -> bool {
    let parent = block.parent().expect("lock evaluation below chain origin");
    bound.min_height < block.height() && bound.min_time < parent.median_time_past()
}

/// Calculate and evaluate in one step.
pub fn sequence_locks<B: BlockAncestry>(
    tx: &Transaction,
    flags: u32,
    prev_heights: &mut [i32],
    block: &B,
) -> bool {
    evaluate_sequence_locks(block, calculate_sequence_locks(tx, flags, prev_heights, block))
}
