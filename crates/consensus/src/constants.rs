//! Consensus-wide constants shared across validation.

/// The maximum allowed size for a serialized block under legacy rules, in bytes (network rule).
pub const MAX_LEGACY_BLOCK_SIZE: u32 = 2_000_000;
/// The maximum allowed size of the extra payload carried by special transaction types.
pub const MAX_TX_EXTRA_PAYLOAD: usize = 10_000;
/// The maximum allowed number of signature check operations in a block (network rule).
pub const MAX_BLOCK_SIGOPS: u32 = MAX_LEGACY_BLOCK_SIZE / 50;

/// Lock-time values at or above this threshold are unix timestamps, below it block heights.
pub const LOCKTIME_THRESHOLD: i64 = 500_000_000;

/// Interpret sequence numbers as relative lock-times (BIP68).
pub const LOCKTIME_VERIFY_SEQUENCE: u32 = 1 << 0;
/// Use median-time-past instead of the block timestamp for time-based lock-times.
pub const LOCKTIME_MEDIAN_TIME_PAST: u32 = 1 << 1;
/// Standard locktime verify flags used by non-consensus code.
pub const STANDARD_LOCKTIME_VERIFY_FLAGS: u32 =
    LOCKTIME_VERIFY_SEQUENCE | LOCKTIME_MEDIAN_TIME_PAST;

/// While spending at or below this height, reward maturity uses the bootstrap depth.
pub const BOOTSTRAP_MATURITY_END_HEIGHT: i32 = 100;
/// Reduced reward maturity depth during chain bootstrap.
pub const BOOTSTRAP_MATURITY_DEPTH: i32 = 10;
