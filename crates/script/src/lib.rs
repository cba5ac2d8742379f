//! Script classification and signature-operation accounting.
//!
//! Script execution lives outside this workspace; validation only needs
//! template classification and sigop counting over raw script bytes.

pub mod groups;
pub mod sigops;
pub mod standard;

pub use groups::is_grouped_authority;
pub use sigops::{p2sh_sigop_count, sigop_count, MAX_PUBKEYS_PER_MULTISIG};
pub use standard::{
    classify_script, extract_destination, is_pay_to_script_hash, Destination, ScriptType,
};

/// Verify-flag bit enabling pay-to-script-hash sigop accounting.
pub const VERIFY_P2SH: u32 = 1 << 0;
