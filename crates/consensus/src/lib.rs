//! Consensus constants, parameters, and money rules.

pub mod constants;
pub mod money;
pub mod params;

pub use params::{consensus_params, ConsensusParams, Network};

pub type Hash256 = [u8; 32];
