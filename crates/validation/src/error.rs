//! Transaction rejection reasons.
//!
//! Every failure carries a stable reject token and a DoS score. Score 100
//! marks protocol violations that can never occur honestly, score 0 marks
//! conditions that arise from reordering or visibility lag and must not
//! penalize the relaying peer.

use iond_consensus::money::Amount;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TxValidationError {
    VinEmpty,
    VoutEmpty,
    Oversize,
    PayloadOversize,
    VoutNegative,
    VoutTooLarge,
    TxOutTotalTooLarge,
    InputsDuplicate,
    BadCoinbaseLength,
    PrevoutNull,
    InputsMissingOrSpent,
    PrematureCoinbaseSpend { depth: i32 },
    PrematureCoinstakeSpend { depth: i32 },
    PrematureAuthoritySpend { required_confirmations: i32 },
    InvalidInputScript,
    InputValuesOutOfRange,
    InBelowOut { value_in: Amount, value_out: Amount },
    FeeOutOfRange,
}

impl TxValidationError {
    /// Stable token reported in protocol-level reject messages.
    pub fn reject_reason(&self) -> &'static str {
        match self {
            Self::VinEmpty => "bad-txns-vin-empty",
            Self::VoutEmpty => "bad-txns-vout-empty",
            Self::Oversize => "bad-txns-oversize",
            Self::PayloadOversize => "bad-txns-payload-oversize",
            Self::VoutNegative => "bad-txns-vout-negative",
            Self::VoutTooLarge => "bad-txns-vout-toolarge",
            Self::TxOutTotalTooLarge => "bad-txns-txouttotal-toolarge",
            Self::InputsDuplicate => "bad-txns-inputs-duplicate",
            Self::BadCoinbaseLength => "bad-cb-length",
            Self::PrevoutNull => "bad-txns-prevout-null",
            Self::InputsMissingOrSpent => "bad-txns-inputs-missingorspent",
            Self::PrematureCoinbaseSpend { .. } => "bad-txns-premature-spend-of-coinbase",
            Self::PrematureCoinstakeSpend { .. } => "bad-txns-premature-spend-of-coinstake",
            Self::PrematureAuthoritySpend { .. } => "bad-txns-premature-use-of-token-authority",
            Self::InvalidInputScript => "bad-txns-inputs-invalid-script",
            Self::InputValuesOutOfRange => "bad-txns-inputvalues-outofrange",
            Self::InBelowOut { .. } => "bad-txns-in-belowout",
            Self::FeeOutOfRange => "bad-txns-fee-outofrange",
        }
    }

    /// Peer penalty on rejection, 0..=100.
    pub fn dos_score(&self) -> u32 {
        match self {
            Self::VinEmpty | Self::VoutEmpty | Self::PrevoutNull => 10,
            Self::Oversize
            | Self::PayloadOversize
            | Self::VoutNegative
            | Self::VoutTooLarge
            | Self::TxOutTotalTooLarge
            | Self::InputsDuplicate
            | Self::BadCoinbaseLength
            | Self::InputsMissingOrSpent
            | Self::InputValuesOutOfRange
            | Self::InBelowOut { .. }
            | Self::FeeOutOfRange => 100,
            Self::PrematureCoinbaseSpend { .. }
            | Self::PrematureCoinstakeSpend { .. }
            | Self::PrematureAuthoritySpend { .. }
            | Self::InvalidInputScript => 0,
        }
    }
}

impl std::fmt::Display for TxValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PrematureCoinbaseSpend { depth } => {
                write!(f, "tried to spend coinbase at depth {depth}")
            }
            Self::PrematureCoinstakeSpend { depth } => {
                write!(f, "tried to spend coinstake at depth {depth}")
            }
            Self::PrematureAuthoritySpend {
                required_confirmations,
            } => write!(
                f,
                "tried to use a token authority before it reached maturity \
                 ({required_confirmations} confirmations)"
            ),
            Self::InvalidInputScript => write!(f, "tried to spend invalid script"),
            Self::InputsMissingOrSpent => write!(f, "inputs missing/spent"),
            Self::InBelowOut {
                value_in,
                value_out,
            } => write!(f, "value in ({value_in}) < value out ({value_out})"),
            other => write!(f, "{}", other.reject_reason()),
        }
    }
}

impl std::error::Error for TxValidationError {}
