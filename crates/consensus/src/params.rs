//! Consensus parameter definitions.

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Network {
    Mainnet,
    Testnet,
    Regtest,
}

#[derive(Clone, Debug)]
pub struct ConsensusParams {
    pub network: Network,
    /// Reward outputs (coinbase and coinstake) may only be spent after this many new blocks.
    pub coinbase_maturity: i32,
    /// Confirmations required before a token group authority output may be used.
    pub op_group_required_confirmations: i32,
    /// Height from which explicitly invalidated scripts are refused as inputs.
    pub pospow_start_height: i32,
}

pub fn consensus_params(network: Network) -> ConsensusParams {
    match network {
        Network::Mainnet => ConsensusParams {
            network: Network::Mainnet,
            coinbase_maturity: 60,
            op_group_required_confirmations: 1,
            pospow_start_height: 1_000_000,
        },
        Network::Testnet => ConsensusParams {
            network: Network::Testnet,
            coinbase_maturity: 15,
            op_group_required_confirmations: 1,
            pospow_start_height: 200,
        },
        Network::Regtest => ConsensusParams {
            network: Network::Regtest,
            coinbase_maturity: 100,
            op_group_required_confirmations: 1,
            pospow_start_height: 0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_network_values() {
        let mainnet = consensus_params(Network::Mainnet);
        assert_eq!(mainnet.coinbase_maturity, 60);
        assert_eq!(mainnet.op_group_required_confirmations, 1);
        assert_eq!(mainnet.pospow_start_height, 1_000_000);

        let testnet = consensus_params(Network::Testnet);
        assert_eq!(testnet.coinbase_maturity, 15);
        assert_eq!(testnet.pospow_start_height, 200);

        let regtest = consensus_params(Network::Regtest);
        assert_eq!(regtest.coinbase_maturity, 100);
        assert_eq!(regtest.pospow_start_height, 0);
    }
}
