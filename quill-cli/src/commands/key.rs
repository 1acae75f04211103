//! Network selection and key loading shared by every command.

use clap::Args;
use quill::Network;
use quill_eth::Wallet;
use zeroize::Zeroizing;

/// Target network, with optional overrides of its parameters.
#[derive(Args, Debug)]
pub struct NetworkArgs {
    /// Named network: mainnet, goerli or sepolia.
    #[arg(long, global = true, env = "QUILL_NETWORK", default_value = "mainnet")]
    pub network: Network,

    /// Override the chain id used for replay protection.
    #[arg(long, global = true, env = "QUILL_CHAIN_ID")]
    pub chain_id: Option<u64>,

    /// Override the BIP-44 coin type used for derivation.
    #[arg(long, global = true, env = "QUILL_COIN_TYPE")]
    pub coin_type: Option<u32>,
}

impl NetworkArgs {
    /// The named network with any overrides applied.
    ///
    /// A `--chain-id` of a known network brings that network's coin type
    /// unless `--coin-type` is also given.
    pub fn resolve(&self) -> Network {
        let base = match self.chain_id {
            Some(id) => Network::from_chain_id(id)
                .unwrap_or_else(|| Network::new(id, self.network.coin_type())),
            None => self.network,
        };
        Network::new(base.chain_id(), self.coin_type.unwrap_or(base.coin_type()))
    }
}

/// Where the private key comes from. Exactly one must be given.
#[derive(Args)]
pub struct KeySource {
    /// BIP-32 seed in hex (16, 32 or 64 bytes).
    #[arg(long, env = "QUILL_SEED", hide_env_values = true)]
    pub seed: Option<String>,

    /// BIP-39 mnemonic phrase.
    #[arg(long, env = "QUILL_MNEMONIC", hide_env_values = true)]
    pub mnemonic: Option<String>,

    /// BIP-39 passphrase for the mnemonic.
    #[arg(long, requires = "mnemonic", conflicts_with_all = ["seed", "key"])]
    pub passphrase: Option<String>,

    /// Private key in hex (with or without 0x prefix).
    #[arg(long, env = "QUILL_PRIVATE_KEY", hide_env_values = true)]
    pub key: Option<String>,
}

impl KeySource {
    /// Build the wallet from whichever source was given.
    pub fn load(
        self,
        network: Network,
        debug: bool,
    ) -> Result<Wallet, Box<dyn std::error::Error>> {
        let from_mnemonic = self.seed.is_none() && self.mnemonic.is_some();
        if self.passphrase.is_some() && !from_mnemonic {
            return Err("--passphrase only applies to --mnemonic".into());
        }
        let wallet = match (self.seed, self.mnemonic, self.key) {
            (Some(seed), _, _) => {
                let seed = Zeroizing::new(seed);
                let bytes = Zeroizing::new(quill::decode_hex(&seed)?);
                tracing::debug!(%network, "deriving key from seed");
                Wallet::from_seed(&bytes, network, debug)?
            }
            (None, Some(mnemonic), _) => {
                let mnemonic = Zeroizing::new(mnemonic);
                let passphrase = self.passphrase.map(Zeroizing::new);
                tracing::debug!(%network, "deriving key from mnemonic");
                let passphrase = passphrase.as_deref().map(String::as_str);
                Wallet::from_mnemonic(&mnemonic, passphrase, network, debug)?
            }
            (None, None, Some(key)) => {
                let key = Zeroizing::new(key);
                tracing::debug!(%network, "importing private key");
                Wallet::from_private_key(network, &key, debug)?
            }
            (None, None, None) => return Err("no key source given".into()),
        };
        Ok(wallet)
    }
}

/// Human-readable network label, e.g. `mainnet (chain 1, coin 60)`.
pub fn describe(network: Network) -> String {
    format!(
        "{network} (chain {}, coin {})",
        network.chain_id(),
        network.coin_type()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network_args(
        network: Network,
        chain_id: Option<u64>,
        coin_type: Option<u32>,
    ) -> NetworkArgs {
        NetworkArgs {
            network,
            chain_id,
            coin_type,
        }
    }

    #[test]
    fn test_resolve_named() {
        assert_eq!(network_args(Network::GOERLI, None, None).resolve(), Network::GOERLI);
    }

    #[test]
    fn test_resolve_overrides() {
        let network = network_args(Network::MAINNET, Some(1337), Some(1)).resolve();
        assert_eq!(network.chain_id(), 1337);
        assert_eq!(network.coin_type(), 1);
    }

    #[test]
    fn test_resolve_known_chain_id() {
        let network = network_args(Network::MAINNET, Some(11_155_111), None).resolve();
        assert_eq!(network, Network::SEPOLIA);

        let network = network_args(Network::MAINNET, Some(5), Some(60)).resolve();
        assert_eq!(network, Network::new(5, 60));

        let network = network_args(Network::GOERLI, Some(1337), None).resolve();
        assert_eq!(network, Network::new(1337, 1));
    }

    #[test]
    fn test_load_seed() {
        let source = KeySource {
            seed: Some(format!("0x{}", "00".repeat(64))),
            mnemonic: None,
            passphrase: None,
            key: None,
        };
        let wallet = source.load(Network::MAINNET, false).unwrap();
        assert_eq!(wallet.address(), "0xb73F8Cc7b63C5Ed98d6F7C7ba59C8094972B1166");
    }

    #[test]
    fn test_load_bad_seed_hex() {
        let source = KeySource {
            seed: Some("0xnope".into()),
            mnemonic: None,
            passphrase: None,
            key: None,
        };
        assert!(source.load(Network::MAINNET, false).is_err());
    }

    #[test]
    fn test_load_repeated_prefix() {
        let source = KeySource {
            seed: Some(format!("0x0x{}", "00".repeat(64))),
            mnemonic: None,
            passphrase: None,
            key: None,
        };
        assert!(source.load(Network::MAINNET, false).is_err());
    }

    #[test]
    fn test_load_passphrase_without_mnemonic() {
        let source = KeySource {
            seed: Some("00".repeat(64)),
            mnemonic: None,
            passphrase: Some("TREZOR".into()),
            key: None,
        };
        assert!(source.load(Network::MAINNET, false).is_err());

        let source = KeySource {
            seed: None,
            mnemonic: None,
            passphrase: Some("TREZOR".into()),
            key: Some("46".repeat(32)),
        };
        assert!(source.load(Network::MAINNET, false).is_err());
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe(Network::MAINNET), "mainnet (chain 1, coin 60)");
        assert_eq!(describe(Network::new(1337, 1)), "chain-1337 (chain 1337, coin 1)");
    }
}
