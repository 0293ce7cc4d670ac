use super::currency::{CurrencyKind, NetworkKind};
use serde::{Deserialize, Serialize};

/// A deposit address the buyer is told to pay into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentAddress {
    pub currency: CurrencyKind,
    pub network: NetworkKind,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub network: NetworkKind,
    pub address: String,
}

/// Static deposit-address configuration.
///
/// Loaded once at startup (see `interfaces::json::AddressDirectoryReader`)
/// and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressDirectory {
    pub bitcoin: DirectoryEntry,
    pub usdt_trc20: DirectoryEntry,
    pub usdt_bep20: DirectoryEntry,
}

impl Default for AddressDirectory {
    fn default() -> Self {
        Self {
            bitcoin: DirectoryEntry {
                network: NetworkKind::Trc20,
                address: "unconfigured-bitcoin-trc20".to_string(),
            },
            usdt_trc20: DirectoryEntry {
                network: NetworkKind::Trc20,
                address: "unconfigured-usdt-trc20".to_string(),
            },
            usdt_bep20: DirectoryEntry {
                network: NetworkKind::Bep20,
                address: "unconfigured-usdt-bep20".to_string(),
            },
        }
    }
}

/// Applies the address selection rules on top of an `AddressDirectory`.
#[derive(Debug, Clone, Default)]
pub struct PaymentAddressResolver {
    directory: AddressDirectory,
}

impl PaymentAddressResolver {
    pub fn new(directory: AddressDirectory) -> Self {
        Self { directory }
    }

    /// Bitcoin always settles over TRC20. USDT uses BEP20 only when it is
    /// explicitly requested and falls back to TRC20 otherwise.
    pub fn resolve(
        &self,
        currency: CurrencyKind,
        requested_network: Option<NetworkKind>,
    ) -> PaymentAddress {
        let (network, entry) = match (currency, requested_network) {
            (CurrencyKind::Bitcoin, _) => (NetworkKind::Trc20, &self.directory.bitcoin),
            (CurrencyKind::Usdt, Some(NetworkKind::Bep20)) => {
                (NetworkKind::Bep20, &self.directory.usdt_bep20)
            }
            (CurrencyKind::Usdt, _) => (NetworkKind::Trc20, &self.directory.usdt_trc20),
        };

        PaymentAddress {
            currency,
            network,
            address: entry.address.clone(),
        }
    }
}
