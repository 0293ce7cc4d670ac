use crate::error::CheckoutError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The currencies a buyer can purchase.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy)]
pub enum CurrencyKind {
    Bitcoin,
    #[serde(rename = "USDT")]
    Usdt,
}

/// Deposit rails. Only used to pick which static address is shown.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy)]
#[serde(rename_all = "UPPERCASE")]
pub enum NetworkKind {
    Trc20,
    Bep20,
}

impl FromStr for CurrencyKind {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bitcoin" | "btc" => Ok(Self::Bitcoin),
            "usdt" => Ok(Self::Usdt),
            other => Err(CheckoutError::InvalidInput(format!(
                "unrecognized currency '{other}'"
            ))),
        }
    }
}

impl FromStr for NetworkKind {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trc20" => Ok(Self::Trc20),
            "bep20" => Ok(Self::Bep20),
            other => Err(CheckoutError::InvalidInput(format!(
                "unrecognized network '{other}'"
            ))),
        }
    }
}

impl fmt::Display for CurrencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bitcoin => write!(f, "Bitcoin"),
            Self::Usdt => write!(f, "USDT"),
        }
    }
}

impl fmt::Display for NetworkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trc20 => write!(f, "TRC20"),
            Self::Bep20 => write!(f, "BEP20"),
        }
    }
}
