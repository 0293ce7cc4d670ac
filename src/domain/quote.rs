use super::currency::CurrencyKind;
use crate::error::CheckoutError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// BTC-equivalent units sold per `BITCOIN_LOT_PRICE`.
const BITCOIN_LOT_SIZE: Decimal = dec!(0.05);
/// USD price of one `BITCOIN_LOT_SIZE` lot.
const BITCOIN_LOT_PRICE: Decimal = dec!(25);
/// USD price of a single USDT unit (25 units per dollar).
const USDT_UNIT_PRICE: Decimal = dec!(0.04);

/// A strictly positive quantity of the purchased currency.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, CheckoutError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(CheckoutError::InvalidInput(format!(
                "amount must be positive, got {value}"
            )))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = CheckoutError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for Amount {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s.trim())
            .map_err(|_| CheckoutError::InvalidInput(format!("amount '{s}' is not a number")))?;
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

/// Intended purchase limits per currency.
///
/// These are reported alongside payment instructions but never used to
/// reject an amount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmountBounds {
    pub min: Decimal,
    pub max: Decimal,
}

impl AmountBounds {
    pub fn for_currency(currency: CurrencyKind) -> Self {
        match currency {
            CurrencyKind::Bitcoin => Self {
                min: dec!(0.05),
                max: dec!(2.0),
            },
            CurrencyKind::Usdt => Self {
                min: dec!(500),
                max: dec!(100000),
            },
        }
    }

    pub fn contains(&self, amount: Amount) -> bool {
        (self.min..=self.max).contains(&amount.value())
    }
}

/// A price derived from `(currency, amount)`.
///
/// Fields are private so a quote can only come out of `PriceCalculator`,
/// which keeps the stored price consistent with its inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quote {
    currency: CurrencyKind,
    amount: Amount,
    price: Decimal,
}

impl Quote {
    pub fn currency(&self) -> CurrencyKind {
        self.currency
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    /// The unrounded canonical price.
    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn rounded_price(&self) -> Decimal {
        self.price.round_dp(2)
    }

    pub fn formatted_price(&self) -> String {
        format!("${:.2}", self.rounded_price())
    }
}

/// Fixed-rate price engine.
pub struct PriceCalculator;

impl PriceCalculator {
    pub fn price(currency: CurrencyKind, amount: Amount) -> Decimal {
        match currency {
            CurrencyKind::Bitcoin => (amount.value() / BITCOIN_LOT_SIZE) * BITCOIN_LOT_PRICE,
            CurrencyKind::Usdt => amount.value() * USDT_UNIT_PRICE,
        }
    }

    /// Quotes a raw amount, rejecting anything that is not strictly positive.
    pub fn quote(currency: CurrencyKind, amount: Decimal) -> Result<Quote, CheckoutError> {
        let amount = Amount::new(amount)?;
        Ok(Self::quote_amount(currency, amount))
    }

    pub fn quote_amount(currency: CurrencyKind, amount: Amount) -> Quote {
        Quote {
            currency,
            amount,
            price: Self::price(currency, amount),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitcoin_price() {
        let quote = PriceCalculator::quote(CurrencyKind::Bitcoin, dec!(0.1)).unwrap();
        assert_eq!(quote.price(), dec!(50));

        let quote = PriceCalculator::quote(CurrencyKind::Bitcoin, dec!(0.05)).unwrap();
        assert_eq!(quote.price(), dec!(25));

        let quote = PriceCalculator::quote(CurrencyKind::Bitcoin, dec!(2.0)).unwrap();
        assert_eq!(quote.price(), dec!(1000));
    }

    #[test]
    fn test_usdt_price() {
        let quote = PriceCalculator::quote(CurrencyKind::Usdt, dec!(1000)).unwrap();
        assert_eq!(quote.price(), dec!(40));

        let quote = PriceCalculator::quote(CurrencyKind::Usdt, dec!(25)).unwrap();
        assert_eq!(quote.price(), dec!(1));
    }

    #[test]
    fn test_price_matches_formula_for_many_amounts() {
        for cents in 1..500 {
            let amount = Decimal::new(cents, 2);
            let btc = PriceCalculator::quote(CurrencyKind::Bitcoin, amount).unwrap();
            assert_eq!(btc.price(), (amount / dec!(0.05)) * dec!(25));
            let usdt = PriceCalculator::quote(CurrencyKind::Usdt, amount).unwrap();
            assert_eq!(usdt.price(), amount * dec!(0.04));
        }
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        assert!(matches!(
            PriceCalculator::quote(CurrencyKind::Bitcoin, Decimal::ZERO),
            Err(CheckoutError::InvalidInput(_))
        ));
        assert!(matches!(
            PriceCalculator::quote(CurrencyKind::Usdt, dec!(-1)),
            Err(CheckoutError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_non_numeric_amount_rejected() {
        assert!(matches!(
            "abc".parse::<Amount>(),
            Err(CheckoutError::InvalidInput(_))
        ));
        assert_eq!("0.1".parse::<Amount>().unwrap().value(), dec!(0.1));
    }

    #[test]
    fn test_rounding_is_display_only() {
        let quote = PriceCalculator::quote(CurrencyKind::Usdt, dec!(0.126)).unwrap();
        assert_eq!(quote.price(), dec!(0.00504));
        assert_eq!(quote.rounded_price(), dec!(0.01));
        assert_eq!(quote.formatted_price(), "$0.01");
    }

    #[test]
    fn test_bounds_are_advisory() {
        let bounds = AmountBounds::for_currency(CurrencyKind::Usdt);
        assert!(!bounds.contains(Amount::new(dec!(100)).unwrap()));
        assert!(bounds.contains(Amount::new(dec!(500)).unwrap()));
        // Out-of-range amounts still quote.
        assert!(PriceCalculator::quote(CurrencyKind::Usdt, dec!(100)).is_ok());
    }
}
