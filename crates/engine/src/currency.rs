use serde::{Deserialize, Serialize};

/// ISO-like currency code used when displaying money values.
///
/// The remote source does not carry a currency, so amounts are shown in the
/// configured one (default `USD`).
///
/// ## Minor units
///
/// Monetary values are stored as an `i64` number of **minor units** (see `MoneyCents`).
/// Both supported currencies use 2 minor units, so `10.50` ⇄ `1050`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
}
