use std::{fmt, iter::Sum};

use crate::{Currency, EngineError, ResultEngine};

/// Signed money amount represented as **integer cents**.
///
/// The remote source sends amounts as JSON numbers; they are converted once,
/// at the boundary, so totals never accumulate floating-point drift.
///
/// The value is signed:
/// - positive = income / increase
/// - negative = expense / decrease
///
/// # Examples
///
/// ```rust
/// use engine::MoneyCents;
///
/// let amount = MoneyCents::new(24_75);
/// assert_eq!(amount.cents(), 2475);
/// assert_eq!(amount.to_string(), "$24.75");
/// ```
///
/// Converting from the source's major-unit number:
///
/// ```rust
/// use engine::MoneyCents;
///
/// assert_eq!(MoneyCents::from_major(-5.5).unwrap().cents(), -550);
/// assert!(MoneyCents::from_major(f64::NAN).is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct MoneyCents(i64);

impl MoneyCents {
    pub const ZERO: MoneyCents = MoneyCents(0);

    /// Creates a new amount from integer cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Converts a major-unit amount (e.g. `20.25`) to cents, rounding to the
    /// nearest cent.
    pub fn from_major(amount: f64) -> ResultEngine<Self> {
        if !amount.is_finite() {
            return Err(EngineError::InvalidAmount(format!(
                "non-finite amount: {amount}"
            )));
        }

        let cents = (amount * 100.0).round();
        if cents < i64::MIN as f64 || cents >= i64::MAX as f64 {
            return Err(EngineError::InvalidAmount(format!(
                "amount too large: {amount}"
            )));
        }

        Ok(Self(cents as i64))
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Saturating addition, clamps at the `i64` bounds.
    #[must_use]
    pub const fn saturating_add(self, rhs: MoneyCents) -> MoneyCents {
        MoneyCents(self.0.saturating_add(rhs.0))
    }

    /// Formats the amount with the symbol of `currency`.
    ///
    /// `USD` puts the symbol in front (`-$5.50`), `EUR` after (`-5.50€`).
    #[must_use]
    pub fn format(self, currency: Currency) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let major = abs / 100;
        let minor = abs % 100;
        match currency {
            Currency::Usd => format!("{sign}${major}.{minor:02}"),
            Currency::Eur => format!("{sign}{major}.{minor:02}€"),
        }
    }
}

impl fmt::Display for MoneyCents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(Currency::default()))
    }
}

impl Sum for MoneyCents {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(MoneyCents::ZERO, MoneyCents::saturating_add)
    }
}
