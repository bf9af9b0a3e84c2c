//! Transaction primitives.
//!
//! A `Transaction` is one immutable record fetched from the remote source.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::{EngineError, MoneyCents, ResultEngine};

/// Naive layouts accepted after RFC 3339; interpreted as UTC.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    pub id: String,
    pub occurred_at: DateTime<Utc>,
    pub description: String,
    pub amount: MoneyCents,
}

impl Transaction {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        occurred_at: DateTime<Utc>,
        description: impl Into<String>,
        amount: MoneyCents,
    ) -> Self {
        Self {
            id: id.into(),
            occurred_at,
            description: description.into(),
            amount,
        }
    }

    /// Builds a transaction from the raw fields the remote source sends.
    ///
    /// `date` goes through [`parse_timestamp`], `amount` through
    /// [`MoneyCents::from_major`].
    pub fn from_source(id: &str, date: &str, description: &str, amount: f64) -> ResultEngine<Self> {
        let occurred_at = parse_timestamp(date)?;
        let amount = MoneyCents::from_major(amount)?;
        Ok(Self::new(id, occurred_at, description, amount))
    }
}

/// Parses the source's ISO-like timestamp.
///
/// Tried in order: RFC 3339 with offset, naive date-time (UTC), bare date
/// (midnight UTC).
pub fn parse_timestamp(input: &str) -> ResultEngine<DateTime<Utc>> {
    let trimmed = input.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(parsed.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }

    Err(EngineError::InvalidTimestamp(format!(
        "unrecognized date: {input:?}"
    )))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn parses_rfc3339_with_offsets() {
        let expected = Utc.with_ymd_and_hms(2024, 11, 5, 10, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2024-11-05T10:30:00.000Z").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-11-05T12:30:00+02:00").unwrap(), expected);
    }

    #[test]
    fn parses_naive_forms_as_utc() {
        let expected = Utc.with_ymd_and_hms(2024, 11, 5, 10, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2024-11-05T10:30:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-11-05 10:30:00").unwrap(), expected);
        assert_eq!(
            parse_timestamp("2024-11-05").unwrap(),
            Utc.with_ymd_and_hms(2024, 11, 5, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn rejects_garbage_dates() {
        assert!(matches!(
            parse_timestamp("yesterday"),
            Err(EngineError::InvalidTimestamp(_))
        ));
        assert!(parse_timestamp("2024-13-40").is_err());
    }

    #[test]
    fn from_source_converts_amount_and_date() {
        let tx = Transaction::from_source("7", "2024-01-02", "Rent", -850.5).unwrap();
        assert_eq!(tx.id, "7");
        assert_eq!(tx.amount.cents(), -85_050);
        assert_eq!(tx.occurred_at, Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap());

        assert!(Transaction::from_source("8", "2024-01-02", "Bad", f64::NAN).is_err());
    }
}
