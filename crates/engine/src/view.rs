//! The derived-view pipeline: filter, then sort, then paginate.
//!
//! Everything here is pure and total; [`derive_view`] never fails.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{DateRange, EngineError, MoneyCents, Transaction};

/// Columns the table can be sorted by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKey {
    Date,
    Amount,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sort {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Sort {
    #[must_use]
    pub fn ascending(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Asc,
        }
    }

    fn compare(self, a: &Transaction, b: &Transaction) -> Ordering {
        let ord = match self.key {
            SortKey::Date => a.occurred_at.cmp(&b.occurred_at),
            SortKey::Amount => a.amount.cmp(&b.amount),
        };
        match self.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }
}

/// Rows per page. Only 5, 10 and 15 are offered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PageSize {
    #[default]
    Five,
    Ten,
    Fifteen,
}

impl PageSize {
    #[must_use]
    pub const fn rows(self) -> usize {
        match self {
            Self::Five => 5,
            Self::Ten => 10,
            Self::Fifteen => 15,
        }
    }

    /// 5 → 10 → 15 → 5.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Five => Self::Ten,
            Self::Ten => Self::Fifteen,
            Self::Fifteen => Self::Five,
        }
    }
}

impl TryFrom<u8> for PageSize {
    type Error = EngineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            5 => Ok(Self::Five),
            10 => Ok(Self::Ten),
            15 => Ok(Self::Fifteen),
            other => Err(EngineError::InvalidPageSize(format!(
                "must be 5, 10 or 15, got {other}"
            ))),
        }
    }
}

impl From<PageSize> for u8 {
    fn from(value: PageSize) -> Self {
        value.rows() as u8
    }
}

/// The user's current selections.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewQuery {
    pub range: Option<DateRange>,
    pub sort: Option<Sort>,
    /// 1-based; clamped when the view is derived.
    pub page: usize,
    pub page_size: PageSize,
}

/// Totals over the filtered set, independent of pagination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub count: usize,
    pub total: MoneyCents,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DerivedView<'a> {
    /// The page window.
    pub rows: Vec<&'a Transaction>,
    pub summary: Summary,
    /// Effective page after clamping.
    pub page: usize,
    pub page_count: usize,
}

/// `ceil(count / page_size)`, never less than 1.
#[must_use]
pub fn page_count(count: usize, page_size: PageSize) -> usize {
    count.div_ceil(page_size.rows()).max(1)
}

/// Keeps the transactions inside `range`; everything passes without one.
pub fn filter_by_range<'a>(
    transactions: &'a [Transaction],
    range: Option<&DateRange>,
) -> Vec<&'a Transaction> {
    transactions
        .iter()
        .filter(|tx| range.is_none_or(|range| range.contains(tx.occurred_at)))
        .collect()
}

/// Stable sort; equal keys keep their source order in both directions.
pub fn sort_rows(rows: &mut [&Transaction], sort: Sort) {
    rows.sort_by(|a, b| sort.compare(a, b));
}

#[must_use]
pub fn summarize(rows: &[&Transaction]) -> Summary {
    Summary {
        count: rows.len(),
        total: rows.iter().map(|tx| tx.amount).sum(),
    }
}

pub fn derive_view<'a>(transactions: &'a [Transaction], query: &ViewQuery) -> DerivedView<'a> {
    let mut rows = filter_by_range(transactions, query.range.as_ref());
    let summary = summarize(&rows);

    if let Some(sort) = query.sort {
        sort_rows(&mut rows, sort);
    }

    let page_count = page_count(rows.len(), query.page_size);
    let page = query.page.clamp(1, page_count);
    let size = query.page_size.rows();
    let start = (page - 1) * size;
    let window = rows.into_iter().skip(start).take(size).collect();

    DerivedView {
        rows: window,
        summary,
        page,
        page_count,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn tx(id: &str, day: u32, cents: i64) -> Transaction {
        Transaction::new(
            id,
            Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap(),
            format!("tx {id}"),
            MoneyCents::new(cents),
        )
    }

    #[test]
    fn page_count_has_a_floor_of_one() {
        assert_eq!(page_count(0, PageSize::Five), 1);
        assert_eq!(page_count(5, PageSize::Five), 1);
        assert_eq!(page_count(6, PageSize::Five), 2);
        assert_eq!(page_count(12, PageSize::Five), 3);
        assert_eq!(page_count(12, PageSize::Fifteen), 1);
    }

    #[test]
    fn page_size_accepts_only_the_offered_values() {
        assert_eq!(PageSize::try_from(10).unwrap(), PageSize::Ten);
        assert!(PageSize::try_from(7).is_err());
        assert_eq!(PageSize::Fifteen.next(), PageSize::Five);
    }

    #[test]
    fn equal_keys_keep_source_order_in_both_directions() {
        let items = vec![tx("a", 1, 100), tx("b", 2, 100), tx("c", 3, 50)];
        let mut rows: Vec<&Transaction> = items.iter().collect();

        sort_rows(&mut rows, Sort::ascending(SortKey::Amount));
        let ids: Vec<&str> = rows.iter().map(|tx| tx.id.as_str()).collect();
        assert_eq!(ids, ["c", "a", "b"]);

        sort_rows(
            &mut rows,
            Sort {
                key: SortKey::Amount,
                direction: SortDirection::Desc,
            },
        );
        let ids: Vec<&str> = rows.iter().map(|tx| tx.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn out_of_range_page_is_clamped() {
        let items: Vec<Transaction> = (1..=7).map(|i| tx(&i.to_string(), i, 1)).collect();
        let query = ViewQuery {
            page: 9,
            ..ViewQuery::default()
        };
        let view = derive_view(&items, &query);
        assert_eq!(view.page, 2);
        assert_eq!(view.rows.len(), 2);

        let query = ViewQuery {
            page: 0,
            ..ViewQuery::default()
        };
        assert_eq!(derive_view(&items, &query).page, 1);
    }

    #[test]
    fn summary_ignores_pagination() {
        let items: Vec<Transaction> = (1..=7).map(|i| tx(&i.to_string(), i, 100)).collect();
        let view = derive_view(&items, &ViewQuery::default());
        assert_eq!(view.rows.len(), 5);
        assert_eq!(view.summary.count, 7);
        assert_eq!(view.summary.total, MoneyCents::new(700));
    }
}
