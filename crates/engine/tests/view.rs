use chrono::{NaiveDate, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

use engine::{
    DateRange, Ledger, MoneyCents, PageSize, Sort, SortDirection, SortKey, Transaction, ViewQuery,
    derive_view,
};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 11, d).unwrap()
}

/// 12 transactions over 3 days (4 per day), amounts all distinct.
fn twelve_over_three_days() -> Vec<Transaction> {
    (0..12)
        .map(|i| {
            let d = 5 + (i / 4) as u32;
            let hour = 6 + (i % 4) as u32 * 4;
            Transaction::new(
                format!("tx-{i:02}"),
                Utc.with_ymd_and_hms(2024, 11, d, hour, 0, 0).unwrap(),
                format!("purchase {i}"),
                MoneyCents::new((i as i64 * 37 % 11 - 5) * 100 + i as i64),
            )
        })
        .collect()
}

fn ids(rows: &[&Transaction]) -> Vec<String> {
    rows.iter().map(|tx| tx.id.clone()).collect()
}

#[test]
fn twelve_rows_paginate_into_three_pages_of_five() {
    let mut ledger = Ledger::new(PageSize::Five);
    ledger.replace(twelve_over_three_days());

    let view = ledger.view();
    assert_eq!(view.rows.len(), 5);
    assert_eq!((view.page, view.page_count), (1, 3));

    ledger.next_page();
    ledger.next_page();
    let view = ledger.view();
    assert_eq!((view.page, view.page_count), (3, 3));
    assert_eq!(ids(&view.rows), ["tx-10", "tx-11"]);

    assert!(!ledger.next_page());
    assert_eq!(ledger.view().page, 3);
}

#[test]
fn range_filter_keeps_exactly_the_rows_inside() {
    let items = twelve_over_three_days();
    let range = DateRange::days(day(6), day(7), Tz::UTC).unwrap();
    let query = ViewQuery {
        range: Some(range),
        page_size: PageSize::Fifteen,
        page: 1,
        ..ViewQuery::default()
    };

    let view = derive_view(&items, &query);
    assert_eq!(view.summary.count, 8);
    for tx in &view.rows {
        assert!(range.start() <= tx.occurred_at && tx.occurred_at <= range.end());
    }
    let excluded = items
        .iter()
        .filter(|tx| !view.rows.iter().any(|row| row.id == tx.id));
    for tx in excluded {
        assert!(!range.contains(tx.occurred_at));
    }
}

#[test]
fn single_day_range_includes_first_and_last_millisecond() {
    let start = Utc.with_ymd_and_hms(2024, 11, 6, 0, 0, 0).unwrap();
    let items = vec![
        Transaction::new("before", start - TimeDelta::milliseconds(1), "", MoneyCents::new(1)),
        Transaction::new("first", start, "", MoneyCents::new(2)),
        Transaction::new(
            "last",
            start + TimeDelta::days(1) - TimeDelta::milliseconds(1),
            "",
            MoneyCents::new(3),
        ),
        Transaction::new("after", start + TimeDelta::days(1), "", MoneyCents::new(4)),
    ];

    let mut ledger = Ledger::new(PageSize::Ten);
    ledger.replace(items);
    ledger.set_range(Some(DateRange::single_day(day(6), Tz::UTC)));

    assert_eq!(ids(&ledger.view().rows), ["first", "last"]);
}

#[test]
fn amount_ascending_and_descending_are_reverses() {
    let items = twelve_over_three_days();
    let asc = derive_view(
        &items,
        &ViewQuery {
            sort: Some(Sort::ascending(SortKey::Amount)),
            page_size: PageSize::Fifteen,
            page: 1,
            ..ViewQuery::default()
        },
    );
    let desc = derive_view(
        &items,
        &ViewQuery {
            sort: Some(Sort {
                key: SortKey::Amount,
                direction: SortDirection::Desc,
            }),
            page_size: PageSize::Fifteen,
            page: 1,
            ..ViewQuery::default()
        },
    );

    let mut reversed = ids(&desc.rows);
    reversed.reverse();
    assert_eq!(ids(&asc.rows), reversed);
    assert!(asc.rows.windows(2).all(|w| w[0].amount <= w[1].amount));
}

#[test]
fn setting_a_range_resets_to_page_one() {
    let mut ledger = Ledger::new(PageSize::Five);
    ledger.replace(twelve_over_three_days());
    ledger.next_page();
    assert_eq!(ledger.view().page, 2);

    ledger.set_range(Some(DateRange::single_day(day(5), Tz::UTC)));
    let view = ledger.view();
    assert_eq!((view.page, view.page_count), (1, 1));
    assert_eq!(view.summary.count, 4);

    ledger.set_range(None);
    assert_eq!(ledger.view().summary.count, 12);
}

#[test]
fn empty_filter_result_still_reports_one_page() {
    let mut ledger = Ledger::new(PageSize::Five);
    ledger.replace(twelve_over_three_days());
    ledger.set_range(Some(DateRange::single_day(day(20), Tz::UTC)));

    let view = ledger.view();
    assert!(view.rows.is_empty());
    assert_eq!((view.page, view.page_count), (1, 1));
    assert_eq!(view.summary.total, MoneyCents::ZERO);
}

#[test]
fn summary_total_of_mixed_amounts() {
    let when = Utc.with_ymd_and_hms(2024, 11, 5, 9, 0, 0).unwrap();
    let items: Vec<Transaction> = [10.00, -5.50, 20.25]
        .into_iter()
        .enumerate()
        .map(|(i, amount)| {
            Transaction::new(
                i.to_string(),
                when,
                "",
                MoneyCents::from_major(amount).unwrap(),
            )
        })
        .collect();

    let view = derive_view(&items, &ViewQuery::default());
    assert_eq!(view.summary.count, 3);
    assert_eq!(view.summary.total.cents(), 2475);
    assert_eq!(view.summary.total.to_string(), "$24.75");
}
