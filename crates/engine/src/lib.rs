//! Derived views over a fetched list of transactions.
//!
//! The crate is pure: no I/O, no clocks. The UI feeds a batch into a
//! [`Ledger`], mutates the selections (range, sort, page) and reads back a
//! [`DerivedView`] on every frame.

pub use currency::Currency;
pub use error::EngineError;
pub use ledger::Ledger;
pub use money::MoneyCents;
pub use range::DateRange;
pub use transactions::{Transaction, parse_timestamp};
pub use view::{
    DerivedView, PageSize, Sort, SortDirection, SortKey, Summary, ViewQuery, derive_view,
    filter_by_range, page_count, sort_rows, summarize,
};

mod currency;
mod error;
mod ledger;
mod money;
mod range;
mod transactions;
mod view;

pub type ResultEngine<T> = Result<T, EngineError>;
