use crate::{
    DateRange, DerivedView, PageSize, Sort, SortKey, Transaction, ViewQuery, derive_view,
    view::{filter_by_range, page_count},
};

/// The fetched transactions together with the user's current selections.
///
/// The list itself is never edited: it is replaced wholesale by
/// [`Ledger::replace`] and read through [`Ledger::view`].
#[derive(Clone, Debug, Default)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    query: ViewQuery,
}

impl Ledger {
    #[must_use]
    pub fn new(page_size: PageSize) -> Self {
        Self {
            transactions: Vec::new(),
            query: ViewQuery {
                page: 1,
                page_size,
                ..ViewQuery::default()
            },
        }
    }

    /// Swaps in a freshly fetched batch and goes back to page 1.
    ///
    /// Range, sort and page size are kept.
    pub fn replace(&mut self, transactions: Vec<Transaction>) {
        tracing::debug!(count = transactions.len(), "ledger replaced");
        self.transactions = transactions;
        self.query.page = 1;
    }

    pub fn clear(&mut self) {
        self.replace(Vec::new());
    }

    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    #[must_use]
    pub fn range(&self) -> Option<&DateRange> {
        self.query.range.as_ref()
    }

    #[must_use]
    pub fn sort(&self) -> Option<Sort> {
        self.query.sort
    }

    #[must_use]
    pub fn page_size(&self) -> PageSize {
        self.query.page_size
    }

    /// Sets or clears the date range. Resets to page 1.
    pub fn set_range(&mut self, range: Option<DateRange>) {
        self.query.range = range;
        self.query.page = 1;
    }

    /// Same key as the active one flips the direction, a new key starts
    /// ascending. The current page is kept.
    pub fn toggle_sort(&mut self, key: SortKey) {
        self.query.sort = Some(match self.query.sort {
            Some(active) if active.key == key => Sort {
                key,
                direction: active.direction.flipped(),
            },
            _ => Sort::ascending(key),
        });
    }

    /// Resets to page 1.
    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.query.page_size = page_size;
        self.query.page = 1;
    }

    pub fn cycle_page_size(&mut self) {
        self.set_page_size(self.query.page_size.next());
    }

    /// Returns `false` when already on the last page.
    pub fn next_page(&mut self) -> bool {
        let last = self.page_count();
        let current = self.query.page.clamp(1, last);
        if current >= last {
            self.query.page = current;
            return false;
        }
        self.query.page = current + 1;
        true
    }

    /// Returns `false` when already on the first page.
    pub fn prev_page(&mut self) -> bool {
        let current = self.query.page.clamp(1, self.page_count());
        if current <= 1 {
            self.query.page = 1;
            return false;
        }
        self.query.page = current - 1;
        true
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        let filtered = filter_by_range(&self.transactions, self.query.range.as_ref()).len();
        page_count(filtered, self.query.page_size)
    }

    #[must_use]
    pub fn view(&self) -> DerivedView<'_> {
        derive_view(&self.transactions, &self.query)
    }
}
