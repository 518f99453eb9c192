//! Filtering of the combined expense and income list.
//!
//! Every supplied criterion must match (logical AND). A criterion given as an
//! empty string is treated as absent, matching the query-string conventions of
//! the transactions page.

use chrono::NaiveDate;
use shared::TransactionKind;

use crate::domain::models::Transaction;
use crate::domain::validation::parse_optional_date;
use crate::error::{Result, TrackerError};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    /// Case-insensitive substring of the description, stored lowercased
    pub search: Option<String>,
    pub category_id: Option<i64>,
    /// Inclusive lower bound
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound
    pub date_to: Option<NaiveDate>,
    /// `None` keeps both expenses and income
    pub kind: Option<TransactionKind>,
}

impl TransactionFilter {
    /// Build a filter from raw query parameters
    pub fn from_params(
        search: Option<&str>,
        category: Option<&str>,
        kind: Option<&str>,
        date_from: Option<&str>,
        date_to: Option<&str>,
    ) -> Result<Self> {
        let search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let category_id = match category.map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<i64>().map_err(|_| {
                TrackerError::validation(format!("Invalid category id: '{}'", raw))
            })?),
        };

        let kind = match kind.map(|k| k.trim().to_ascii_lowercase()).as_deref() {
            None | Some("") | Some("all") | Some("both") => None,
            Some("expense") | Some("expenses") => Some(TransactionKind::Expense),
            Some("income") => Some(TransactionKind::Income),
            Some(other) => {
                return Err(TrackerError::validation(format!(
                    "Invalid transaction type: '{}' (expected expense or income)",
                    other
                )))
            }
        };

        Ok(Self {
            search,
            category_id,
            date_from: parse_optional_date(date_from)?,
            date_to: parse_optional_date(date_to)?,
            kind,
        })
    }

    pub fn matches(&self, transaction: &Transaction) -> bool {
        if let Some(kind) = self.kind {
            if transaction.kind != kind {
                return false;
            }
        }
        if let Some(search) = &self.search {
            if !transaction.description.to_lowercase().contains(search.as_str()) {
                return false;
            }
        }
        if let Some(category_id) = self.category_id {
            if transaction.category_id != category_id {
                return false;
            }
        }
        if let Some(from) = self.date_from {
            if transaction.date < from {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if transaction.date > to {
                return false;
            }
        }
        true
    }

    /// Keep the matching transactions, newest date first.
    ///
    /// The sort is stable, so transactions sharing a date keep their input order.
    pub fn apply(&self, transactions: Vec<Transaction>) -> Vec<Transaction> {
        let mut matching: Vec<Transaction> = transactions
            .into_iter()
            .filter(|t| self.matches(t))
            .collect();
        matching.sort_by(|a, b| b.date.cmp(&a.date));
        matching
    }
}
