//! Expense and income recording.
//!
//! Expenses and income share one service; every operation takes the
//! [`TransactionKind`] that selects which ledger it works on. A row may only
//! reference a category of the matching kind.
use std::sync::Arc;

use shared::{CreateTransactionRequest, TransactionKind, UpdateTransactionRequest};
use tracing::info;

use crate::domain::category_service::CategoryService;
use crate::domain::models::{DateRange, NewTransaction, Transaction};
use crate::domain::transaction_filter::TransactionFilter;
use crate::domain::validation::{parse_amount, parse_date, validate_description};
use crate::error::{Result, TrackerError};
use crate::storage::{Connection, TransactionStorage};

#[derive(Clone)]
pub struct TransactionService<C: Connection> {
    transaction_repository: C::TransactionRepository,
    category_service: CategoryService<C>,
}

impl<C: Connection> TransactionService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            transaction_repository: connection.create_transaction_repository(),
            category_service: CategoryService::new(connection),
        }
    }

    /// Validate a create or update request into storable fields.
    ///
    /// Field checks run before the category lookup so that malformed input is
    /// reported without touching the store.
    async fn validate_request(
        &self,
        kind: TransactionKind,
        request: &CreateTransactionRequest,
    ) -> Result<NewTransaction> {
        let amount = parse_amount(&request.amount)?;
        let description = validate_description(&request.description)?;
        let date = parse_date(&request.date)?;

        self.category_service
            .require_category(request.category_id, kind.category_kind())
            .await?;

        Ok(NewTransaction {
            category_id: request.category_id,
            amount,
            description,
            date,
        })
    }

    pub async fn create_transaction(
        &self,
        kind: TransactionKind,
        request: CreateTransactionRequest,
    ) -> Result<Transaction> {
        let new_transaction = self.validate_request(kind, &request).await?;
        let transaction = self
            .transaction_repository
            .store_transaction(kind, &new_transaction)
            .await?;

        info!(
            "Recorded {} {}: {} on {} in '{}'",
            kind, transaction.id, transaction.amount, transaction.date, transaction.category_name
        );
        Ok(transaction)
    }

    pub async fn get_transaction(&self, kind: TransactionKind, transaction_id: i64) -> Result<Option<Transaction>> {
        self.transaction_repository.get_transaction(kind, transaction_id).await
    }

    /// Rows of one kind, newest first
    pub async fn list_transactions(
        &self,
        kind: TransactionKind,
        range: Option<DateRange>,
        category_id: Option<i64>,
    ) -> Result<Vec<Transaction>> {
        self.transaction_repository
            .list_transactions(kind, range, category_id)
            .await
    }

    /// Replace every field of an existing row
    pub async fn update_transaction(
        &self,
        kind: TransactionKind,
        transaction_id: i64,
        request: UpdateTransactionRequest,
    ) -> Result<Transaction> {
        let entity = entity_name(kind);
        if self
            .transaction_repository
            .get_transaction(kind, transaction_id)
            .await?
            .is_none()
        {
            return Err(TrackerError::not_found(entity, transaction_id));
        }

        let new_transaction = self.validate_request(kind, &request).await?;
        if !self
            .transaction_repository
            .update_transaction(kind, transaction_id, &new_transaction)
            .await?
        {
            return Err(TrackerError::not_found(entity, transaction_id));
        }

        info!("Updated {} {}", kind, transaction_id);
        self.transaction_repository
            .get_transaction(kind, transaction_id)
            .await?
            .ok_or_else(|| TrackerError::not_found(entity, transaction_id))
    }

    pub async fn delete_transaction(&self, kind: TransactionKind, transaction_id: i64) -> Result<bool> {
        let deleted = self
            .transaction_repository
            .delete_transaction(kind, transaction_id)
            .await?;
        if deleted {
            info!("Deleted {} {}", kind, transaction_id);
        }
        Ok(deleted)
    }

    /// Expenses and income matching every criterion of `filter`, newest first.
    ///
    /// The date bounds and category are pushed down to storage; the
    /// description search and final ordering happen in [`TransactionFilter::apply`].
    pub async fn search_transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        let kinds: Vec<TransactionKind> = match filter.kind {
            Some(kind) => vec![kind],
            None => vec![TransactionKind::Expense, TransactionKind::Income],
        };

        let range = match (filter.date_from, filter.date_to) {
            (None, None) => None,
            (from, to) => {
                let all_time = DateRange::all_time();
                Some(DateRange::new(
                    from.unwrap_or(all_time.start),
                    to.unwrap_or(all_time.end),
                ))
            }
        };

        let mut combined = Vec::new();
        for kind in kinds {
            combined.extend(
                self.transaction_repository
                    .list_transactions(kind, range, filter.category_id)
                    .await?,
            );
        }

        Ok(filter.apply(combined))
    }
}

fn entity_name(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Expense => "Expense",
        TransactionKind::Income => "Income",
    }
}
