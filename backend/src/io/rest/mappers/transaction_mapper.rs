use shared::{Transaction, TransactionListResponse};

use crate::domain::models::Transaction as DomainTransaction;

pub struct TransactionMapper;

impl TransactionMapper {
    pub fn to_dto(domain: DomainTransaction) -> Transaction {
        Transaction {
            id: domain.id,
            kind: domain.kind,
            category_id: domain.category_id,
            category_name: domain.category_name,
            category_color: domain.category_color,
            amount: domain.amount,
            description: domain.description,
            date: domain.date,
            created_at: domain.created_at,
        }
    }

    /// Wrap a list of rows with its count
    pub fn to_list_response(domain_transactions: Vec<DomainTransaction>) -> TransactionListResponse {
        let transactions: Vec<Transaction> = domain_transactions.into_iter().map(Self::to_dto).collect();
        TransactionListResponse {
            count: transactions.len(),
            transactions,
        }
    }
}
