pub mod budget_mapper;
pub mod category_mapper;
pub mod summary_mapper;
pub mod transaction_mapper;

pub use budget_mapper::BudgetMapper;
pub use category_mapper::CategoryMapper;
pub use summary_mapper::SummaryMapper;
pub use transaction_mapper::TransactionMapper;
