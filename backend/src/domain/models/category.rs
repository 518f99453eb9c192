use chrono::{DateTime, Utc};
use shared::CategoryKind;

pub const DEFAULT_CATEGORY_COLOR: &str = "#3498db";

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub kind: CategoryKind,
    pub color: String,
    pub created_at: DateTime<Utc>,
}

/// A validated category ready to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub name: String,
    pub kind: CategoryKind,
    pub color: String,
}
