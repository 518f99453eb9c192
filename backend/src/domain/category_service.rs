//! Category management: creation, rename/recolor, deletion and default seeding.
use std::sync::Arc;

use shared::{CategoryKind, CreateCategoryRequest, UpdateCategoryRequest};
use tracing::{info, warn};

use crate::domain::models::{Category, NewCategory, DEFAULT_CATEGORY_COLOR};
use crate::domain::validation::{validate_category_name, validate_color};
use crate::error::{Result, TrackerError};
use crate::storage::{CategoryStorage, Connection};

pub const DEFAULT_EXPENSE_CATEGORIES: [&str; 8] = [
    "Food & Dining",
    "Transportation",
    "Shopping",
    "Entertainment",
    "Bills & Utilities",
    "Healthcare",
    "Education",
    "Travel",
];

pub const DEFAULT_INCOME_CATEGORIES: [&str; 5] = [
    "Salary",
    "Freelance",
    "Investment",
    "Business",
    "Other Income",
];

#[derive(Clone)]
pub struct CategoryService<C: Connection> {
    category_repository: C::CategoryRepository,
}

impl<C: Connection> CategoryService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            category_repository: connection.create_category_repository(),
        }
    }

    pub async fn create_category(&self, request: CreateCategoryRequest) -> Result<Category> {
        let name = validate_category_name(&request.name)?;
        let color = match request.color.as_deref() {
            Some(color) if !color.trim().is_empty() => validate_color(color)?,
            _ => DEFAULT_CATEGORY_COLOR.to_string(),
        };

        if self.category_repository.find_category_by_name(&name).await?.is_some() {
            return Err(TrackerError::Duplicate(format!(
                "A category named '{}' already exists",
                name
            )));
        }

        let category = self
            .category_repository
            .store_category(&NewCategory {
                name,
                kind: request.kind,
                color,
            })
            .await?;

        info!("Created {} category '{}' (id {})", category.kind, category.name, category.id);
        Ok(category)
    }

    pub async fn get_category(&self, category_id: i64) -> Result<Option<Category>> {
        self.category_repository.get_category(category_id).await
    }

    pub async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>> {
        self.category_repository.find_category_by_name(name.trim()).await
    }

    pub async fn list_categories(&self, kind: Option<CategoryKind>) -> Result<Vec<Category>> {
        self.category_repository.list_categories(kind).await
    }

    /// Rename, recolor or re-kind a category.
    ///
    /// Changing the kind is refused while any expense, income or budget still
    /// references the category, since those records were validated against
    /// the current kind.
    pub async fn update_category(&self, category_id: i64, request: UpdateCategoryRequest) -> Result<Category> {
        let mut category = self
            .category_repository
            .get_category(category_id)
            .await?
            .ok_or_else(|| TrackerError::not_found("Category", category_id))?;

        if let Some(name) = request.name.as_deref() {
            let name = validate_category_name(name)?;
            if name != category.name {
                if let Some(existing) = self.category_repository.find_category_by_name(&name).await? {
                    if existing.id != category_id {
                        return Err(TrackerError::Duplicate(format!(
                            "A category named '{}' already exists",
                            name
                        )));
                    }
                }
            }
            category.name = name;
        }

        if let Some(color) = request.color.as_deref() {
            category.color = validate_color(color)?;
        }

        if let Some(kind) = request.kind {
            if kind != category.kind {
                let references = self
                    .category_repository
                    .count_category_references(category_id)
                    .await?;
                if references > 0 {
                    return Err(TrackerError::validation(format!(
                        "Cannot change the type of '{}' while {} record(s) use it",
                        category.name, references
                    )));
                }
                category.kind = kind;
            }
        }

        if !self.category_repository.update_category(&category).await? {
            return Err(TrackerError::not_found("Category", category_id));
        }

        info!("Updated category {} ('{}')", category.id, category.name);
        Ok(category)
    }

    /// Delete a category together with its expenses, income and budgets
    pub async fn delete_category(&self, category_id: i64) -> Result<bool> {
        let deleted = self.category_repository.delete_category(category_id).await?;
        if deleted {
            info!("Deleted category {} and its dependent records", category_id);
        }
        Ok(deleted)
    }

    /// Fetch a category that a record is about to reference, checking its kind
    pub async fn require_category(&self, category_id: i64, expected: CategoryKind) -> Result<Category> {
        let category = self
            .category_repository
            .get_category(category_id)
            .await?
            .ok_or(TrackerError::CategoryNotFound(category_id))?;

        if category.kind != expected {
            return Err(TrackerError::validation(format!(
                "Category '{}' is an {} category; an {} category is required",
                category.name, category.kind, expected
            )));
        }
        Ok(category)
    }

    /// Insert the standard expense and income categories that are not present yet.
    /// Returns how many were inserted.
    pub async fn seed_default_categories(&self) -> Result<usize> {
        let defaults = DEFAULT_EXPENSE_CATEGORIES
            .iter()
            .map(|name| (*name, CategoryKind::Expense))
            .chain(
                DEFAULT_INCOME_CATEGORIES
                    .iter()
                    .map(|name| (*name, CategoryKind::Income)),
            );

        let mut inserted = 0;
        for (name, kind) in defaults {
            if let Some(existing) = self.category_repository.find_category_by_name(name).await? {
                if existing.kind != kind {
                    warn!("Default category '{}' exists with kind {}, leaving it", name, existing.kind);
                }
                continue;
            }
            self.category_repository
                .store_category(&NewCategory {
                    name: name.to_string(),
                    kind,
                    color: DEFAULT_CATEGORY_COLOR.to_string(),
                })
                .await?;
            inserted += 1;
        }

        info!("Seeded {} default categories", inserted);
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::DbConnection;

    async fn create_test_service() -> CategoryService<DbConnection> {
        let db = Arc::new(DbConnection::init_test().await.unwrap());
        CategoryService::new(db)
    }

    fn request(name: &str, kind: CategoryKind) -> CreateCategoryRequest {
        CreateCategoryRequest {
            name: name.to_string(),
            kind,
            color: None,
        }
    }

    #[tokio::test]
    async fn test_create_category_trims_and_defaults_color() {
        let service = create_test_service().await;
        let category = service.create_category(request("  Groceries ", CategoryKind::Expense)).await.unwrap();
        assert_eq!(category.name, "Groceries");
        assert_eq!(category.color, DEFAULT_CATEGORY_COLOR);

        let found = service.find_category_by_name(" Groceries").await.unwrap();
        assert_eq!(found.map(|c| c.id), Some(category.id));
    }

    #[tokio::test]
    async fn test_create_category_validation() {
        let service = create_test_service().await;

        let empty = service.create_category(request("   ", CategoryKind::Expense)).await;
        assert!(matches!(empty, Err(TrackerError::Validation(_))));

        let bad_color = service
            .create_category(CreateCategoryRequest {
                name: "Pets".to_string(),
                kind: CategoryKind::Expense,
                color: Some("blue".to_string()),
            })
            .await;
        assert!(matches!(bad_color, Err(TrackerError::Validation(_))));

        service.create_category(request("Pets", CategoryKind::Expense)).await.unwrap();
        let duplicate = service.create_category(request("Pets", CategoryKind::Income)).await;
        assert!(matches!(duplicate, Err(TrackerError::Duplicate(_))));
    }

    #[tokio::test]
    async fn test_update_category_rename_and_recolor() {
        let service = create_test_service().await;
        let category = service.create_category(request("Fun", CategoryKind::Expense)).await.unwrap();

        let updated = service
            .update_category(
                category.id,
                UpdateCategoryRequest {
                    name: Some("Entertainment".to_string()),
                    color: Some("#FF0000".to_string()),
                    kind: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Entertainment");
        assert_eq!(updated.color, "#ff0000");
        assert_eq!(updated.kind, CategoryKind::Expense);
    }

    #[tokio::test]
    async fn test_update_category_kind_when_unreferenced() {
        let service = create_test_service().await;
        let category = service.create_category(request("Gifts", CategoryKind::Expense)).await.unwrap();

        let updated = service
            .update_category(
                category.id,
                UpdateCategoryRequest {
                    kind: Some(CategoryKind::Income),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.kind, CategoryKind::Income);
    }

    #[tokio::test]
    async fn test_update_missing_category_is_not_found() {
        let service = create_test_service().await;
        let result = service.update_category(404, UpdateCategoryRequest::default()).await;
        assert!(matches!(result, Err(TrackerError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_require_category_checks_kind() {
        let service = create_test_service().await;
        let salary = service.create_category(request("Salary", CategoryKind::Income)).await.unwrap();

        assert!(service.require_category(salary.id, CategoryKind::Income).await.is_ok());
        assert!(matches!(
            service.require_category(salary.id, CategoryKind::Expense).await,
            Err(TrackerError::Validation(_))
        ));
        assert!(matches!(
            service.require_category(999, CategoryKind::Income).await,
            Err(TrackerError::CategoryNotFound(999))
        ));
    }

    #[tokio::test]
    async fn test_seed_default_categories_is_idempotent() {
        let service = create_test_service().await;

        let first = service.seed_default_categories().await.unwrap();
        assert_eq!(first, DEFAULT_EXPENSE_CATEGORIES.len() + DEFAULT_INCOME_CATEGORIES.len());

        let second = service.seed_default_categories().await.unwrap();
        assert_eq!(second, 0);

        let income = service.list_categories(Some(CategoryKind::Income)).await.unwrap();
        assert_eq!(income.len(), DEFAULT_INCOME_CATEGORIES.len());
    }
}
