use shared::Category;

use crate::domain::models::Category as DomainCategory;

pub struct CategoryMapper;

impl CategoryMapper {
    pub fn to_dto(domain: DomainCategory) -> Category {
        Category {
            id: domain.id,
            name: domain.name,
            kind: domain.kind,
            color: domain.color,
            created_at: domain.created_at,
        }
    }

    pub fn to_dto_list(domain_categories: Vec<DomainCategory>) -> Vec<Category> {
        domain_categories.into_iter().map(Self::to_dto).collect()
    }
}
