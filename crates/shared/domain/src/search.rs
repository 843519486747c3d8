//! Search ordering and pagination types.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::DomainError;

/// Product fields a search may sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Name,
    Price,
    Category,
    CreatedAt,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Name => "name",
            SortField::Price => "price",
            SortField::Category => "category",
            SortField::CreatedAt => "createdAt",
        }
    }
}

impl FromStr for SortField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(SortField::Id),
            "name" => Ok(SortField::Name),
            "price" => Ok(SortField::Price),
            "category" => Ok(SortField::Category),
            "createdAt" | "created_at" => Ok(SortField::CreatedAt),
            other => Err(DomainError::validation(format!(
                "Unknown sort field: {}",
                other
            ))),
        }
    }
}

/// Sort direction for a single sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl Default for SortDirection {
    fn default() -> Self {
        SortDirection::Asc
    }
}

/// One (field, direction) sort key. A search applies its keys
/// left-to-right as primary, secondary, ... ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortParam {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortParam {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub fn asc(field: SortField) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    pub fn desc(field: SortField) -> Self {
        Self::new(field, SortDirection::Desc)
    }
}

/// One page of results with pagination metadata. Page numbers are
/// 0-indexed.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Create a page, deriving the page count from the total
    pub fn new(items: Vec<T>, page: u64, per_page: u64, total: u64) -> Self {
        let total_pages = if per_page > 0 {
            total.div_ceil(per_page)
        } else {
            0
        };

        Self {
            items,
            page,
            per_page,
            total,
            total_pages,
        }
    }

    /// Map the page items, keeping the metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total: self.total,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_field_parsing() {
        assert_eq!("price".parse::<SortField>().unwrap(), SortField::Price);
        assert_eq!("createdAt".parse::<SortField>().unwrap(), SortField::CreatedAt);
        assert!("rating".parse::<SortField>().is_err());
    }

    #[test]
    fn test_page_count_rounds_up() {
        let page = Page::new(vec![1, 2, 3], 0, 3, 7);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_empty_page() {
        let page: Page<i32> = Page::new(vec![], 0, 10, 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
    }
}
