//! Page and sort requests passed through to the repository

use super::EntityWithPagination;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use utoipa::ToSchema;

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(format!("Unknown sort direction: {}", s)),
        }
    }
}

/// Columns a listing can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Id,
    Value,
}

impl SortField {
    /// Column name; the only text ever placed in an ORDER BY clause
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Value => "value",
        }
    }
}

impl std::str::FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "id" => Ok(SortField::Id),
            "value" => Ok(SortField::Value),
            _ => Err(format!("Unknown sort property: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SortOrder {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortOrder {
    pub fn asc(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }

    /// Parse one `sort` query value.
    ///
    /// Accepts `prop`, `prop,dir` and `prop1,prop2,dir`; a trailing
    /// direction applies to every property before it.
    pub fn parse_param(param: &str) -> std::result::Result<Vec<SortOrder>, String> {
        let mut parts: Vec<&str> = param
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();

        let direction = match parts.last().map(|p| p.parse::<SortDirection>()) {
            Some(Ok(direction)) => {
                parts.pop();
                direction
            }
            _ => SortDirection::Asc,
        };

        parts
            .into_iter()
            .map(|p| {
                p.parse::<SortField>()
                    .map(|field| SortOrder { field, direction })
            })
            .collect()
    }

    pub fn compare(&self, a: &EntityWithPagination, b: &EntityWithPagination) -> Ordering {
        let ordering = match self.field {
            SortField::Id => a.id.cmp(&b.id),
            SortField::Value => a.value.cmp(&b.value),
        };
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Zero-based page request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
    pub sort: Vec<SortOrder>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: Vec::new(),
        }
    }
}

impl PageRequest {
    pub fn new(page: i64, size: i64) -> Self {
        Self {
            page,
            size,
            sort: Vec::new(),
        }
    }

    pub fn with_sort(mut self, sort: Vec<SortOrder>) -> Self {
        self.sort = sort;
        self
    }

    pub fn offset(&self) -> i64 {
        self.page.saturating_mul(self.size)
    }

    pub fn total_pages(&self, total: i64) -> i64 {
        if self.size <= 0 {
            return 0;
        }
        total / self.size + i64::from(total % self.size != 0)
    }

    /// ORDER BY clause; rows always fall back to `id ASC` for a stable order.
    pub fn order_by_clause(&self) -> String {
        let mut terms: Vec<String> = self
            .sort
            .iter()
            .map(|o| format!("{} {}", o.field.column(), o.direction.as_sql()))
            .collect();
        if !self.sort.iter().any(|o| o.field == SortField::Id) {
            terms.push("id ASC".to_string());
        }
        format!("ORDER BY {}", terms.join(", "))
    }

    /// Same ordering as `order_by_clause`, for in-memory collections.
    pub fn compare(&self, a: &EntityWithPagination, b: &EntityWithPagination) -> Ordering {
        self.sort
            .iter()
            .map(|o| o.compare(a, b))
            .find(|o| o.is_ne())
            .unwrap_or_else(|| a.id.cmp(&b.id))
    }
}
