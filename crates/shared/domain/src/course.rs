//! Course data owned by the remote course service, and paging requests.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::constants::{
    DEFAULT_COURSE_SORT_FIELD, DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
use crate::error::{DomainError, DomainResult};

/// Course record passed through from the course service.
///
/// Only `id` and `name` are interpreted; every other field is kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseSummary {
    #[serde(alias = "courseId")]
    pub id: Uuid,
    pub name: String,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// One page of courses.
///
/// Deserializes the course service's paging envelope (`content`,
/// `totalElements`, `number`, `size`) and serializes in its own shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoursePage {
    #[serde(default)]
    pub content: Vec<CourseSummary>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default, alias = "number")]
    pub page_number: u32,
    #[serde(default, alias = "size")]
    pub page_size: u32,
}

impl CoursePage {
    /// Empty page echoing the requested page number and size.
    pub fn empty(request: &PageRequest) -> Self {
        Self {
            content: Vec::new(),
            total_elements: 0,
            page_number: request.page,
            page_size: request.size,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("ASC"),
            SortDirection::Desc => f.write_str("DESC"),
        }
    }
}

/// Sort order: a single field and direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub direction: SortDirection,
}

impl Sort {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> DomainResult<Self> {
        let field = field.into();
        let valid = !field.is_empty()
            && field
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
        if !valid {
            return Err(DomainError::validation(format!("Invalid sort field '{}'", field)));
        }
        Ok(Self { field, direction })
    }

    /// Parse the `field,direction` form. A missing direction means ascending.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let mut parts = raw.splitn(2, ',');
        let field = parts.next().unwrap_or_default().trim();
        let direction = match parts.next().map(|d| d.trim().to_ascii_uppercase()) {
            None => SortDirection::Asc,
            Some(d) if d == "ASC" => SortDirection::Asc,
            Some(d) if d == "DESC" => SortDirection::Desc,
            Some(d) => {
                return Err(DomainError::validation(format!("Invalid sort direction '{}'", d)))
            }
        };
        Sort::new(field, direction)
    }
}

impl Default for Sort {
    fn default() -> Self {
        Self {
            field: DEFAULT_COURSE_SORT_FIELD.to_string(),
            direction: SortDirection::Asc,
        }
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.field, self.direction)
    }
}

/// Requested page of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: Sort,
}

impl PageRequest {
    pub fn new(page: u32, size: u32, sort: Sort) -> DomainResult<Self> {
        if size == 0 || size > MAX_PAGE_SIZE {
            return Err(DomainError::validation(format!(
                "Page size must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }
        Ok(Self { page, size, sort })
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
            size: DEFAULT_PAGE_SIZE,
            sort: Sort::default(),
        }
    }
}
