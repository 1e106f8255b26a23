//! Book (catalog entry) model and related types

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Opaque book identifier. Generated ids are UUID v4 strings; seeded demo
/// data uses short fixed ids.
pub type BookId = String;

/// Catalog entry representing one or more physical copies of a title.
///
/// `available_stock` never exceeds `total_stock`; both are unsigned so a
/// negative count is unrepresentable. Only the borrow and return operations
/// move `available_stock`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub total_stock: u32,
    pub available_stock: u32,
}

impl Book {
    /// Create a new catalog entry with a fresh id and all copies available
    pub fn new(title: impl Into<String>, author: impl Into<String>, total_stock: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            author: author.into(),
            total_stock,
            available_stock: total_stock,
        }
    }

    /// Number of copies currently out on loan
    pub fn borrowed_count(&self) -> u32 {
        self.total_stock - self.available_stock
    }

    pub fn in_stock(&self) -> bool {
        self.available_stock > 0
    }
}

/// Create book request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author must not be empty"))]
    pub author: String,
    #[validate(range(min = 1, message = "Total stock must be at least 1"))]
    pub total_stock: u32,
}
