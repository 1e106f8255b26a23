//! Repository layer for data-store operations

pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::{Book, BorrowRecord},
};

/// Catalog store. Books are keyed by id and listed in insertion order.
///
/// The service layer owns all lending rules; implementations only move data,
/// so a real persistence backend (or a test double) can be swapped in without
/// touching service logic.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    async fn find(&self, id: &str) -> AppResult<Option<Book>>;
    async fn list(&self) -> AppResult<Vec<Book>>;
    async fn insert(&self, book: Book) -> AppResult<()>;
    async fn update(&self, book: Book) -> AppResult<()>;
}

/// Borrow ledger store. Records are appended, updated in place on return,
/// and never removed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BorrowStore: Send + Sync {
    async fn find(&self, id: &str) -> AppResult<Option<BorrowRecord>>;
    async fn list(&self) -> AppResult<Vec<BorrowRecord>>;
    async fn insert(&self, record: BorrowRecord) -> AppResult<()>;
    async fn update(&self, record: BorrowRecord) -> AppResult<()>;
}

/// Main repository struct bundling the data stores
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BookStore>,
    pub borrows: Arc<dyn BorrowStore>,
}

impl Repository {
    /// Create a new repository over the given stores
    pub fn new(books: Arc<dyn BookStore>, borrows: Arc<dyn BorrowStore>) -> Self {
        Self { books, borrows }
    }

    /// Repository over a fresh, empty in-memory store
    pub fn in_memory() -> Self {
        let store = Arc::new(memory::MemoryStore::new());
        Self::new(store.clone(), store)
    }

    /// Repository over an in-memory store pre-loaded with the demo catalog
    pub fn in_memory_seeded() -> Self {
        let store = Arc::new(memory::MemoryStore::seeded());
        Self::new(store.clone(), store)
    }
}
