//! In-memory data store standing in for a real persistence backend

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookId, BorrowRecord},
    seed,
};

use super::{BookStore, BorrowStore};

/// Catalog (insertion ordered) and borrow ledger (append only).
#[derive(Default)]
struct MemoryState {
    books: IndexMap<BookId, Book>,
    borrows: Vec<BorrowRecord>,
}

/// In-memory backend for both stores.
///
/// One lock covers the catalog and the ledger. The optional latency mimics a
/// remote backend round trip; it never reorders operations or changes
/// results.
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
    latency: Option<Duration>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(MemoryState::default())),
            latency: None,
        }
    }

    /// Store pre-loaded with the demo catalog and an empty ledger
    pub fn seeded() -> Self {
        let mut state = MemoryState::default();
        for book in seed::sample_books() {
            state.books.insert(book.id.clone(), book);
        }
        Self {
            state: Arc::new(RwLock::new(state)),
            latency: None,
        }
    }

    /// Add a simulated per-call backend latency
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    async fn simulate_backend(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn find(&self, id: &str) -> AppResult<Option<Book>> {
        self.simulate_backend().await;
        Ok(self.state.read().await.books.get(id).cloned())
    }

    async fn list(&self) -> AppResult<Vec<Book>> {
        self.simulate_backend().await;
        Ok(self.state.read().await.books.values().cloned().collect())
    }

    async fn insert(&self, book: Book) -> AppResult<()> {
        self.simulate_backend().await;
        self.state.write().await.books.insert(book.id.clone(), book);
        Ok(())
    }

    async fn update(&self, book: Book) -> AppResult<()> {
        self.simulate_backend().await;
        let mut state = self.state.write().await;
        match state.books.get_mut(&book.id) {
            Some(slot) => {
                *slot = book;
                Ok(())
            }
            None => Err(AppError::NotFound(format!(
                "Book with id {} not found",
                book.id
            ))),
        }
    }
}

#[async_trait]
impl BorrowStore for MemoryStore {
    async fn find(&self, id: &str) -> AppResult<Option<BorrowRecord>> {
        self.simulate_backend().await;
        Ok(self
            .state
            .read()
            .await
            .borrows
            .iter()
            .find(|record| record.id == id)
            .cloned())
    }

    async fn list(&self) -> AppResult<Vec<BorrowRecord>> {
        self.simulate_backend().await;
        Ok(self.state.read().await.borrows.clone())
    }

    async fn insert(&self, record: BorrowRecord) -> AppResult<()> {
        self.simulate_backend().await;
        self.state.write().await.borrows.push(record);
        Ok(())
    }

    async fn update(&self, record: BorrowRecord) -> AppResult<()> {
        self.simulate_backend().await;
        let mut state = self.state.write().await;
        match state.borrows.iter_mut().find(|r| r.id == record.id) {
            Some(slot) => {
                *slot = record;
                Ok(())
            }
            None => Err(AppError::NotFound(format!(
                "Borrow record with id {} not found",
                record.id
            ))),
        }
    }
}
