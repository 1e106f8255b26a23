//! Inventory and lending service

use std::sync::Arc;

use chrono::{Duration, Utc};
use tokio::sync::Mutex;
use validator::Validate;

use crate::{
    config::LendingConfig,
    error::{AppError, AppResult},
    models::{Book, BorrowRecord, BorrowStatus, CreateBook},
    repository::Repository,
};

/// Catalog and lending operations over the repository.
///
/// Mutating operations serialize on a single writer lock so stock counts and
/// the ledger stay consistent when the service is shared across tasks. Every
/// check runs before the first write, so a failed operation leaves no partial
/// state behind.
#[derive(Clone)]
pub struct InventoryService {
    repository: Repository,
    lending: LendingConfig,
    write_lock: Arc<Mutex<()>>,
}

impl InventoryService {
    pub fn new(repository: Repository, lending: LendingConfig) -> Self {
        Self {
            repository,
            lending,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// All catalog entries, in insertion order
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    /// Add a new title to the catalog with all copies available
    pub async fn add_book(&self, new_book: CreateBook) -> AppResult<Book> {
        new_book.validate()?;

        let _guard = self.write_lock.lock().await;
        let book = Book::new(new_book.title, new_book.author, new_book.total_stock);
        self.repository.books.insert(book.clone()).await?;

        tracing::info!(
            "Inventory: added '{}' by {} (id={}, {} copies)",
            book.title,
            book.author,
            book.id,
            book.total_stock
        );
        Ok(book)
    }

    /// Borrow one copy of a book for a user
    pub async fn borrow_book(
        &self,
        book_id: &str,
        user_id: &str,
        user_name: &str,
    ) -> AppResult<Book> {
        let _guard = self.write_lock.lock().await;

        let mut book = self.get_book(book_id).await?;

        // Check stock
        if book.available_stock == 0 {
            tracing::warn!("Borrow rejected: book {} has no available copies", book_id);
            return Err(AppError::OutOfStock(
                "Book not available - out of stock".to_string(),
            ));
        }

        // Check max active borrows for this user
        let active = self.active_borrows(user_id).await?;
        if active.len() as u32 >= self.lending.max_active_borrows {
            tracing::warn!(
                "Borrow rejected: user {} already has {} active borrows",
                user_id,
                active.len()
            );
            return Err(AppError::LimitExceeded(format!(
                "You've reached the maximum borrowing limit ({} books)",
                self.lending.max_active_borrows
            )));
        }

        // Create the loan
        let now = Utc::now();
        let due_date = now + Duration::days(self.lending.loan_period_days);
        let record = BorrowRecord::open(&book, user_id, user_name, now, due_date);

        book.available_stock -= 1;
        self.repository.books.update(book.clone()).await?;
        self.repository.borrows.insert(record).await?;

        tracing::info!(
            "Inventory: user {} borrowed book {} ({} copies left, due {})",
            user_id,
            book_id,
            book.available_stock,
            due_date
        );
        Ok(book)
    }

    /// Return a user's borrowed copy of a book
    pub async fn return_book(&self, book_id: &str, user_id: &str) -> AppResult<Book> {
        let _guard = self.write_lock.lock().await;

        let mut book = self.get_book(book_id).await?;

        // Find the active record for this (book, user) pair; oldest first
        let mut record = self
            .repository
            .borrows
            .list()
            .await?
            .into_iter()
            .find(|r| r.book_id == book_id && r.user_id == user_id && r.is_active())
            .ok_or_else(|| AppError::NotFound("You haven't borrowed this book".to_string()))?;

        // Guard against a double increment
        if book.available_stock >= book.total_stock {
            return Err(AppError::InvariantViolation(format!(
                "All {} copies of book {} are already in stock",
                book.total_stock, book.id
            )));
        }

        // Close the loan
        record.status = BorrowStatus::Returned;
        record.return_date = Some(Utc::now());
        self.repository.borrows.update(record).await?;

        book.available_stock += 1;
        self.repository.books.update(book.clone()).await?;

        tracing::info!(
            "Inventory: user {} returned book {} ({} copies available)",
            user_id,
            book_id,
            book.available_stock
        );
        Ok(book)
    }

    /// Full borrow ledger, in ledger order. Callers sort for display.
    pub async fn list_borrow_records(&self) -> AppResult<Vec<BorrowRecord>> {
        self.repository.borrows.list().await
    }

    /// Records still out for a user
    pub async fn list_active_borrows_for_user(
        &self,
        user_id: &str,
    ) -> AppResult<Vec<BorrowRecord>> {
        self.active_borrows(user_id).await
    }

    async fn get_book(&self, book_id: &str) -> AppResult<Book> {
        self.repository
            .books
            .find(book_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", book_id)))
    }

    async fn active_borrows(&self, user_id: &str) -> AppResult<Vec<BorrowRecord>> {
        Ok(self
            .repository
            .borrows
            .list()
            .await?
            .into_iter()
            .filter(|r| r.user_id == user_id && r.is_active())
            .collect())
    }
}
