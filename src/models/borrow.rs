//! Borrow record (ledger entry) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::book::{Book, BookId};

/// Loan state of a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorrowStatus {
    Borrowed,
    Returned,
}

/// One loan transaction of one copy to one user.
///
/// Title and author are snapshots taken at borrow time so history stays
/// readable even if the catalog entry is later edited. A record transitions
/// exactly once from `Borrowed` to `Returned` and is never removed from the
/// ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorrowRecord {
    pub id: String,
    pub book_id: BookId,
    pub user_id: String,
    pub user_name: String,
    pub book_title: String,
    pub book_author: String,
    pub borrow_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub status: BorrowStatus,
}

impl BorrowRecord {
    /// Open a new loan of one copy of `book` to the given user
    pub fn open(
        book: &Book,
        user_id: impl Into<String>,
        user_name: impl Into<String>,
        borrow_date: DateTime<Utc>,
        due_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            book_id: book.id.clone(),
            user_id: user_id.into(),
            user_name: user_name.into(),
            book_title: book.title.clone(),
            book_author: book.author.clone(),
            borrow_date,
            due_date,
            return_date: None,
            status: BorrowStatus::Borrowed,
        }
    }

    /// Not yet returned
    pub fn is_active(&self) -> bool {
        self.status == BorrowStatus::Borrowed
    }

    /// Still out past its due date
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.is_active() && now > self.due_date
    }
}
