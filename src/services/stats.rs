//! Statistics service

use chrono::Utc;
use serde::Serialize;

use crate::{error::AppResult, repository::Repository};

/// Copy counts across the whole catalog, as shown on the admin dashboard
#[derive(Debug, Clone, Serialize)]
pub struct InventoryStats {
    pub titles: i64,
    pub total_copies: i64,
    pub available_copies: i64,
    pub borrowed_copies: i64,
}

/// Ledger counts
#[derive(Debug, Clone, Serialize)]
pub struct LoanStats {
    pub active: i64,
    pub overdue: i64,
    pub returned: i64,
}

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Copy totals across the catalog
    pub async fn inventory_stats(&self) -> AppResult<InventoryStats> {
        let books = self.repository.books.list().await?;
        let total_copies: i64 = books.iter().map(|b| i64::from(b.total_stock)).sum();
        let available_copies: i64 = books.iter().map(|b| i64::from(b.available_stock)).sum();
        let borrowed_copies: i64 = books.iter().map(|b| i64::from(b.borrowed_count())).sum();

        Ok(InventoryStats {
            titles: books.len() as i64,
            total_copies,
            available_copies,
            borrowed_copies,
        })
    }

    /// Active, overdue and returned loan counts
    pub async fn loan_stats(&self) -> AppResult<LoanStats> {
        let now = Utc::now();
        let records = self.repository.borrows.list().await?;
        let active = records.iter().filter(|r| r.is_active()).count() as i64;
        let overdue = records.iter().filter(|r| r.is_overdue(now)).count() as i64;

        Ok(LoanStats {
            active,
            overdue,
            returned: records.len() as i64 - active,
        })
    }
}
