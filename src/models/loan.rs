//! Loan (emprunt) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::item::BookShort;
use super::specimen::Specimen;

/// Borrower summary embedded in a loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Borrower {
    pub id: i32,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
}

/// Loan with the borrowed specimen and its title embedded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub id: i32,
    pub start_date: DateTime<Utc>,
    /// Due date
    pub issue_date: DateTime<Utc>,
    #[serde(default)]
    pub renewal_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub nb_renews: i16,
    #[serde(default)]
    pub specimen: Option<Specimen>,
    /// Servers that do not embed the specimen still send the title
    #[serde(default, alias = "item")]
    pub book: Option<BookShort>,
    #[serde(default)]
    pub user: Option<Borrower>,
    #[serde(default)]
    pub specimen_identification: Option<String>,
    #[serde(default)]
    pub is_overdue: bool,
}

impl Loan {
    /// Title of the borrowed book, looked up through the specimen first
    pub fn title(&self) -> Option<&str> {
        self.specimen
            .as_ref()
            .and_then(|c| c.book.as_ref())
            .or(self.book.as_ref())
            .and_then(|b| b.title.as_deref())
    }

    pub fn is_overdue_at(&self, now: DateTime<Utc>) -> bool {
        self.is_overdue || self.issue_date < now
    }
}

/// Borrow request
#[derive(Debug, Clone, Serialize)]
pub struct BorrowRequest {
    pub user_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specimen_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specimen_identification: Option<String>,
    pub force: bool,
}

/// Answer to a borrow request
#[derive(Debug, Clone, Deserialize)]
pub struct LoanReceipt {
    pub id: i32,
    pub issue_date: DateTime<Utc>,
    #[serde(default)]
    pub message: String,
}

/// Answer to a return request
#[derive(Debug, Clone, Deserialize)]
pub struct ReturnReceipt {
    #[serde(default)]
    pub status: String,
    pub loan: Loan,
}

/// Answer to a renewal request
#[derive(Debug, Clone, Deserialize)]
pub struct RenewReceipt {
    pub id: i32,
    pub issue_date: DateTime<Utc>,
    #[serde(default)]
    pub nb_renews: i16,
}
