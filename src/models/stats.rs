//! Dashboard statistics as returned by `GET /stats`

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default)]
    pub items: ItemStats,
    #[serde(default)]
    pub users: UserStats,
    #[serde(default)]
    pub loans: LoanStats,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemStats {
    #[serde(default)]
    pub total: i64,
    /// Titles acquired in the period
    #[serde(default)]
    pub acquisitions: i64,
    /// Titles withdrawn in the period
    #[serde(default)]
    pub withdrawals: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    #[serde(default)]
    pub total: i64,
    /// Users with at least one active loan
    #[serde(default)]
    pub active: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanStats {
    #[serde(default)]
    pub active: i64,
    #[serde(default)]
    pub overdue: i64,
    #[serde(default)]
    pub returned_today: i64,
}
