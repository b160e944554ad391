//! Specimen (exemplaire) model: a physical copy of a catalog title

use serde::{Deserialize, Serialize};

use super::item::BookShort;

/// Whether a copy may leave the library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i16)]
pub enum BorrowStatus {
    Borrowable = 98,
    NotBorrowable = 110,
}

impl From<i16> for BorrowStatus {
    fn from(v: i16) -> Self {
        match v {
            98 => BorrowStatus::Borrowable,
            _ => BorrowStatus::NotBorrowable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specimen {
    pub id: i32,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub call_number: Option<String>,
    /// Borrow status code: 98 borrowable, 110 not borrowable
    #[serde(default)]
    pub status: Option<i16>,
    /// 0 when on the shelf, >0 when borrowed
    #[serde(default)]
    pub availability: Option<i64>,
    #[serde(default, alias = "item")]
    pub book: Option<BookShort>,
}

impl Specimen {
    pub fn borrow_status(&self) -> BorrowStatus {
        self.status
            .map(BorrowStatus::from)
            .unwrap_or(BorrowStatus::Borrowable)
    }

    pub fn is_on_shelf(&self) -> bool {
        self.availability.unwrap_or(0) == 0
    }

    pub fn can_borrow(&self) -> bool {
        self.borrow_status() == BorrowStatus::Borrowable && self.is_on_shelf()
    }
}
