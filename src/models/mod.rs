//! Data models for the Biblio client

pub mod item;
pub mod loan;
pub mod specimen;
pub mod stats;
pub mod user;

// Re-export commonly used types
pub use item::{AuthorName, Book, BookQuery, BookShort, MediaType, Paginated};
pub use loan::{BorrowRequest, Loan, LoanReceipt, RenewReceipt, ReturnReceipt};
pub use specimen::{BorrowStatus, Specimen};
pub use stats::Stats;
pub use user::{AccountDraft, Credentials, Librarian, Member, PasswordChange, Role, User};
