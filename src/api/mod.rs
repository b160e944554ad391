//! Access to the library server's REST JSON API

pub mod client;

use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::{
        user::{Created, LoginResponse},
        AccountDraft, Book, BookQuery, BorrowRequest, Credentials, Librarian, Loan, LoanReceipt,
        Member, PasswordChange, RenewReceipt, ReturnReceipt, Specimen, Stats, User,
    },
};

pub use client::ApiClient;

/// Every backend endpoint the client talks to.
///
/// Implementations attach the bearer token last given to [`set_token`].
///
/// [`set_token`]: LibraryApi::set_token
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LibraryApi: Send + Sync {
    /// Token sent with every following request; `None` stops sending one
    fn set_token(&self, token: Option<String>);

    // Authentication
    async fn login(&self, credentials: &Credentials) -> AppResult<LoginResponse>;
    async fn me(&self) -> AppResult<User>;
    async fn change_password(&self, change: &PasswordChange) -> AppResult<()>;

    // Catalog
    async fn list_books(&self, query: &BookQuery) -> AppResult<Vec<Book>>;
    async fn list_specimens(&self, book_id: i32) -> AppResult<Vec<Specimen>>;

    // Members (adhérents)
    async fn list_members(&self) -> AppResult<Vec<Member>>;
    async fn create_member(&self, draft: &AccountDraft) -> AppResult<Created>;
    async fn update_member(&self, id: i32, draft: &AccountDraft) -> AppResult<()>;
    async fn delete_member(&self, id: i32) -> AppResult<()>;

    // Librarian accounts
    async fn list_librarians(&self) -> AppResult<Vec<Librarian>>;
    async fn create_librarian(&self, draft: &AccountDraft) -> AppResult<Created>;

    // Loans (emprunts)
    async fn member_loans(&self, member_id: i32) -> AppResult<Vec<Loan>>;
    async fn active_loans(&self) -> AppResult<Vec<Loan>>;
    async fn borrow(&self, request: &BorrowRequest) -> AppResult<LoanReceipt>;
    async fn return_loan(&self, loan_id: i32) -> AppResult<ReturnReceipt>;
    async fn renew_loan(&self, loan_id: i32) -> AppResult<RenewReceipt>;

    // Dashboard
    async fn stats(&self) -> AppResult<Stats>;
}
