//! Loan (emprunt) tracking

use std::sync::Arc;

use crate::{
    api::LibraryApi,
    error::AppResult,
    models::{BorrowRequest, Loan, LoanReceipt, RenewReceipt, ReturnReceipt},
    store::{EntityList, ListAction},
};

#[derive(Clone)]
pub struct LoansService {
    api: Arc<dyn LibraryApi>,
    loans: EntityList<Loan>,
}

impl LoansService {
    pub fn new(api: Arc<dyn LibraryApi>, loans: EntityList<Loan>) -> Self {
        Self { api, loans }
    }

    pub fn loans(&self) -> &EntityList<Loan> {
        &self.loans
    }

    /// Active loans of one member
    pub async fn load_for_member(&self, member_id: i32) -> AppResult<usize> {
        super::load_into(&self.loans, "member-loans", self.api.member_loans(member_id)).await
    }

    /// All active loans of the library
    pub async fn load_active(&self) -> AppResult<usize> {
        super::load_into(&self.loans, "active-loans", self.api.active_loans()).await
    }

    /// Lend a specimen, identified by id or barcode
    pub async fn borrow(&self, request: &BorrowRequest) -> AppResult<LoanReceipt> {
        super::mutate(&self.loans, "borrow", self.api.borrow(request)).await
    }

    pub async fn return_loan(&self, loan_id: i32) -> AppResult<ReturnReceipt> {
        super::mutate(&self.loans, "return", self.api.return_loan(loan_id)).await
    }

    pub async fn renew(&self, loan_id: i32) -> AppResult<RenewReceipt> {
        super::mutate(&self.loans, "renew", self.api.renew_loan(loan_id)).await
    }

    pub fn acknowledge(&self) {
        self.loans.dispatch(ListAction::ResetToIdle);
    }

    /// Cached loans past their due date
    pub fn overdue(&self) -> Vec<Loan> {
        let now = chrono::Utc::now();
        self.loans.select(|s| {
            s.entities
                .iter()
                .filter(|loan| loan.is_overdue_at(now))
                .cloned()
                .collect()
        })
    }
}
