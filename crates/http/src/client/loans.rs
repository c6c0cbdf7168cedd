//! Loan API client methods

use super::{ClientError, LibraryClient};
use crate::types::{
    BorrowRequest, BorrowResponse, Loan, LoanUpdate, MessageResponse, NewLoan, NewLoanResponse,
    ReturnedLoan, UserLoansPage,
};
use reqwest::Method;

/// Page size the history view asks for
pub const DEFAULT_PAGE_SIZE: u32 = 10;

impl LibraryClient {
    /// Every loan, for librarians
    pub async fn list_loans(&self) -> Result<Vec<Loan>, ClientError> {
        self.get("/loans/").await
    }

    /// Get one loan
    pub async fn get_loan(&self, id: i64) -> Result<Loan, ClientError> {
        self.get(&format!("/loans/{id}")).await
    }

    /// Loans of `user_id`, newest first. Pages start at 1.
    pub async fn user_loans(
        &self,
        user_id: i64,
        page: u32,
        limit: u32,
    ) -> Result<UserLoansPage, ClientError> {
        let request = self
            .request(Method::GET, &format!("/loans/user/{user_id}"))?
            .query(&[("page", page.max(1)), ("limit", limit.max(1))]);
        self.execute(request).await
    }

    /// Borrow a book for thirty days
    pub async fn borrow_book(
        &self,
        user_id: i64,
        book_id: i64,
    ) -> Result<BorrowResponse, ClientError> {
        self.post("/loans/borrow", &BorrowRequest { user_id, book_id })
            .await
    }

    /// Return the book of loan `id`
    pub async fn return_book(&self, id: i64) -> Result<ReturnedLoan, ClientError> {
        let request = self.request(Method::PUT, &format!("/loans/return/{id}"))?;
        self.execute(request).await
    }

    /// Record a loan on behalf of a member
    pub async fn add_loan(&self, loan: &NewLoan) -> Result<NewLoanResponse, ClientError> {
        self.post("/loans/add", loan).await
    }

    /// Edit a loan
    pub async fn update_loan(
        &self,
        id: i64,
        update: &LoanUpdate,
    ) -> Result<MessageResponse, ClientError> {
        self.put(&format!("/loans/{id}"), update).await
    }

    /// Delete a loan record
    pub async fn delete_loan(&self, id: i64) -> Result<MessageResponse, ClientError> {
        self.delete(&format!("/loans/{id}")).await
    }
}
