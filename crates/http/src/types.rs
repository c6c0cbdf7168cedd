//! Request and response bodies of the library API

use libris_core::Role;
use serde::{Deserialize, Serialize};

/// Login credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub username: String,
    pub user_id: i64,
}

/// New account details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub name: String,
    pub last_name: String,
}

/// Token validation result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub message: String,
    pub user_id: i64,
    pub role: String,
}

/// Plain `{ "message": ... }` body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// Catalogue entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub available: bool,
    pub quantity: i64,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Result of a title search
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookSearchResponse {
    #[serde(default)]
    pub books: Vec<Book>,
}

/// Cover image uploaded with a book
#[derive(Debug, Clone)]
pub struct BookImage {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// New catalogue entry, sent as a multipart form
#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub quantity: i64,
    pub available: bool,
    pub image: Option<BookImage>,
}

/// Partial book update, sent as a multipart form. `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct BookUpdate {
    pub title: Option<String>,
    pub author: Option<String>,
    pub quantity: Option<i64>,
    pub image: Option<BookImage>,
}

/// A loan as listed to librarians
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub id: i64,
    pub user_id: i64,
    pub book_id: i64,
    pub title: String,
    pub loan_date: String,
    pub return_date: String,
    #[serde(default)]
    pub date_returned: Option<String>,
}

/// Borrow request for the signed-in member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorrowRequest {
    pub user_id: i64,
    pub book_id: i64,
}

/// Outcome of a borrow request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorrowResponse {
    #[serde(default)]
    pub success: bool,
    pub message: String,
}

/// Loan as reported after a return
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnedLoan {
    pub id: i64,
    pub title: String,
    pub loan_date: String,
    #[serde(default)]
    pub date_returned: Option<String>,
}

/// One row of a member's loan history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserLoan {
    pub id: i64,
    pub title: String,
    pub loan_date: String,
    #[serde(default)]
    pub date_returned: Option<String>,
}

/// A page of a member's loan history, newest first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserLoansPage {
    #[serde(default)]
    pub loans: Vec<UserLoan>,
    #[serde(rename = "totalPages", default)]
    pub total_pages: u32,
}

/// Loan recorded by a librarian
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLoan {
    pub book_id: i64,
    pub user_id: i64,
    pub title: String,
    pub loan_date: String,
    pub return_date: String,
    pub date_returned: Option<String>,
}

/// Created loan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLoanResponse {
    pub message: String,
    pub loan: Loan,
}

/// Loan edit. `date_returned` is always sent; `None` marks the loan as ongoing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoanUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_date: Option<String>,
    pub date_returned: Option<String>,
}

/// Account details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    pub role: Role,
}

/// Account created by a librarian
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub email: String,
    pub name: String,
    pub last_name: String,
    pub role: Role,
}

/// Created account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUserResponse {
    pub message: String,
    pub user: User,
}

/// Partial account update. `None` fields are left out of the request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// Password change for the signed-in user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}
