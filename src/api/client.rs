//! reqwest implementation of [`LibraryApi`]

use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize};

use super::LibraryApi;
use crate::{
    config::ApiConfig,
    error::{AppError, AppResult},
    models::{
        user::{Created, LoginResponse},
        AccountDraft, Book, BookQuery, BorrowRequest, Credentials, Librarian, Loan, LoanReceipt,
        Member, Paginated, PasswordChange, RenewReceipt, ReturnReceipt, Role, Specimen, Stats,
        User,
    },
};

/// Collection endpoints answer either with a page wrapper or a bare array
#[derive(Deserialize)]
#[serde(untagged)]
enum ListPayload<T> {
    Page(Paginated<T>),
    Plain(Vec<T>),
}

impl<T> ListPayload<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            ListPayload::Page(page) => page.items,
            ListPayload::Plain(items) => items,
        }
    }
}

/// Async HTTP client for the library server.
///
/// Cheap to clone; clones share the connection pool and the bearer token.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_seconds.filter(|s| *s > 0) {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(None)),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    fn auth(&self, req: RequestBuilder) -> RequestBuilder {
        let token = self.token.read().ok().and_then(|t| t.clone());
        match token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn send(&self, method: reqwest::Method, path: &str, req: RequestBuilder) -> AppResult<Response> {
        tracing::debug!(%method, path, "API request");
        self.auth(req).send().await.map_err(|e| {
            tracing::warn!(%method, path, "API request failed: {}", e);
            AppError::from(e)
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let resp = self
            .send(reqwest::Method::GET, path, self.client.get(self.url(path)))
            .await?;
        decode(resp).await
    }

    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> AppResult<Vec<T>> {
        self.get::<ListPayload<T>>(path).await.map(ListPayload::into_vec)
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> AppResult<T>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self
            .send(reqwest::Method::POST, path, self.client.post(self.url(path)).json(body))
            .await?;
        decode(resp).await
    }
}

/// Turn a response into `T`, or into an error carrying the server's message
async fn decode<T: DeserializeOwned>(resp: Response) -> AppResult<T> {
    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        return Err(AppError::from_status(status.as_u16(), &body));
    }
    Ok(serde_json::from_str(&body)?)
}

/// Like [`decode`] for endpoints whose success body is irrelevant
async fn expect_success(resp: Response) -> AppResult<()> {
    let status = resp.status();
    if status.is_success() {
        return Ok(());
    }
    let body = resp.text().await?;
    Err(AppError::from_status(status.as_u16(), &body))
}

#[async_trait]
impl LibraryApi for ApiClient {
    fn set_token(&self, token: Option<String>) {
        if let Ok(mut slot) = self.token.write() {
            *slot = token;
        }
    }

    /// `POST /auth/login`
    async fn login(&self, credentials: &Credentials) -> AppResult<LoginResponse> {
        self.post("/auth/login", credentials).await
    }

    /// `GET /auth/me`
    async fn me(&self) -> AppResult<User> {
        self.get("/auth/me").await
    }

    /// `PUT /auth/profile`
    async fn change_password(&self, change: &PasswordChange) -> AppResult<()> {
        let path = "/auth/profile";
        let resp = self
            .send(reqwest::Method::PUT, path, self.client.put(self.url(path)).json(change))
            .await?;
        expect_success(resp).await
    }

    /// `GET /items`
    async fn list_books(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        let path = "/items";
        let resp = self
            .send(reqwest::Method::GET, path, self.client.get(self.url(path)).query(query))
            .await?;
        decode::<ListPayload<Book>>(resp).await.map(ListPayload::into_vec)
    }

    /// `GET /items/{id}/specimens`
    async fn list_specimens(&self, book_id: i32) -> AppResult<Vec<Specimen>> {
        self.get_list(&format!("/items/{}/specimens", book_id)).await
    }

    /// `GET /users`
    async fn list_members(&self) -> AppResult<Vec<Member>> {
        self.get_list("/users").await
    }

    /// `POST /users`
    async fn create_member(&self, draft: &AccountDraft) -> AppResult<Created> {
        self.post("/users", draft).await
    }

    /// `PUT /users/{id}`
    async fn update_member(&self, id: i32, draft: &AccountDraft) -> AppResult<()> {
        let path = format!("/users/{}", id);
        let resp = self
            .send(reqwest::Method::PUT, &path, self.client.put(self.url(&path)).json(draft))
            .await?;
        expect_success(resp).await
    }

    /// `DELETE /users/{id}`
    async fn delete_member(&self, id: i32) -> AppResult<()> {
        let path = format!("/users/{}", id);
        let resp = self
            .send(reqwest::Method::DELETE, &path, self.client.delete(self.url(&path)))
            .await?;
        expect_success(resp).await
    }

    /// `GET /users?account_type=librarian`, keeping only librarian
    /// records in case the server ignores the filter
    async fn list_librarians(&self) -> AppResult<Vec<Librarian>> {
        let path = "/users";
        let resp = self
            .send(
                reqwest::Method::GET,
                path,
                self.client
                    .get(self.url(path))
                    .query(&[("account_type", Role::Librarian.as_str())]),
            )
            .await?;
        let users = decode::<ListPayload<Librarian>>(resp).await?.into_vec();
        Ok(users
            .into_iter()
            .filter(|u| u.account_type == Some(Role::Librarian))
            .collect())
    }

    /// `POST /users` with the librarian account type
    async fn create_librarian(&self, draft: &AccountDraft) -> AppResult<Created> {
        let draft = AccountDraft {
            account_type: Some(Role::Librarian),
            ..draft.clone()
        };
        self.post("/users", &draft).await
    }

    /// `GET /users/{id}/loans`
    async fn member_loans(&self, member_id: i32) -> AppResult<Vec<Loan>> {
        self.get_list(&format!("/users/{}/loans", member_id)).await
    }

    /// `GET /loans`
    async fn active_loans(&self) -> AppResult<Vec<Loan>> {
        self.get_list("/loans").await
    }

    /// `POST /loans`
    async fn borrow(&self, request: &BorrowRequest) -> AppResult<LoanReceipt> {
        self.post("/loans", request).await
    }

    /// `POST /loans/{id}/return`
    async fn return_loan(&self, loan_id: i32) -> AppResult<ReturnReceipt> {
        self.post(&format!("/loans/{}/return", loan_id), &serde_json::json!({}))
            .await
    }

    /// `POST /loans/{id}/renew`
    async fn renew_loan(&self, loan_id: i32) -> AppResult<RenewReceipt> {
        self.post(&format!("/loans/{}/renew", loan_id), &serde_json::json!({}))
            .await
    }

    /// `GET /stats`
    async fn stats(&self) -> AppResult<Stats> {
        self.get("/stats").await
    }
}
