// Côté client de l'API HTTP.
//
// Le cookie de session vit dans le cookie jar du client et part avec chaque
// requête ; l'appelant ne le voit jamais. Une réponse 401 signifie "non connecté"
// et revient en `Ok(None)` plutôt qu'en erreur.

use reqwest::{header::ACCEPT, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::models::dto::{
    AccountResponse, CreateReviewRequest, LoginRequest, RegisterRequest, ReviewResponse,
    UpdateReviewRequest, UpdateUserRequest, WatchlistRequest, WatchlistResponse,
};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request failed with status {status}: {message}")]
    Status { status: u16, message: String },
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;

        Ok(ApiClient {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get_with_auth<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ClientError> {
        self.send(self.http.get(self.url(path))).await
    }

    pub async fn post_with_auth<B, T>(&self, path: &str, body: &B) -> Result<Option<T>, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.http.post(self.url(path)).json(body)).await
    }

    pub async fn put_with_auth<B, T>(&self, path: &str, body: &B) -> Result<Option<T>, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.http.put(self.url(path)).json(body)).await
    }

    pub async fn delete_with_auth<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ClientError> {
        self.send(self.http.delete(self.url(path))).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<Option<T>, ClientError> {
        let response = request.header(ACCEPT, "application/json").send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            log::debug!("User not authenticated for {}", response.url());
            return Ok(None);
        }

        if !status.is_success() {
            let message = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|body| body.get("error")?.as_str().map(str::to_string))
                .unwrap_or_else(|| status.to_string());

            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(Some(response.json::<T>().await?))
    }

    // --- comptes ---

    pub async fn register(&self, request: &RegisterRequest) -> Result<Option<AccountResponse>, ClientError> {
        self.post_with_auth("/register", request).await
    }

    /// `None` si les identifiants sont faux
    pub async fn login(&self, email: &str, password: &str) -> Result<Option<AccountResponse>, ClientError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.post_with_auth("/login", &request).await
    }

    pub async fn logout(&self) -> Result<(), ClientError> {
        self.post_with_auth::<_, serde_json::Value>("/logout", &serde_json::json!({}))
            .await?;
        Ok(())
    }

    /// `None` sans session valide
    pub async fn me(&self) -> Result<Option<AccountResponse>, ClientError> {
        self.get_with_auth("/me").await
    }

    pub async fn users(&self) -> Result<Vec<AccountResponse>, ClientError> {
        Ok(self.get_with_auth("/users").await?.unwrap_or_default())
    }

    pub async fn user(&self, user_id: i32) -> Result<Option<AccountResponse>, ClientError> {
        self.get_with_auth(&format!("/users/{}", user_id)).await
    }

    pub async fn update_user(
        &self,
        user_id: i32,
        request: &UpdateUserRequest,
    ) -> Result<Option<AccountResponse>, ClientError> {
        self.put_with_auth(&format!("/users/{}", user_id), request).await
    }

    // --- watchlist ---

    pub async fn watchlist(&self, user_id: i32) -> Result<Option<WatchlistResponse>, ClientError> {
        self.get_with_auth(&format!("/users/{}/watchlist", user_id)).await
    }

    pub async fn add_to_watchlist(&self, movie_id: i32) -> Result<Option<WatchlistResponse>, ClientError> {
        self.post_with_auth("/add-to-watchlist", &WatchlistRequest { movie_id }).await
    }

    pub async fn remove_from_watchlist(&self, movie_id: i32) -> Result<Option<WatchlistResponse>, ClientError> {
        let request = self
            .http
            .delete(self.url("/remove-from-watchlist"))
            .json(&WatchlistRequest { movie_id });
        self.send(request).await
    }

    // --- reviews ---

    pub async fn reviews(&self) -> Result<Vec<ReviewResponse>, ClientError> {
        Ok(self.get_with_auth("/reviews").await?.unwrap_or_default())
    }

    pub async fn review(&self, review_id: i32) -> Result<Option<ReviewResponse>, ClientError> {
        self.get_with_auth(&format!("/reviews/{}", review_id)).await
    }

    pub async fn movie_reviews(&self, movie_id: i32) -> Result<Vec<ReviewResponse>, ClientError> {
        Ok(self
            .get_with_auth(&format!("/movies/{}/reviews", movie_id))
            .await?
            .unwrap_or_default())
    }

    pub async fn user_reviews(&self, user_id: i32) -> Result<Vec<ReviewResponse>, ClientError> {
        Ok(self
            .get_with_auth(&format!("/users/{}/reviews", user_id))
            .await?
            .unwrap_or_default())
    }

    pub async fn user_movie_reviews(&self, user_id: i32, movie_id: i32) -> Result<Vec<ReviewResponse>, ClientError> {
        Ok(self
            .get_with_auth(&format!("/users/{}/movies/{}/reviews", user_id, movie_id))
            .await?
            .unwrap_or_default())
    }

    pub async fn create_review(&self, request: &CreateReviewRequest) -> Result<Option<ReviewResponse>, ClientError> {
        self.post_with_auth("/reviews", request).await
    }

    pub async fn update_review(
        &self,
        review_id: i32,
        request: &UpdateReviewRequest,
    ) -> Result<Option<ReviewResponse>, ClientError> {
        self.put_with_auth(&format!("/reviews/{}/update", review_id), request).await
    }

    pub async fn delete_review(&self, review_id: i32) -> Result<Option<ReviewResponse>, ClientError> {
        self.delete_with_auth(&format!("/reviews/{}/delete", review_id)).await
    }
}
