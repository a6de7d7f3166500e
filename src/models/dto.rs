// Corps de requêtes et de réponses de l'API HTTP.
// Partagés par les handlers et le client.
use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use validator::Validate;

use super::{reviews, users, watchlist};

// ---------------------------------------------------------------------------
// Comptes
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    #[validate(length(min = 1, message = "firstName is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "lastName is required"))]
    pub last_name: String,
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Les champs absents restent inchangés
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "firstName must not be empty"))]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "lastName must not be empty"))]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "username must not be empty"))]
    pub username: Option<String>,
}

/// Vue publique d'un compte, sans le hash du mot de passe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<users::Model> for AccountResponse {
    fn from(user: users::Model) -> Self {
        AccountResponse {
            id: user.id,
            email: user.email,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

// ---------------------------------------------------------------------------
// Watchlist
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
pub struct WatchlistRequest {
    #[serde(rename = "movieId", alias = "movie_id", deserialize_with = "movie_id")]
    pub movie_id: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistResponse {
    pub user_id: i32,
    pub movie_ids: Vec<i32>,
}

impl WatchlistResponse {
    pub fn empty(user_id: i32) -> Self {
        WatchlistResponse { user_id, movie_ids: Vec::new() }
    }
}

impl From<watchlist::Model> for WatchlistResponse {
    fn from(model: watchlist::Model) -> Self {
        WatchlistResponse {
            user_id: model.user_id,
            movie_ids: model.movie_ids.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Reviews
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateReviewRequest {
    #[serde(alias = "movieId", deserialize_with = "movie_id")]
    pub movie_id: i32,
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: i32,
    #[serde(default)]
    pub review_text: String,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateReviewRequest {
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: i32,
    #[serde(default)]
    pub review_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewAuthor {
    pub id: i32,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub review_id: i32,
    pub user_id: i32,
    pub movie_id: i32,
    pub rating: i32,
    pub review_text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author: Option<ReviewAuthor>,
}

impl ReviewResponse {
    pub fn new(review: reviews::Model, author: Option<users::Model>) -> Self {
        ReviewResponse {
            review_id: review.id,
            user_id: review.user_id,
            movie_id: review.movie_id,
            rating: review.rating,
            review_text: review.review_text,
            created_at: review.created_at,
            updated_at: review.updated_at,
            author: author.map(|u| ReviewAuthor { id: u.id, username: u.username }),
        }
    }
}

// Les navigateurs envoient parfois les ids en string : on accepte les deux
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(i64),
    Text(String),
}

fn movie_id<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let id = match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => i32::try_from(n).map_err(|_| de::Error::custom("movie id out of range"))?,
        NumberOrString::Text(s) => s
            .trim()
            .parse::<i32>()
            .map_err(|_| de::Error::custom(format!("invalid movie id: {}", s)))?,
    };

    if id <= 0 {
        return Err(de::Error::custom("movie id must be positive"));
    }
    Ok(id)
}
