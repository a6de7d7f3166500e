use sea_orm::*;

use crate::error::ApiError;
use crate::models::dto::{RegisterRequest, UpdateUserRequest};
use crate::models::users;
use crate::services::watchlist_service::WatchlistService;
use crate::utils::password::PasswordHasher;

pub struct AccountService;

impl AccountService {
    /// Crée un compte et sa watchlist vide.
    /// Les vérifications préalables donnent un message précis ; les contraintes
    /// uniques sur email et username rattrapent les inscriptions concurrentes.
    pub async fn register(
        db: &DatabaseConnection,
        hasher: &PasswordHasher,
        request: RegisterRequest,
    ) -> Result<users::Model, ApiError> {
        // 1. Vérifier si l'email ou le username existent déjà
        let email_taken = users::Entity::find()
            .filter(users::Column::Email.eq(&request.email))
            .one(db)
            .await?;
        let username_taken = users::Entity::find()
            .filter(users::Column::Username.eq(&request.username))
            .one(db)
            .await?;

        if email_taken.is_some() {
            return Err(ApiError::Conflict("Email already in use".to_string()));
        }
        if username_taken.is_some() {
            return Err(ApiError::Conflict("Username already taken".to_string()));
        }

        // 2. Hasher le mot de passe
        let password_hash = hasher.hash(&request.password)?;

        // 3. Insertion contrainte + watchlist vide, dans la même transaction
        let txn = db.begin().await?;

        let new_user = users::ActiveModel {
            email: Set(request.email),
            username: Set(request.username),
            first_name: Set(request.first_name),
            last_name: Set(request.last_name),
            password_hash: Set(password_hash),
            ..Default::default()
        };
        let user = new_user.insert(&txn).await.map_err(unique_violation)?;

        WatchlistService::ensure(&txn, user.id).await?;
        txn.commit().await?;

        log::info!("Registered user {} ({})", user.id, user.username);
        Ok(user)
    }

    /// Email inconnu et mauvais mot de passe échouent de la même façon
    pub async fn authenticate(
        db: &DatabaseConnection,
        hasher: &PasswordHasher,
        email: &str,
        password: &str,
    ) -> Result<users::Model, ApiError> {
        let user = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(db)
            .await?
            .ok_or(ApiError::InvalidCredentials)?;

        if !hasher.verify(password, &user.password_hash)? {
            log::debug!("Wrong password for user {}", user.id);
            return Err(ApiError::InvalidCredentials);
        }

        Ok(user)
    }

    pub async fn find(db: &DatabaseConnection, user_id: i32) -> Result<users::Model, ApiError> {
        users::Entity::find_by_id(user_id)
            .one(db)
            .await?
            .ok_or(ApiError::NotFound("User"))
    }

    pub async fn list(db: &DatabaseConnection) -> Result<Vec<users::Model>, ApiError> {
        let users = users::Entity::find()
            .order_by_asc(users::Column::Id)
            .all(db)
            .await?;
        Ok(users)
    }

    /// Applique les champs présents. La propriété est vérifiée par l'appelant.
    pub async fn update(
        db: &DatabaseConnection,
        user_id: i32,
        request: UpdateUserRequest,
    ) -> Result<users::Model, ApiError> {
        let user = Self::find(db, user_id).await?;
        let mut active_model: users::ActiveModel = user.clone().into();

        if let Some(email) = request.email {
            active_model.email = Set(email);
        }
        if let Some(username) = request.username {
            active_model.username = Set(username);
        }
        if let Some(first_name) = request.first_name {
            active_model.first_name = Set(first_name);
        }
        if let Some(last_name) = request.last_name {
            active_model.last_name = Set(last_name);
        }

        if !active_model.is_changed() {
            return Ok(user);
        }

        active_model.update(db).await.map_err(unique_violation)
    }
}

fn unique_violation(err: DbErr) -> ApiError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            let detail = detail.to_lowercase();
            let message = if detail.contains("email") {
                "Email already in use"
            } else if detail.contains("username") {
                "Username already taken"
            } else {
                "User already exists"
            };
            ApiError::Conflict(message.to_string())
        }
        _ => err.into(),
    }
}
