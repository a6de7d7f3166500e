use actix_web::{get, put, web, HttpResponse};
use sea_orm::DatabaseConnection;
use validator::Validate;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::dto::{AccountResponse, UpdateUserRequest};
use crate::services::account_service::AccountService;

/// GET /users - Tous les comptes (PUBLIC)
#[get("/users")]
pub async fn list_users(db: web::Data<DatabaseConnection>) -> Result<HttpResponse, ApiError> {
    let users: Vec<AccountResponse> = AccountService::list(db.get_ref())
        .await?
        .into_iter()
        .map(AccountResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(users))
}

/// GET /users/{id} - Un compte (PUBLIC)
#[get("/users/{id}")]
pub async fn get_user(
    path: web::Path<i32>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let user = AccountService::find(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(AccountResponse::from(user)))
}

/// PUT /users/{id} - Modifier son propre profil (PROTÉGÉ, propriétaire uniquement)
#[put("/users/{id}")]
pub async fn update_user(
    auth_user: AuthUser,
    path: web::Path<i32>,
    body: web::Json<UpdateUserRequest>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();

    // Cible inconnue : 404 avant 403
    AccountService::find(db.get_ref(), user_id).await?;
    auth_user.ensure_owner(user_id)?;
    body.validate()?;

    let user = AccountService::update(db.get_ref(), user_id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(AccountResponse::from(user)))
}

pub fn user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_users)
        .service(get_user)
        .service(update_user);
}
