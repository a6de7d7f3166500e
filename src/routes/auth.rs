use actix_web::{get, post, web, HttpResponse};
use sea_orm::DatabaseConnection;
use validator::Validate;

use crate::error::ApiError;
use crate::middleware::auth::{removal_cookie, session_cookie};
use crate::middleware::AuthUser;
use crate::models::dto::{AccountResponse, LoginRequest, RegisterRequest};
use crate::models::users;
use crate::services::account_service::AccountService;
use crate::utils::jwt::SessionKeys;
use crate::utils::password::PasswordHasher;

/// POST /register - Créer un compte et ouvrir une session (PUBLIC)
#[post("/register")]
pub async fn register(
    body: web::Json<RegisterRequest>,
    db: web::Data<DatabaseConnection>,
    keys: web::Data<SessionKeys>,
    hasher: web::Data<PasswordHasher>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;

    let user = AccountService::register(db.get_ref(), hasher.get_ref(), body.into_inner()).await?;
    signed_in(&keys, user)
}

/// POST /login - Connexion par email et mot de passe (PUBLIC)
#[post("/login")]
pub async fn login(
    body: web::Json<LoginRequest>,
    db: web::Data<DatabaseConnection>,
    keys: web::Data<SessionKeys>,
    hasher: web::Data<PasswordHasher>,
) -> Result<HttpResponse, ApiError> {
    let user = AccountService::authenticate(db.get_ref(), hasher.get_ref(), &body.email, &body.password).await?;
    signed_in(&keys, user)
}

/// POST /logout - Supprimer le cookie de session (PUBLIC)
#[post("/logout")]
pub async fn logout() -> HttpResponse {
    HttpResponse::Ok()
        .cookie(removal_cookie())
        .json(serde_json::json!({
            "message": "Logged out"
        }))
}

/// GET /me - Compte de la session courante (PROTÉGÉ)
#[get("/me")]
pub async fn me(
    auth_user: AuthUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    // Un token valide pour un compte supprimé ne vaut pas session
    let user = match AccountService::find(db.get_ref(), auth_user.user_id).await {
        Err(ApiError::NotFound(_)) => return Err(ApiError::Unauthenticated),
        other => other?,
    };

    Ok(HttpResponse::Ok().json(AccountResponse::from(user)))
}

fn signed_in(keys: &SessionKeys, user: users::Model) -> Result<HttpResponse, ApiError> {
    let token = keys.issue(user.id)?;

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(token))
        .json(AccountResponse::from(user)))
}

pub fn auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(register)
        .service(login)
        .service(logout)
        .service(me);
}
