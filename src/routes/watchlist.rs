use actix_web::{get, post, routes, web, HttpResponse};
use sea_orm::DatabaseConnection;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::dto::WatchlistRequest;
use crate::services::watchlist_service::WatchlistService;

/// GET /users/{id}/watchlist - Watchlist d'un utilisateur (PUBLIC)
#[get("/users/{id}/watchlist")]
pub async fn get_watchlist(
    path: web::Path<i32>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let watchlist = WatchlistService::list(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(watchlist))
}

/// POST /users/{id}/watchlist - Ajouter un film à sa propre watchlist (PROTÉGÉ, propriétaire uniquement)
#[post("/users/{id}/watchlist")]
pub async fn add_to_user_watchlist(
    auth_user: AuthUser,
    path: web::Path<i32>,
    body: web::Json<WatchlistRequest>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();
    auth_user.ensure_owner(user_id)?;

    let watchlist = WatchlistService::add_movie(db.get_ref(), user_id, body.movie_id).await?;
    Ok(HttpResponse::Ok().json(watchlist))
}

/// POST|PUT /add-to-watchlist - Ajouter un film à la watchlist de la session (PROTÉGÉ)
#[routes]
#[post("/add-to-watchlist")]
#[put("/add-to-watchlist")]
pub async fn add_to_watchlist(
    auth_user: AuthUser,
    body: web::Json<WatchlistRequest>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let watchlist = WatchlistService::add_movie(db.get_ref(), auth_user.user_id, body.movie_id).await?;
    Ok(HttpResponse::Ok().json(watchlist))
}

/// DELETE|POST /remove-from-watchlist - Retirer un film de la watchlist de la session (PROTÉGÉ)
#[routes]
#[delete("/remove-from-watchlist")]
#[post("/remove-from-watchlist")]
pub async fn remove_from_watchlist(
    auth_user: AuthUser,
    body: web::Json<WatchlistRequest>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let watchlist = WatchlistService::remove_movie(db.get_ref(), auth_user.user_id, body.movie_id).await?;
    Ok(HttpResponse::Ok().json(watchlist))
}

pub fn watchlist_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(get_watchlist)
        .service(add_to_user_watchlist)
        .service(add_to_watchlist)
        .service(remove_from_watchlist);
}
