use actix_web::{get, post, routes, web, HttpResponse};
use sea_orm::DatabaseConnection;
use validator::Validate;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::dto::{CreateReviewRequest, UpdateReviewRequest};
use crate::services::review_service::{ReviewFilter, ReviewService};

/// POST /reviews - Noter un film, en remplaçant sa review précédente (PROTÉGÉ)
#[post("/reviews")]
pub async fn create_review(
    auth_user: AuthUser,
    body: web::Json<CreateReviewRequest>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;

    let review = ReviewService::create(db.get_ref(), auth_user.user_id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(review))
}

/// GET /reviews - Toutes les reviews (PUBLIC)
#[get("/reviews")]
pub async fn list_reviews(db: web::Data<DatabaseConnection>) -> Result<HttpResponse, ApiError> {
    list(&db, ReviewFilter::default()).await
}

/// GET /reviews/{id} (PUBLIC)
#[get("/reviews/{id}")]
pub async fn get_review(
    path: web::Path<i32>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let review = ReviewService::find(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(review))
}

/// GET /movies/{id}/reviews (PUBLIC)
#[get("/movies/{id}/reviews")]
pub async fn movie_reviews(
    path: web::Path<i32>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let filter = ReviewFilter {
        movie_id: Some(path.into_inner()),
        ..Default::default()
    };
    list(&db, filter).await
}

/// GET /users/{id}/reviews (PUBLIC)
#[get("/users/{id}/reviews")]
pub async fn user_reviews(
    path: web::Path<i32>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let filter = ReviewFilter {
        user_id: Some(path.into_inner()),
        ..Default::default()
    };
    list(&db, filter).await
}

/// GET /users/{id}/movies/{movie_id}/reviews (PUBLIC)
#[get("/users/{id}/movies/{movie_id}/reviews")]
pub async fn user_movie_reviews(
    path: web::Path<(i32, i32)>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let (user_id, movie_id) = path.into_inner();
    let filter = ReviewFilter {
        user_id: Some(user_id),
        movie_id: Some(movie_id),
    };
    list(&db, filter).await
}

/// PUT /reviews/{id}/update - Modifier note et texte (PROTÉGÉ, auteur uniquement)
#[routes]
#[put("/reviews/{id}")]
#[post("/reviews/{id}")]
#[put("/reviews/{id}/update")]
pub async fn update_review(
    auth_user: AuthUser,
    path: web::Path<i32>,
    body: web::Json<UpdateReviewRequest>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;

    let review = ReviewService::update(db.get_ref(), auth_user, path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(review))
}

/// DELETE /reviews/{id}/delete (PROTÉGÉ, auteur uniquement)
#[routes]
#[delete("/reviews/{id}")]
#[delete("/reviews/{id}/delete")]
pub async fn delete_review(
    auth_user: AuthUser,
    path: web::Path<i32>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let review = ReviewService::delete(db.get_ref(), auth_user, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(review))
}

async fn list(db: &DatabaseConnection, filter: ReviewFilter) -> Result<HttpResponse, ApiError> {
    let reviews = ReviewService::list(db, filter).await?;
    Ok(HttpResponse::Ok().json(reviews))
}

pub fn review_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create_review)
        .service(list_reviews)
        .service(get_review)
        .service(movie_reviews)
        .service(user_reviews)
        .service(user_movie_reviews)
        .service(update_review)
        .service(delete_review);
}
