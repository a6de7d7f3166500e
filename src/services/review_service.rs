use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::*;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::dto::{CreateReviewRequest, ReviewResponse, UpdateReviewRequest};
use crate::models::{reviews, users};

/// Filtre de listing. Un filtre vide liste toutes les reviews.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReviewFilter {
    pub user_id: Option<i32>,
    pub movie_id: Option<i32>,
}

pub struct ReviewService;

impl ReviewService {
    /// Une review par (utilisateur, film) : la seconde remplace note et texte
    pub async fn create(
        db: &DatabaseConnection,
        user_id: i32,
        request: CreateReviewRequest,
    ) -> Result<ReviewResponse, ApiError> {
        let now = Utc::now();
        let record = reviews::ActiveModel {
            user_id: Set(user_id),
            movie_id: Set(request.movie_id),
            rating: Set(request.rating),
            review_text: Set(request.review_text),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        reviews::Entity::insert(record)
            .on_conflict(
                OnConflict::columns([reviews::Column::UserId, reviews::Column::MovieId])
                    .update_columns([
                        reviews::Column::Rating,
                        reviews::Column::ReviewText,
                        reviews::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;

        let rows = Self::list(
            db,
            ReviewFilter {
                user_id: Some(user_id),
                movie_id: Some(request.movie_id),
            },
        )
        .await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| ApiError::Internal(format!("Review of user {} vanished after upsert", user_id)))
    }

    pub async fn find(db: &DatabaseConnection, review_id: i32) -> Result<ReviewResponse, ApiError> {
        let (review, author) = reviews::Entity::find_by_id(review_id)
            .find_also_related(users::Entity)
            .one(db)
            .await?
            .ok_or(ApiError::NotFound("Review"))?;

        Ok(ReviewResponse::new(review, author))
    }

    /// Les plus anciennes d'abord
    pub async fn list(db: &DatabaseConnection, filter: ReviewFilter) -> Result<Vec<ReviewResponse>, DbErr> {
        let mut query = reviews::Entity::find().find_also_related(users::Entity);

        if let Some(user_id) = filter.user_id {
            query = query.filter(reviews::Column::UserId.eq(user_id));
        }
        if let Some(movie_id) = filter.movie_id {
            query = query.filter(reviews::Column::MovieId.eq(movie_id));
        }

        let rows = query
            .order_by_asc(reviews::Column::CreatedAt)
            .order_by_asc(reviews::Column::Id)
            .all(db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(review, author)| ReviewResponse::new(review, author))
            .collect())
    }

    pub async fn update(
        db: &DatabaseConnection,
        caller: AuthUser,
        review_id: i32,
        request: UpdateReviewRequest,
    ) -> Result<ReviewResponse, ApiError> {
        let review = Self::owned_by(db, caller, review_id).await?;

        let mut active_model: reviews::ActiveModel = review.into();
        active_model.rating = Set(request.rating);
        active_model.review_text = Set(request.review_text);
        active_model.updated_at = Set(Utc::now());
        active_model.update(db).await?;

        Self::find(db, review_id).await
    }

    /// Renvoie la review telle qu'elle était avant suppression
    pub async fn delete(
        db: &DatabaseConnection,
        caller: AuthUser,
        review_id: i32,
    ) -> Result<ReviewResponse, ApiError> {
        Self::owned_by(db, caller, review_id).await?;
        let deleted = Self::find(db, review_id).await?;

        reviews::Entity::delete_by_id(review_id).exec(db).await?;

        Ok(deleted)
    }

    // 404 si absente, 403 si elle appartient à un autre
    async fn owned_by(
        db: &DatabaseConnection,
        caller: AuthUser,
        review_id: i32,
    ) -> Result<reviews::Model, ApiError> {
        let review = reviews::Entity::find_by_id(review_id)
            .one(db)
            .await?
            .ok_or(ApiError::NotFound("Review"))?;

        caller.ensure_owner(review.user_id)?;
        Ok(review)
    }
}
