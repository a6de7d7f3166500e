use sea_orm::sea_query::OnConflict;
use sea_orm::*;

use crate::error::ApiError;
use crate::models::dto::WatchlistResponse;
use crate::models::watchlist::{self, MovieIds};

pub struct WatchlistService;

impl WatchlistService {
    /// Renvoie la watchlist de l'utilisateur, créée vide si besoin.
    /// L'insertion ignore les conflits sur user_id : des appels concurrents
    /// finissent sur la même ligne.
    pub async fn ensure<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<watchlist::Model, DbErr> {
        Self::insert_empty(db, user_id).await?;

        watchlist::Entity::find()
            .filter(watchlist::Column::UserId.eq(user_id))
            .one(db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("watchlist of user {}", user_id)))
    }

    async fn insert_empty<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<(), DbErr> {
        let record = watchlist::ActiveModel {
            user_id: Set(user_id),
            movie_ids: Set(MovieIds::default()),
            version: Set(0),
            ..Default::default()
        };

        let inserted = watchlist::Entity::insert(record)
            .on_conflict(
                OnConflict::column(watchlist::Column::UserId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await;

        match inserted {
            Ok(_) | Err(DbErr::RecordNotInserted) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Lecture publique. Sans ligne, la liste est vide.
    pub async fn list(db: &DatabaseConnection, user_id: i32) -> Result<WatchlistResponse, DbErr> {
        let record = watchlist::Entity::find()
            .filter(watchlist::Column::UserId.eq(user_id))
            .one(db)
            .await?;

        Ok(record
            .map(WatchlistResponse::from)
            .unwrap_or_else(|| WatchlistResponse::empty(user_id)))
    }

    pub async fn add_movie(
        db: &DatabaseConnection,
        user_id: i32,
        movie_id: i32,
    ) -> Result<WatchlistResponse, ApiError> {
        Self::modify(db, user_id, |ids| ids.add(movie_id)).await
    }

    pub async fn remove_movie(
        db: &DatabaseConnection,
        user_id: i32,
        movie_id: i32,
    ) -> Result<WatchlistResponse, ApiError> {
        Self::modify(db, user_id, |ids| ids.remove(movie_id)).await
    }

    /// Lecture-modification-écriture sous verrou de ligne, dans une seule transaction.
    /// Les écrivains concurrents sur la même watchlist passent l'un après l'autre.
    async fn modify<F>(
        db: &DatabaseConnection,
        user_id: i32,
        change: F,
    ) -> Result<WatchlistResponse, ApiError>
    where
        F: FnOnce(&mut MovieIds) -> bool,
    {
        let txn = db.begin().await?;

        // 1. Créer la ligne si elle n'existe pas
        Self::insert_empty(&txn, user_id).await?;

        // 2. Verrouiller (SELECT ... FOR UPDATE)
        let current = watchlist::Entity::find()
            .filter(watchlist::Column::UserId.eq(user_id))
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or_else(|| ApiError::Internal(format!("Watchlist of user {} vanished", user_id)))?;

        let mut movie_ids = current.movie_ids.clone();
        if !change(&mut movie_ids) {
            txn.commit().await?;
            return Ok(current.into());
        }

        // 3. Écrire
        let version = current.version + 1;
        let mut active_model: watchlist::ActiveModel = current.into();
        active_model.movie_ids = Set(movie_ids);
        active_model.version = Set(version);
        let updated = active_model.update(&txn).await?;

        txn.commit().await?;
        Ok(updated.into())
    }
}
