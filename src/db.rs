// Connexion à la base et création des tables

use sea_orm::sea_query::Index;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, Schema};

use crate::models::{reviews, users, watchlist};

pub async fn establish_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}

/// Crée les tables et les index uniques dont dépendent les handlers,
/// en ignorant ce qui existe déjà.
pub async fn create_tables(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    // Parents d'abord : watchlists et reviews référencent users
    create_table(db, &schema, users::Entity).await?;
    create_table(db, &schema, watchlist::Entity).await?;
    create_table(db, &schema, reviews::Entity).await?;

    // Une review par (utilisateur, film)
    let mut review_per_movie = Index::create();
    review_per_movie
        .name("idx_reviews_user_movie")
        .table(reviews::Entity)
        .col(reviews::Column::UserId)
        .col(reviews::Column::MovieId)
        .unique()
        .if_not_exists();
    db.execute(backend.build(&review_per_movie)).await?;

    let mut review_by_movie = Index::create();
    review_by_movie
        .name("idx_reviews_movie")
        .table(reviews::Entity)
        .col(reviews::Column::MovieId)
        .if_not_exists();
    db.execute(backend.build(&review_by_movie)).await?;

    Ok(())
}

async fn create_table<E>(db: &DatabaseConnection, schema: &Schema, entity: E) -> Result<(), DbErr>
where
    E: EntityTrait,
{
    let backend = db.get_database_backend();
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(backend.build(&statement)).await?;
    Ok(())
}
