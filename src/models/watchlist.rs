// ============================================================================
// MODEL : WATCHLIST
// ============================================================================
//
// Une ligne par utilisateur avec la liste ordonnée des films (ids TMDB)
// qu'il veut voir.
//
// Colonnes :
//   - id (INTEGER, PRIMARY KEY)
//   - user_id (INTEGER, UNIQUE, FK vers users)
//   - movie_ids (tableau JSON d'entiers, sans doublon)
//   - version (INTEGER) - incrémentée à chaque modification
//
// ============================================================================

use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct MovieIds(pub Vec<i32>);

impl MovieIds {
    pub fn contains(&self, movie_id: i32) -> bool {
        self.0.contains(&movie_id)
    }

    /// Ajoute l'id s'il n'y est pas déjà. Renvoie true si la liste a changé.
    pub fn add(&mut self, movie_id: i32) -> bool {
        if self.contains(movie_id) {
            return false;
        }
        self.0.push(movie_id);
        true
    }

    /// Renvoie true si l'id était présent
    pub fn remove(&mut self, movie_id: i32) -> bool {
        let before = self.0.len();
        self.0.retain(|id| *id != movie_id);
        self.0.len() != before
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "watchlists")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub user_id: i32,
    #[sea_orm(column_type = "Json")]
    pub movie_ids: MovieIds,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_deduplicates() {
        let mut ids = MovieIds::default();
        assert!(ids.add(42));
        assert!(!ids.add(42));
        assert!(ids.add(7));
        assert_eq!(ids.0, vec![42, 7]);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut ids = MovieIds(vec![1, 2]);
        assert!(!ids.remove(3));
        assert!(ids.remove(1));
        assert_eq!(ids.0, vec![2]);
    }
}
