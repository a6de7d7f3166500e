// ============================================================================
// MODELS
// ============================================================================
//
// Entités SeaORM (une par table) + DTOs de l'API.
//
//   - users : comptes (email et username uniques)
//   - watchlist : une ligne par utilisateur avec la liste des films
//   - reviews : note + texte par (utilisateur, film)
//   - dto : corps de requêtes/réponses
//   - health : réponse du health check
//
// ============================================================================

pub mod dto;
pub mod health;
pub mod reviews;
pub mod users;
pub mod watchlist;
