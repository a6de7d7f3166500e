pub mod catalog;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use actix_web::web;
use sea_orm::DatabaseConnection;

use crate::error::ApiError;
use crate::utils::jwt::SessionKeys;
use crate::utils::password::PasswordHasher;

/// État partagé par tous les workers : connexion DB, clés de session et hasher,
/// plus les handlers d'erreur JSON/path et toutes les routes.
#[derive(Clone)]
pub struct AppServices {
    pub db: web::Data<DatabaseConnection>,
    pub sessions: web::Data<SessionKeys>,
    pub hasher: web::Data<PasswordHasher>,
}

impl AppServices {
    pub fn new(db: DatabaseConnection, sessions: SessionKeys, hasher: PasswordHasher) -> Self {
        AppServices {
            db: web::Data::new(db),
            sessions: web::Data::new(sessions),
            hasher: web::Data::new(hasher),
        }
    }

    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.db.clone())
            .app_data(self.sessions.clone())
            .app_data(self.hasher.clone())
            .app_data(
                web::JsonConfig::default()
                    .error_handler(|err, _req| ApiError::Validation(err.to_string()).into()),
            )
            .app_data(
                web::PathConfig::default()
                    .error_handler(|err, _req| ApiError::Validation(err.to_string()).into()),
            )
            .configure(routes::configure_routes);
    }
}
