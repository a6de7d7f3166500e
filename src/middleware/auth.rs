use actix_web::{
    cookie::{time::Duration as CookieDuration, Cookie, SameSite},
    dev::Payload,
    web, FromRequest, HttpRequest,
};
use futures::future::{ready, Ready};
use serde::Serialize;

use crate::error::ApiError;
use crate::utils::jwt::{SessionKeys, SESSION_TTL_MINUTES};

/// Nom du cookie qui porte le token de session
pub const SESSION_COOKIE: &str = "token";

/// Structure qui contient l'utilisateur authentifié (lu depuis le cookie de session)
/// Utilisée comme extracteur dans les routes protégées
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AuthUser {
    pub user_id: i32,
}

impl AuthUser {
    /// Contrôle de propriété : l'utilisateur n'agit que sur son propre compte
    pub fn ensure_owner(&self, owner_id: i32) -> Result<(), ApiError> {
        if self.user_id == owner_id {
            Ok(())
        } else {
            Err(ApiError::Forbidden)
        }
    }
}

impl FromRequest for AuthUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthUser, ApiError> {
    // 1. Lire le cookie de session
    let cookie = req.cookie(SESSION_COOKIE).ok_or(ApiError::Unauthenticated)?;

    // 2. Récupérer les clés injectées au démarrage
    let keys = req
        .app_data::<web::Data<SessionKeys>>()
        .ok_or_else(|| ApiError::Internal("SessionKeys not registered".to_string()))?;

    // 3. Vérifier la signature et l'expiration
    let user_id = keys.verify(cookie.value()).map_err(|e| {
        log::debug!("Rejected session cookie: {}", e);
        ApiError::Unauthenticated
    })?;

    Ok(AuthUser { user_id })
}

/// Cookie HTTP-only contenant un token fraîchement émis
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::minutes(SESSION_TTL_MINUTES))
        .finish()
}

/// Cookie qui fait oublier la session au navigateur
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .finish();
    cookie.make_removal();
    cookie
}
