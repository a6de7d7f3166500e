use actix_cors::Cors;
use actix_web::http::header;

/// CORS pour le client web : une seule origine, cookies autorisés.
/// Le navigateur envoie le cookie de session avec `credentials: "include"`,
/// ce qui interdit l'origine joker `*`.
pub fn cors_policy(allowed_origin: &str) -> Cors {
    Cors::default()
        .allowed_origin(allowed_origin)
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .supports_credentials()
        .max_age(3600)
}
