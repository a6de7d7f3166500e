#![allow(dead_code)]

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::test;
use sea_orm::{ConnectOptions, Database};
use serde_json::{json, Value};

use mailboxd::db;
use mailboxd::middleware::auth::SESSION_COOKIE;
use mailboxd::utils::{jwt::SessionKeys, password::PasswordHasher};
use mailboxd::AppServices;

pub const SECRET: &str = "test-secret";

/// Base en mémoire neuve avec toutes les tables, hash de mot de passe peu coûteux
pub async fn test_services() -> AppServices {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let connection = Database::connect(options).await.unwrap();
    db::create_tables(&connection).await.unwrap();

    AppServices::new(connection, SessionKeys::new(SECRET), PasswordHasher::new(1_000))
}

pub fn registration(username: &str) -> Value {
    json!({
        "email": format!("{}@example.com", username),
        "password": format!("{}-password", username),
        "firstName": username,
        "lastName": "Tester",
        "username": username,
    })
}

pub fn session_of<B>(resp: &ServiceResponse<B>) -> Cookie<'static> {
    resp.response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .map(|c| c.into_owned())
        .expect("response sets the session cookie")
}

pub async fn body_json(resp: ServiceResponse) -> Value {
    test::read_body_json(resp).await
}
