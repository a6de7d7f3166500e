use actix_web::{middleware::Logger, App, HttpServer};

use mailboxd::config::Config;
use mailboxd::middleware::cors::cors_policy;
use mailboxd::utils::{jwt::SessionKeys, password::PasswordHasher};
use mailboxd::{db, AppServices};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("mailboxd=info,actix_web=info"),
    )
    .init();

    let config = Config::from_env().map_err(std::io::Error::other)?;

    log::info!("Connecting to database...");
    let connection = db::establish_connection(&config.database_url)
        .await
        .map_err(std::io::Error::other)?;
    db::create_tables(&connection)
        .await
        .map_err(std::io::Error::other)?;
    log::info!("Database ready");

    let services = AppServices::new(
        connection,
        SessionKeys::new(&config.jwt_secret),
        PasswordHasher::new(config.password_iterations),
    );

    let cors_origin = config.cors_origin.clone();

    log::info!("Starting server on http://{}:{}", config.bind_address, config.port);
    log::info!("Allowing CORS requests from {}", cors_origin);

    HttpServer::new(move || {
        let services = services.clone();
        App::new()
            .wrap(cors_policy(&cors_origin))
            .wrap(Logger::default())
            .configure(move |cfg| services.configure(cfg))
    })
    .bind((config.bind_address.as_str(), config.port))?
    .run()
    .await
}
