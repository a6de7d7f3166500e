pub mod auth;
pub mod health;
pub mod reviews;
pub mod users;
pub mod watchlist;

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health::health_check)
        .service(health::ping)
        .configure(auth::auth_routes)
        .configure(users::user_routes)
        .configure(watchlist::watchlist_routes)
        .configure(reviews::review_routes);
}
