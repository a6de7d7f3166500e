pub mod account_service;
pub mod review_service;
pub mod watchlist_service;
