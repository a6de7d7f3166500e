// Client en lecture seule du catalogue de films TMDB.
// Seuls les clients l'utilisent ; le serveur ne stocke que des ids de films.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const TMDB_API_URL: &str = "https://api.themoviedb.org/3";
pub const TMDB_IMAGE_URL: &str = "https://image.tmdb.org/t/p";

const LANGUAGE: &str = "en-US";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Movie {0} not found in catalog")]
    NotFound(i32),

    #[error("Catalog request failed: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub overview: String,
    pub release_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPage {
    pub page: u32,
    pub results: Vec<Movie>,
    pub total_pages: u32,
    pub total_results: u32,
}

pub struct MovieCatalog {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl MovieCatalog {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(TMDB_API_URL, api_key)
    }

    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        MovieCatalog {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Titre, affiche, note et résumé d'un film
    pub async fn movie(&self, movie_id: i32) -> Result<Movie, CatalogError> {
        let response = self
            .http
            .get(format!("{}/movie/{}", self.base_url, movie_id))
            .query(&[("api_key", self.api_key.as_str()), ("language", LANGUAGE)])
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(movie_id));
        }

        Ok(response.error_for_status()?.json::<Movie>().await?)
    }

    pub async fn search(&self, query: &str, page: u32) -> Result<SearchPage, CatalogError> {
        let page = page.max(1).to_string();
        let response = self
            .http
            .get(format!("{}/search/movie", self.base_url))
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", LANGUAGE),
                ("query", query),
                ("page", page.as_str()),
            ])
            .send()
            .await?;

        Ok(response.error_for_status()?.json::<SearchPage>().await?)
    }

    /// URL d'image pour un poster/backdrop, taille "w500" ou "original" par exemple
    pub fn poster_url(poster_path: &str, size: &str) -> String {
        format!("{}/{}/{}", TMDB_IMAGE_URL, size, poster_path.trim_start_matches('/'))
    }
}
