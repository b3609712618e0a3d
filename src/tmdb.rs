use jiff::civil::Date;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tracing::debug;

use crate::{
    error::{AppError, AppResult},
    models::NewMovie,
};

pub struct TmdbClient {
    client: reqwest::Client,
    access_token: String,
    base_url: String,
    language: String,
}

/// One hit from `/search/movie`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SearchCandidate {
    pub id: i32,
    pub title: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
}

/// The subset of `/movie/{id}` we persist.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub id: i32,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl MovieDetails {
    pub fn into_new_movie(self, image_base_url: &str) -> AppResult<NewMovie> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(AppError::Upstream(format!("movie {} has no title", self.id)));
        }
        let title = title.to_string();

        let year = release_year(self.release_date.as_deref().unwrap_or_default()).map_err(|_| {
            AppError::Upstream(format!("\"{title}\" has no usable release date"))
        })?;

        let img_url = poster_url(image_base_url, self.poster_path.as_deref()).unwrap_or_default();

        Ok(NewMovie { title, year, description: self.overview, img_url })
    }
}

pub fn poster_url(image_base_url: &str, poster_path: Option<&str>) -> Option<String> {
    let path = poster_path.map(|p| p.trim_start_matches('/')).filter(|p| !p.is_empty())?;
    Some(format!("{}/{}", image_base_url.trim_end_matches('/'), path))
}

/// Year portion of a TMDB `YYYY-MM-DD` date.
pub fn release_year(release_date: &str) -> AppResult<i32> {
    let date: Date = release_date.trim().parse()?;
    Ok(i32::from(date.year()))
}

impl TmdbClient {
    pub fn new(
        client: reqwest::Client,
        access_token: String,
        base_url: String,
        language: String,
    ) -> Self {
        if access_token.trim().is_empty() {
            tracing::warn!("Using mock TMDB data - no TMDB_ACCESS_TOKEN provided");
        }

        Self { client, access_token, base_url, language }
    }

    fn is_mock(&self) -> bool {
        self.access_token.trim().is_empty()
    }

    pub async fn search(&self, title: &str) -> AppResult<Vec<SearchCandidate>> {
        if self.is_mock() {
            return Ok(mock::search(title));
        }

        debug!(title = %title, "searching TMDB");

        let url = format!("{}/search/movie", self.base_url.trim_end_matches('/'));
        let resp: SearchResponse = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .header(ACCEPT, "application/json")
            .query(&[
                ("query", title),
                ("include_adult", "false"),
                ("language", self.language.as_str()),
                ("page", "1"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!(title = %title, results = resp.results.len(), "TMDB search done");
        Ok(resp.results)
    }

    pub async fn fetch_details(&self, tmdb_id: i32) -> AppResult<MovieDetails> {
        if self.is_mock() {
            return mock::details(tmdb_id)
                .ok_or_else(|| AppError::Upstream(format!("no movie with id {tmdb_id}")));
        }

        debug!(tmdb_id = tmdb_id, "fetching TMDB details");

        let url = format!("{}/movie/{}", self.base_url.trim_end_matches('/'), tmdb_id);
        let details: MovieDetails = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .header(ACCEPT, "application/json")
            .query(&[("language", self.language.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(details)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<SearchCandidate>,
}

mod mock {
    use super::{MovieDetails, SearchCandidate};

    const CATALOGUE: &[(i32, &str, &str, &str, &str)] = &[
        (
            27205,
            "Inception",
            "2010-07-15",
            "/oYuLEt3zVCKq57qu2F8dT7NIa6f.jpg",
            "Cobb, a skilled thief who commits corporate espionage by infiltrating the subconscious of his targets is offered a chance to regain his old life as payment for a task considered to be impossible.",
        ),
        (
            550,
            "Fight Club",
            "1999-10-15",
            "/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg",
            "A ticking-time-bomb insomniac and a slippery soap salesman channel primal male aggression into a shocking new form of therapy.",
        ),
        (
            1817,
            "Phone Booth",
            "2002-11-14",
            "/tjrX2oWRCM3Tvarz38zlZM7Uc10.jpg",
            "Publicist Stuart Shepard finds himself trapped in a phone booth, pinned down by an extortionist's sniper rifle.",
        ),
    ];

    pub(super) fn search(title: &str) -> Vec<SearchCandidate> {
        let needle = title.trim().to_lowercase();
        CATALOGUE
            .iter()
            .filter(|(_, t, ..)| t.to_lowercase().contains(&needle))
            .map(|&(id, title, release_date, poster_path, overview)| SearchCandidate {
                id,
                title: title.to_string(),
                release_date: Some(release_date.to_string()),
                poster_path: Some(poster_path.to_string()),
                overview: Some(overview.to_string()),
            })
            .collect()
    }

    pub(super) fn details(tmdb_id: i32) -> Option<MovieDetails> {
        CATALOGUE.iter().find(|(id, ..)| *id == tmdb_id).map(
            |&(id, title, release_date, poster_path, overview)| MovieDetails {
                id,
                title: title.to_string(),
                overview: overview.to_string(),
                release_date: Some(release_date.to_string()),
                poster_path: Some(poster_path.to_string()),
            },
        )
    }
}
