use serde::Deserialize;

use crate::entities::movie;

#[derive(Clone, Debug, PartialEq)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub year: i32,
    pub description: String,
    pub rating: Option<f64>,
    pub ranking: Option<i32>,
    pub review: Option<String>,
    pub img_url: String,
}

impl From<movie::Model> for Movie {
    fn from(m: movie::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            year: m.year,
            description: m.description,
            rating: m.rating,
            ranking: m.ranking,
            review: m.review,
            img_url: m.img_url,
        }
    }
}

/// A movie as built from upstream metadata, before storage assigns an id.
#[derive(Clone, Debug, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub year: i32,
    pub description: String,
    pub img_url: String,
}

/// Columns to overwrite on update. `None` leaves the stored value alone.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MoviePatch {
    pub rating: Option<f64>,
    pub review: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: i32,
}

#[derive(Debug, Default, Deserialize)]
pub struct AddRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub csrf_token: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct EditRequest {
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub review: String,
    #[serde(default)]
    pub csrf_token: String,
}
