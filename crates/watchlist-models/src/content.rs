use serde::{Deserialize, Serialize};

/// Denormalized content card data embedded in watchlist payloads.
/// The catalog service owns the full record; this is only what the
/// list and stats views render.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentSummary {
    pub id: String,
    pub title: String,
    pub year: Option<u32>,
    pub content_type: Option<ContentType>,
    pub episodes: Option<u32>,
    pub rating: Option<f32>,
    pub country: Option<String>,
    pub poster_url: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Drama,
    Movie,
    Series,
    Anime,
}

impl ContentType {
    pub fn label(&self) -> &'static str {
        match self {
            ContentType::Drama => "Drama",
            ContentType::Movie => "Movie",
            ContentType::Series => "Series",
            ContentType::Anime => "Anime",
        }
    }
}
