use chrono::NaiveDate;
use serde::Deserialize;

use crate::images::Image;

/// One article in the feed. Read-only once the collection is loaded.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    // Article-screen fields; no home card shows them.
    #[allow(dead_code)]
    #[serde(default)]
    pub subtitle: Option<String>,
    #[allow(dead_code)]
    pub url: String,
    #[allow(dead_code)]
    #[serde(default)]
    pub publication: Option<Publication>,
    pub metadata: Metadata,
    pub image_id: String,
    pub image_thumb_id: String,
    #[serde(skip)]
    pub image: Option<Image>,
    #[serde(skip)]
    pub image_thumb: Option<Image>,
}

#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Publication {
    pub name: String,
    pub logo_url: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Metadata {
    pub author: PostAuthor,
    pub date: NaiveDate,
    pub read_time_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PostAuthor {
    pub name: String,
    #[allow(dead_code)]
    #[serde(default)]
    pub url: Option<String>,
}
