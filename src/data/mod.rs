use serde::Deserialize;

use crate::error::FeedError;
use crate::models::post::Post;

const SAMPLE_POSTS: &str = include_str!("posts.toml");

#[derive(Deserialize)]
struct SampleFile {
    posts: Vec<Post>,
}

/// The static feed shipped with the binary, in display order, images not
/// yet attached.
pub fn sample_posts() -> Result<Vec<Post>, FeedError> {
    let file: SampleFile = toml::from_str(SAMPLE_POSTS)?;
    Ok(file.posts)
}
