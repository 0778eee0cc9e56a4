use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("home feed needs at least {required} posts, got {found}")]
    TooFewPosts { required: usize, found: usize },

    #[error("post {post_id} references unknown image '{image_id}'")]
    UnknownImage { post_id: String, image_id: String },

    #[error("malformed sample data: {0}")]
    SampleData(#[from] toml::de::Error),
}
