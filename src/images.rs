//! Built-in drawable catalog and the one-time image attach pass.
//!
//! A terminal cannot show the article bitmaps, so each drawable resolves to
//! a tinted fill with its name. Resolution happens once, before the first
//! frame, and an unknown id aborts startup.

use tracing::debug;

use crate::error::FeedError;
use crate::models::post::Post;
use crate::models::PostCollection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Image {
    pub name: &'static str,
    pub glyph: char,
    pub tint: (u8, u8, u8),
}

const CATALOG: &[Image] = &[
    Image { name: "post_1", glyph: '░', tint: (98, 0, 238) },
    Image { name: "post_1_thumb", glyph: '▓', tint: (98, 0, 238) },
    Image { name: "post_2", glyph: '░', tint: (3, 218, 197) },
    Image { name: "post_2_thumb", glyph: '▓', tint: (3, 218, 197) },
    Image { name: "post_3", glyph: '▒', tint: (255, 111, 0) },
    Image { name: "post_3_thumb", glyph: '▓', tint: (255, 111, 0) },
    Image { name: "post_4", glyph: '░', tint: (0, 150, 136) },
    Image { name: "post_4_thumb", glyph: '▓', tint: (0, 150, 136) },
    Image { name: "post_5", glyph: '▒', tint: (233, 30, 99) },
    Image { name: "post_5_thumb", glyph: '▓', tint: (233, 30, 99) },
    Image { name: "post_6", glyph: '░', tint: (63, 81, 181) },
    Image { name: "post_6_thumb", glyph: '▓', tint: (63, 81, 181) },
    Image { name: "post_7", glyph: '▒', tint: (139, 195, 74) },
    Image { name: "post_7_thumb", glyph: '▓', tint: (139, 195, 74) },
    Image { name: "post_8", glyph: '░', tint: (255, 193, 7) },
    Image { name: "post_8_thumb", glyph: '▓', tint: (255, 193, 7) },
    Image { name: "post_9", glyph: '▒', tint: (121, 85, 72) },
    Image { name: "post_9_thumb", glyph: '▓', tint: (121, 85, 72) },
    Image { name: "post_10", glyph: '░', tint: (0, 188, 212) },
    Image { name: "post_10_thumb", glyph: '▓', tint: (0, 188, 212) },
    Image { name: "post_11", glyph: '▒', tint: (156, 39, 176) },
    Image { name: "post_11_thumb", glyph: '▓', tint: (156, 39, 176) },
];

pub fn lookup(name: &str) -> Option<Image> {
    CATALOG.iter().find(|img| img.name == name).copied()
}

/// Attach the hero image and thumbnail to every post.
pub fn load_images(posts: Vec<Post>) -> Result<PostCollection, FeedError> {
    let loaded = posts
        .into_iter()
        .map(|post| {
            let image = resolve(&post, &post.image_id)?;
            let image_thumb = resolve(&post, &post.image_thumb_id)?;
            Ok(Post {
                image: Some(image),
                image_thumb: Some(image_thumb),
                ..post
            })
        })
        .collect::<Result<Vec<_>, FeedError>>()?;

    debug!(count = loaded.len(), "attached images to posts");
    Ok(PostCollection::new(loaded))
}

fn resolve(post: &Post, image_id: &str) -> Result<Image, FeedError> {
    lookup(image_id).ok_or_else(|| FeedError::UnknownImage {
        post_id: post.id.clone(),
        image_id: image_id.to_string(),
    })
}
