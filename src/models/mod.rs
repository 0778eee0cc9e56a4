pub mod post;

use std::ops::Deref;

use post::Post;

/// The process-wide post snapshot: loaded once, images attached once,
/// then only ever lent out by shared reference.
#[derive(Debug, Clone, PartialEq)]
pub struct PostCollection {
    posts: Vec<Post>,
}

impl PostCollection {
    pub fn new(posts: Vec<Post>) -> Self {
        PostCollection { posts }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> Vec<Post> {
        self.posts
    }
}

impl Deref for PostCollection {
    type Target = [Post];

    fn deref(&self) -> &[Post] {
        &self.posts
    }
}
