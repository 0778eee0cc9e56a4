//! The home feed: slicing the snapshot and composing its sections.

pub mod cards;

use crate::error::FeedError;
use crate::models::post::Post;
use crate::view::{Icon, Insets, Intent, Node};

pub const APP_TITLE: &str = "Jetnews";
pub const TOP_HEADING: &str = "Top stories for you";
pub const POPULAR_HEADING: &str = "Popular on Jetnews";

/// Posts the fixed slice ranges below reach into.
pub const REQUIRED_POSTS: usize = 10;

const HEADING_OPACITY: f32 = 0.87;
const DIVIDER_OPACITY: f32 = 0.08;
const DIVIDER_INSET: u16 = 2;
const POPULAR_SPACING: u16 = 2;

/// Borrowed views into the post snapshot, one per section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedSlices<'a> {
    pub top: &'a Post,
    pub simple: &'a [Post],
    pub popular: &'a [Post],
    pub history: &'a [Post],
}

impl<'a> FeedSlices<'a> {
    pub fn new(posts: &'a [Post]) -> Result<Self, FeedError> {
        if posts.len() < REQUIRED_POSTS {
            return Err(FeedError::TooFewPosts {
                required: REQUIRED_POSTS,
                found: posts.len(),
            });
        }

        Ok(FeedSlices {
            top: &posts[3],
            simple: &posts[0..2],
            popular: &posts[2..7],
            history: &posts[7..10],
        })
    }
}

/// Compose the whole home screen. Fails only when the snapshot is too
/// short for the slice ranges.
pub fn home_screen(posts: &[Post]) -> Result<Node<'_>, FeedError> {
    let slices = FeedSlices::new(posts)?;

    let mut sections = Vec::new();
    sections.extend(top_section(slices.top));
    sections.extend(simple_section(slices.simple));
    sections.extend(popular_section(slices.popular));
    sections.extend(history_section(slices.history));

    Ok(Node::Column(vec![
        Node::AppBar {
            title: APP_TITLE,
            navigation: Box::new(Node::IconButton {
                icon: Icon::JetnewsLogo,
                on_click: Intent::OpenDrawer,
            }),
        },
        Node::VerticalScroll(Box::new(Node::Column(sections))),
    ]))
}

fn top_section(post: &Post) -> Vec<Node<'_>> {
    vec![
        Node::Heading {
            text: TOP_HEADING,
            opacity: HEADING_OPACITY,
            padding: Insets {
                top: 1,
                right: 2,
                bottom: 0,
                left: 2,
            },
        },
        Node::Clickable {
            ripple: true,
            on_click: Intent::SelectPost(post),
            child: Box::new(cards::post_card_top(post)),
        },
        divider(),
    ]
}

fn simple_section(posts: &[Post]) -> Vec<Node<'_>> {
    posts
        .iter()
        .flat_map(|post| [cards::post_card_simple(post), divider()])
        .collect()
}

fn popular_section(posts: &[Post]) -> Vec<Node<'_>> {
    let row = posts
        .iter()
        .flat_map(|post| {
            [
                Node::Spacer {
                    width: POPULAR_SPACING,
                },
                cards::post_card_popular(post),
            ]
        })
        .collect();

    vec![
        Node::Heading {
            text: POPULAR_HEADING,
            opacity: HEADING_OPACITY,
            padding: Insets {
                top: 1,
                right: 2,
                bottom: 1,
                left: 2,
            },
        },
        Node::HorizontalScroll(Box::new(Node::Row {
            padding: Insets {
                top: 0,
                right: 2,
                bottom: 1,
                left: 0,
            },
            children: row,
        })),
        divider(),
    ]
}

fn history_section(posts: &[Post]) -> Vec<Node<'_>> {
    posts
        .iter()
        .flat_map(|post| [cards::post_card_history(post), divider()])
        .collect()
}

fn divider() -> Node<'static> {
    Node::Divider {
        opacity: DIVIDER_OPACITY,
        insets: Insets::horizontal(DIVIDER_INSET),
    }
}
