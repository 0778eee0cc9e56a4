//! Immutable view descriptors.
//!
//! A screen is a pure function from the post snapshot to a `Node` tree.
//! Nodes borrow posts rather than copying them, and clickables carry an
//! `Intent` instead of a closure so two renders of the same data compare
//! equal.

use tracing::debug;

use crate::models::post::Post;

/// What a click on a node asks the host to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent<'a> {
    OpenDrawer,
    SelectPost(&'a Post),
}

/// Receiver for the two outward events of the feed.
pub trait FeedCallbacks {
    fn open_drawer(&mut self);
    fn post_selected(&mut self, post: &Post);
}

/// Route one intent to exactly one callback.
pub fn dispatch(intent: Intent<'_>, callbacks: &mut impl FeedCallbacks) {
    match intent {
        Intent::OpenDrawer => {
            debug!("dispatch: open drawer");
            callbacks.open_drawer();
        }
        Intent::SelectPost(post) => {
            debug!(post_id = %post.id, "dispatch: post selected");
            callbacks.post_selected(post);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Insets {
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
    pub left: u16,
}

impl Insets {
    #[cfg(test)]
    pub const fn all(v: u16) -> Self {
        Insets { top: v, right: v, bottom: v, left: v }
    }

    pub const fn horizontal(v: u16) -> Self {
        Insets { top: 0, right: v, bottom: 0, left: v }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    JetnewsLogo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardStyle {
    Top,
    Simple,
    Popular,
    History,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node<'a> {
    Column(Vec<Node<'a>>),
    Row {
        padding: Insets,
        children: Vec<Node<'a>>,
    },
    AppBar {
        title: &'static str,
        navigation: Box<Node<'a>>,
    },
    IconButton {
        icon: Icon,
        on_click: Intent<'a>,
    },
    /// Takes the remaining height of its parent column and scrolls.
    VerticalScroll(Box<Node<'a>>),
    HorizontalScroll(Box<Node<'a>>),
    Spacer {
        width: u16,
    },
    Heading {
        text: &'static str,
        opacity: f32,
        padding: Insets,
    },
    Clickable {
        ripple: bool,
        on_click: Intent<'a>,
        child: Box<Node<'a>>,
    },
    Card {
        style: CardStyle,
        post: &'a Post,
    },
    Divider {
        opacity: f32,
        insets: Insets,
    },
}

impl<'a> Node<'a> {
    /// Intents of every clickable in pre-order. This is the focus order.
    pub fn clickables(&self) -> Vec<Intent<'a>> {
        let mut out = Vec::new();
        self.collect_clickables(&mut out);
        out
    }

    fn collect_clickables(&self, out: &mut Vec<Intent<'a>>) {
        match self {
            Node::Column(children) | Node::Row { children, .. } => {
                for child in children {
                    child.collect_clickables(out);
                }
            }
            Node::AppBar { navigation, .. } => navigation.collect_clickables(out),
            Node::IconButton { on_click, .. } => out.push(*on_click),
            Node::VerticalScroll(child) | Node::HorizontalScroll(child) => {
                child.collect_clickables(out)
            }
            Node::Clickable { on_click, .. } => out.push(*on_click),
            Node::Spacer { .. }
            | Node::Heading { .. }
            | Node::Card { .. }
            | Node::Divider { .. } => {}
        }
    }

    /// Posts shown by cards, in pre-order.
    #[cfg(test)]
    pub fn cards(&self) -> Vec<(CardStyle, &'a Post)> {
        let mut out = Vec::new();
        self.collect_cards(&mut out);
        out
    }

    #[cfg(test)]
    fn collect_cards(&self, out: &mut Vec<(CardStyle, &'a Post)>) {
        match self {
            Node::Column(children) | Node::Row { children, .. } => {
                for child in children {
                    child.collect_cards(out);
                }
            }
            Node::AppBar { navigation, .. } => navigation.collect_cards(out),
            Node::VerticalScroll(child)
            | Node::HorizontalScroll(child)
            | Node::Clickable { child, .. } => child.collect_cards(out),
            Node::Card { style, post } => out.push((*style, *post)),
            Node::IconButton { .. }
            | Node::Spacer { .. }
            | Node::Heading { .. }
            | Node::Divider { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data;

    #[derive(Default)]
    struct Recorder {
        drawer: usize,
        selected: Vec<*const Post>,
    }

    impl FeedCallbacks for Recorder {
        fn open_drawer(&mut self) {
            self.drawer += 1;
        }

        fn post_selected(&mut self, post: &Post) {
            self.selected.push(post as *const Post);
        }
    }

    #[test]
    fn select_intent_passes_the_same_post() {
        let posts = data::sample_posts().unwrap();
        let mut rec = Recorder::default();

        dispatch(Intent::SelectPost(&posts[2]), &mut rec);

        assert_eq!(rec.drawer, 0);
        assert_eq!(rec.selected, vec![&posts[2] as *const Post]);
    }

    #[test]
    fn drawer_intent_fires_once() {
        let mut rec = Recorder::default();
        dispatch(Intent::OpenDrawer, &mut rec);
        assert_eq!(rec.drawer, 1);
        assert!(rec.selected.is_empty());
    }

    #[test]
    fn clickables_are_collected_in_tree_order() {
        let posts = data::sample_posts().unwrap();
        let tree = Node::Column(vec![
            Node::IconButton {
                icon: Icon::JetnewsLogo,
                on_click: Intent::OpenDrawer,
            },
            Node::HorizontalScroll(Box::new(Node::Row {
                padding: Insets::default(),
                children: vec![
                    Node::Spacer { width: 2 },
                    Node::Clickable {
                        ripple: false,
                        on_click: Intent::SelectPost(&posts[1]),
                        child: Box::new(Node::Card {
                            style: CardStyle::Popular,
                            post: &posts[1],
                        }),
                    },
                ],
            })),
            Node::Clickable {
                ripple: true,
                on_click: Intent::SelectPost(&posts[0]),
                child: Box::new(Node::Card {
                    style: CardStyle::Top,
                    post: &posts[0],
                }),
            },
        ]);

        assert_eq!(
            tree.clickables(),
            vec![
                Intent::OpenDrawer,
                Intent::SelectPost(&posts[1]),
                Intent::SelectPost(&posts[0]),
            ]
        );
        assert_eq!(
            tree.cards(),
            vec![(CardStyle::Popular, &posts[1]), (CardStyle::Top, &posts[0])]
        );
    }
}
