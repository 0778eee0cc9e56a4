use crate::models::post::Post;
use crate::view::{CardStyle, Intent, Node};

pub fn post_card_top(post: &Post) -> Node<'_> {
    Node::Card {
        style: CardStyle::Top,
        post,
    }
}

pub fn post_card_simple(post: &Post) -> Node<'_> {
    selectable(CardStyle::Simple, post)
}

pub fn post_card_popular(post: &Post) -> Node<'_> {
    selectable(CardStyle::Popular, post)
}

pub fn post_card_history(post: &Post) -> Node<'_> {
    selectable(CardStyle::History, post)
}

fn selectable(style: CardStyle, post: &Post) -> Node<'_> {
    Node::Clickable {
        ripple: false,
        on_click: Intent::SelectPost(post),
        child: Box::new(Node::Card { style, post }),
    }
}
