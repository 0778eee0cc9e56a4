//! Paints a `Node` tree into a ratatui buffer.
//!
//! Scroll regions are painted in full into an off-screen buffer and the
//! visible window is copied back, so partially visible cards clip the
//! same way at any offset.

use ratatui::buffer::Buffer;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Widget};
use serde::{Deserialize, Serialize};

use crate::ui::cards;
use crate::view::{CardStyle, Icon, Insets, Node};

pub const APP_BAR_HEIGHT: u16 = 3;
const ICON_WIDTH: u16 = 3;

/// Host-owned scroll offsets. Horizontal offsets are indexed by the
/// pre-order position of each horizontal scroll region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollState {
    pub vertical: u16,
    pub horizontal: Vec<u16>,
}

pub struct Painter<'s> {
    focus: Option<usize>,
    scroll: &'s mut ScrollState,
    popular_card_width: u16,
    next_clickable: usize,
    next_hscroll: usize,
    highlight: bool,
    focused_area: Option<Rect>,
}

impl<'s> Painter<'s> {
    pub fn new(focus: Option<usize>, scroll: &'s mut ScrollState, popular_card_width: u16) -> Self {
        Painter {
            focus,
            scroll,
            popular_card_width,
            next_clickable: 0,
            next_hscroll: 0,
            highlight: false,
            focused_area: None,
        }
    }

    /// Where the focused clickable ended up on screen, if it is visible.
    #[cfg(test)]
    pub fn focused_area(&self) -> Option<Rect> {
        self.focused_area
    }

    pub fn paint(&mut self, node: &Node<'_>, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            self.skip(node);
            return;
        }

        match node {
            Node::Column(children) => self.paint_column(children, area, buf),
            Node::Row { padding, children } => self.paint_row(*padding, children, area, buf),
            Node::AppBar { title, navigation } => {
                Block::default()
                    .borders(Borders::BOTTOM)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .render(area, buf);
                let icon_area = Rect::new(area.x + 1, area.y + 1, ICON_WIDTH, 1).intersection(area);
                self.paint(navigation, icon_area, buf);
                let title_x = icon_area.right() + 1;
                let title_area =
                    Rect::new(title_x, area.y + 1, area.right().saturating_sub(title_x), 1)
                        .intersection(area);
                Paragraph::new(Span::styled(
                    *title,
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ))
                .render(title_area, buf);
            }
            Node::IconButton { icon, .. } => {
                let focused = self.enter_clickable(area);
                let style = if focused {
                    Style::default().fg(Color::Black).bg(Color::Cyan)
                } else {
                    Style::default().fg(Color::Cyan)
                };
                let glyph = match icon {
                    Icon::JetnewsLogo => " ◆ ",
                };
                Paragraph::new(Span::styled(glyph, style)).render(area, buf);
            }
            Node::VerticalScroll(child) => self.paint_vertical_scroll(child, area, buf),
            Node::HorizontalScroll(child) => self.paint_horizontal_scroll(child, area, buf),
            Node::Spacer { .. } => {}
            Node::Heading { text, opacity, padding } => {
                let inner = inset(area, *padding);
                Paragraph::new(Span::styled(
                    *text,
                    faded(*opacity).add_modifier(Modifier::BOLD),
                ))
                .render(Rect { height: inner.height.min(1), ..inner }, buf);
            }
            Node::Clickable { ripple, child, .. } => {
                let focused = self.enter_clickable(area);
                let outer = self.highlight;
                self.highlight = focused;
                self.paint(child, area, buf);
                self.highlight = outer;
                if focused && *ripple {
                    buf.set_style(area, Style::default().bg(Color::Rgb(24, 32, 40)));
                }
            }
            Node::Card { style, post } => cards::draw_card(buf, area, *style, post, self.highlight),
            Node::Divider { opacity, insets } => {
                let inner = inset(area, *insets);
                if inner.width > 0 {
                    let rule: String = "─".repeat(inner.width as usize);
                    buf.set_string(inner.x, inner.y, rule, faded(*opacity));
                }
            }
        }
    }

    fn enter_clickable(&mut self, area: Rect) -> bool {
        let index = self.next_clickable;
        self.next_clickable += 1;
        let focused = self.focus == Some(index);
        if focused {
            self.focused_area = Some(area);
        }
        focused
    }

    /// Keep clickable and scroll counters in step for nodes that got no space.
    fn skip(&mut self, node: &Node<'_>) {
        self.next_clickable += node.clickables().len();
        self.next_hscroll += count_hscrolls(node);
    }

    fn paint_column(&mut self, children: &[Node<'_>], area: Rect, buf: &mut Buffer) {
        let fixed: u16 = children
            .iter()
            .filter(|c| !matches!(c, Node::VerticalScroll(_)))
            .map(|c| self.measure(c, area.width))
            .fold(0u16, |acc, h| acc.saturating_add(h));
        let flexible = area.height.saturating_sub(fixed);

        let mut y = area.y;
        for child in children {
            let wanted = match child {
                Node::VerticalScroll(_) => flexible,
                _ => self.measure(child, area.width),
            };
            let h = wanted.min(area.bottom().saturating_sub(y));
            self.paint(child, Rect::new(area.x, y, area.width, h), buf);
            y += h;
        }
    }

    fn paint_row(&mut self, padding: Insets, children: &[Node<'_>], area: Rect, buf: &mut Buffer) {
        let inner = inset(area, padding);
        let mut x = inner.x;
        for child in children {
            let w = self.measure_width(child).min(inner.right().saturating_sub(x));
            let h = self.measure(child, w).min(inner.height);
            self.paint(child, Rect::new(x, inner.y, w, h), buf);
            x += w;
        }
    }

    fn paint_vertical_scroll(&mut self, child: &Node<'_>, area: Rect, buf: &mut Buffer) {
        let content_h = self.measure(child, area.width).max(1);
        let mut content = Buffer::empty(Rect::new(0, 0, area.width, content_h));

        let before = self.focused_area.take();
        self.paint(child, content.area, &mut content);
        let focused = self.focused_area.take();

        let max_offset = content_h.saturating_sub(area.height);
        let mut offset = self.scroll.vertical.min(max_offset);
        if let Some(r) = focused {
            offset = reveal(offset, r.y, r.height, area.height).min(max_offset);
        }
        self.scroll.vertical = offset;

        blit(&content, Position::new(0, offset), buf, area);
        self.focused_area = focused
            .and_then(|r| translate(r, area, Position::new(0, offset)))
            .or(before);
    }

    fn paint_horizontal_scroll(&mut self, child: &Node<'_>, area: Rect, buf: &mut Buffer) {
        let slot = self.next_hscroll;
        self.next_hscroll += 1;
        if self.scroll.horizontal.len() <= slot {
            self.scroll.horizontal.resize(slot + 1, 0);
        }

        let content_w = self.measure_width(child).max(1);
        let content_h = self.measure(child, content_w).max(1);
        let mut content = Buffer::empty(Rect::new(0, 0, content_w, content_h));

        let before = self.focused_area.take();
        self.paint(child, content.area, &mut content);
        let focused = self.focused_area.take();

        let max_offset = content_w.saturating_sub(area.width);
        let mut offset = self.scroll.horizontal[slot].min(max_offset);
        if let Some(r) = focused {
            offset = reveal(offset, r.x, r.width, area.width).min(max_offset);
        }
        self.scroll.horizontal[slot] = offset;

        blit(&content, Position::new(offset, 0), buf, area);
        self.focused_area = focused
            .and_then(|r| translate(r, area, Position::new(offset, 0)))
            .or(before);
    }

    /// Height `node` needs at `width` columns.
    pub fn measure(&self, node: &Node<'_>, width: u16) -> u16 {
        match node {
            Node::Column(children) => children
                .iter()
                .map(|c| self.measure(c, width))
                .fold(0u16, |acc, h| acc.saturating_add(h)),
            Node::Row { padding, children } => {
                let tallest = children
                    .iter()
                    .map(|c| self.measure(c, self.measure_width(c)))
                    .max()
                    .unwrap_or(0);
                padding
                    .top
                    .saturating_add(tallest)
                    .saturating_add(padding.bottom)
            }
            Node::AppBar { .. } => APP_BAR_HEIGHT,
            Node::IconButton { .. } => 1,
            Node::VerticalScroll(child) | Node::HorizontalScroll(child) => {
                self.measure(child, width)
            }
            Node::Spacer { .. } => 0,
            Node::Heading { padding, .. } => padding.top + 1 + padding.bottom,
            Node::Clickable { child, .. } => self.measure(child, width),
            Node::Card { style, post } => cards::card_height(*style, post, width),
            Node::Divider { insets, .. } => insets.top + 1 + insets.bottom,
        }
    }

    /// Intrinsic width of a node laid out inside a row.
    pub fn measure_width(&self, node: &Node<'_>) -> u16 {
        match node {
            Node::Row { padding, children } => children
                .iter()
                .map(|c| self.measure_width(c))
                .fold(padding.left, |acc, w| acc.saturating_add(w))
                .saturating_add(padding.right),
            Node::Spacer { width } => *width,
            Node::IconButton { .. } => ICON_WIDTH,
            Node::Clickable { child, .. }
            | Node::VerticalScroll(child)
            | Node::HorizontalScroll(child) => self.measure_width(child),
            Node::Card {
                style: CardStyle::Popular,
                ..
            } => self.popular_card_width,
            Node::Column(children) => children
                .iter()
                .map(|c| self.measure_width(c))
                .max()
                .unwrap_or(0),
            Node::AppBar { .. }
            | Node::Heading { .. }
            | Node::Card { .. }
            | Node::Divider { .. } => 0,
        }
    }
}

fn count_hscrolls(node: &Node<'_>) -> usize {
    match node {
        Node::HorizontalScroll(child) => 1 + count_hscrolls(child),
        Node::Column(children) | Node::Row { children, .. } => {
            children.iter().map(count_hscrolls).sum()
        }
        Node::AppBar { navigation, .. } => count_hscrolls(navigation),
        Node::VerticalScroll(child) | Node::Clickable { child, .. } => count_hscrolls(child),
        Node::IconButton { .. }
        | Node::Spacer { .. }
        | Node::Heading { .. }
        | Node::Card { .. }
        | Node::Divider { .. } => 0,
    }
}

fn inset(area: Rect, insets: Insets) -> Rect {
    let x = area.x.saturating_add(insets.left).min(area.right());
    let y = area.y.saturating_add(insets.top).min(area.bottom());
    let right = area.right().saturating_sub(insets.right).max(x);
    let bottom = area.bottom().saturating_sub(insets.bottom).max(y);
    Rect::new(x, y, right - x, bottom - y)
}

/// Terminal stand-in for alpha over the default background.
fn faded(opacity: f32) -> Style {
    let fg = if opacity >= 0.8 {
        Color::White
    } else if opacity >= 0.3 {
        Color::Gray
    } else {
        Color::DarkGray
    };
    Style::default().fg(fg)
}

/// Smallest move of `offset` that brings `[start, start + len)` into a
/// window of `window` cells.
fn reveal(offset: u16, start: u16, len: u16, window: u16) -> u16 {
    if start < offset {
        start
    } else if start.saturating_add(len) > offset.saturating_add(window) {
        start.saturating_add(len).saturating_sub(window).min(start)
    } else {
        offset
    }
}

fn blit(src: &Buffer, origin: Position, dst: &mut Buffer, area: Rect) {
    for dy in 0..area.height {
        for dx in 0..area.width {
            let from = Position::new(origin.x.saturating_add(dx), origin.y.saturating_add(dy));
            let to = Position::new(area.x + dx, area.y + dy);
            if let (Some(cell), Some(target)) = (src.cell(from), dst.cell_mut(to)) {
                *target = cell.clone();
            }
        }
    }
}

/// Map a rect from scroll-content coordinates to the window it was
/// copied into; `None` when it is scrolled entirely out of view.
fn translate(r: Rect, window: Rect, offset: Position) -> Option<Rect> {
    let visible = r.intersection(Rect::new(offset.x, offset.y, window.width, window.height));
    if visible.width == 0 || visible.height == 0 {
        return None;
    }
    Some(Rect::new(
        window.x + (visible.x - offset.x),
        window.y + (visible.y - offset.y),
        visible.width,
        visible.height,
    ))
}
