use ratatui::buffer::Buffer;
use ratatui::layout::Position;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::images::Image;
use crate::models::post::Post;
use crate::utils::text::{ellipsize, wrap_words};
use crate::utils::time::{date_and_read_time, short_date};
use crate::view::CardStyle;

const TOP_IMAGE_HEIGHT: u16 = 6;
const TOP_TITLE_LINES: usize = 2;
const THUMB_WIDTH: u16 = 6;
const THUMB_HEIGHT: u16 = 3;
const POPULAR_IMAGE_HEIGHT: u16 = 4;
pub const SIMPLE_HEIGHT: u16 = 5;
pub const HISTORY_HEIGHT: u16 = 6;
pub const POPULAR_HEIGHT: u16 = 10;

pub fn card_height(style: CardStyle, post: &Post, width: u16) -> u16 {
    match style {
        CardStyle::Top => {
            let title_lines =
                wrap_words(&post.title, width.saturating_sub(4), TOP_TITLE_LINES).len() as u16;
            1 + TOP_IMAGE_HEIGHT + 1 + title_lines.max(1) + 1 + 1 + 1
        }
        CardStyle::Simple => SIMPLE_HEIGHT,
        CardStyle::History => HISTORY_HEIGHT,
        CardStyle::Popular => POPULAR_HEIGHT,
    }
}

pub fn draw_card(buf: &mut Buffer, area: Rect, style: CardStyle, post: &Post, selected: bool) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    match style {
        CardStyle::Top => draw_top(buf, area, post, selected),
        CardStyle::Simple => draw_simple(buf, area, post, selected),
        CardStyle::History => draw_history(buf, area, post, selected),
        CardStyle::Popular => draw_popular(buf, area, post, selected),
    }
}

fn title_style(selected: bool) -> Style {
    let style = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    if selected {
        style.fg(Color::Cyan)
    } else {
        style
    }
}

fn dim() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn selection_bar(buf: &mut Buffer, area: Rect, selected: bool) {
    let style = if selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Black)
    };
    Block::default()
        .borders(Borders::LEFT)
        .border_style(style)
        .render(area, buf);
}

fn line(buf: &mut Buffer, x: u16, y: u16, w: u16, content: Line<'_>) {
    if w == 0 || !buf.area.contains(Position::new(x, y)) {
        return;
    }
    Paragraph::new(content).render(Rect::new(x, y, w, 1), buf);
}

fn draw_top(buf: &mut Buffer, area: Rect, post: &Post, selected: bool) {
    let x = area.x + 2;
    let w = area.width.saturating_sub(4);
    let bottom = area.bottom();
    let mut y = area.y + 1;

    let image_h = TOP_IMAGE_HEIGHT.min(bottom.saturating_sub(y));
    draw_image(buf, Rect::new(x, y, w, image_h), post.image.as_ref());
    y += image_h + 1;

    for title_line in wrap_words(&post.title, w, TOP_TITLE_LINES) {
        if y >= bottom {
            return;
        }
        line(buf, x, y, w, Line::styled(title_line, title_style(selected)));
        y += 1;
    }

    if y < bottom {
        line(
            buf,
            x,
            y,
            w,
            Line::styled(ellipsize(&post.metadata.author.name, w as usize), Style::default()),
        );
        y += 1;
    }
    if y < bottom {
        line(buf, x, y, w, Line::styled(date_and_read_time(&post.metadata), dim()));
    }

    if selected {
        selection_bar(buf, area, true);
    }
}

fn draw_simple(buf: &mut Buffer, area: Rect, post: &Post, selected: bool) {
    selection_bar(buf, area, selected);

    let y = area.y + 1;
    let thumb = Rect::new(area.x + 2, y, THUMB_WIDTH, THUMB_HEIGHT).intersection(area);
    draw_image(buf, thumb, post.image_thumb.as_ref());

    let x = thumb.right() + 2;
    let w = area.right().saturating_sub(x + 1);
    let mut row = y;
    for title_line in wrap_words(&post.title, w, 2) {
        line(buf, x, row, w, Line::styled(title_line, title_style(selected)));
        row += 1;
    }

    let meta = format!(
        "{} · {}",
        post.metadata.author.name,
        date_and_read_time(&post.metadata)
    );
    line(buf, x, y + 2, w, Line::styled(ellipsize(&meta, w as usize), dim()));
}

fn draw_history(buf: &mut Buffer, area: Rect, post: &Post, selected: bool) {
    selection_bar(buf, area, selected);

    let y = area.y + 1;
    let thumb = Rect::new(area.x + 2, y, THUMB_WIDTH, THUMB_HEIGHT).intersection(area);
    draw_image(buf, thumb, post.image_thumb.as_ref());

    let x = thumb.right() + 2;
    let w = area.right().saturating_sub(x + 1);
    line(
        buf,
        x,
        y,
        w,
        Line::styled("BASED ON YOUR HISTORY", dim().add_modifier(Modifier::BOLD)),
    );

    let mut row = y + 1;
    for title_line in wrap_words(&post.title, w, 2) {
        line(buf, x, row, w, Line::styled(title_line, title_style(selected)));
        row += 1;
    }

    let meta = format!(
        "{} · {} min read",
        post.metadata.author.name, post.metadata.read_time_minutes
    );
    line(buf, x, y + 3, w, Line::styled(ellipsize(&meta, w as usize), dim()));
}

fn draw_popular(buf: &mut Buffer, area: Rect, post: &Post, selected: bool) {
    let border_style = if selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);
    block.render(area, buf);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let image_h = POPULAR_IMAGE_HEIGHT.min(inner.height);
    draw_image(
        buf,
        Rect::new(inner.x, inner.y, inner.width, image_h),
        post.image.as_ref(),
    );

    let x = inner.x + 1;
    let w = inner.width.saturating_sub(2);
    let mut y = inner.y + image_h;
    for title_line in wrap_words(&post.title, w, 2) {
        line(buf, x, y, w, Line::styled(title_line, title_style(selected)));
        y += 1;
    }

    let author_y = inner.y + image_h + 2;
    line(
        buf,
        x,
        author_y,
        w,
        Line::styled(ellipsize(&post.metadata.author.name, w as usize), Style::default()),
    );
    let meta = Line::from(vec![
        Span::styled(short_date(&post.metadata.date), dim()),
        Span::styled(format!(" · {} min", post.metadata.read_time_minutes), dim()),
    ]);
    line(buf, x, author_y + 1, w, meta);
}

/// Tinted block standing in for a bitmap, with the drawable name centered.
pub fn draw_image(buf: &mut Buffer, area: Rect, image: Option<&Image>) {
    let area = area.intersection(buf.area);
    if area.width == 0 || area.height == 0 {
        return;
    }

    let Some(image) = image else {
        buf.set_style(area, Style::default().bg(Color::DarkGray));
        return;
    };

    let (r, g, b) = image.tint;
    let style = Style::default().fg(Color::Rgb(r, g, b));
    let fill: String = std::iter::repeat(image.glyph)
        .take(area.width as usize)
        .collect();
    for y in area.top()..area.bottom() {
        buf.set_string(area.x, y, &fill, style);
    }

    if area.height >= 3 {
        let label = ellipsize(image.name, area.width as usize);
        let label_w = label.chars().count() as u16;
        let lx = area.x + area.width.saturating_sub(label_w) / 2;
        let ly = area.y + area.height / 2;
        buf.set_string(lx, ly, &label, style.add_modifier(Modifier::BOLD));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{data, images};

    fn row_text(buf: &Buffer, y: u16) -> String {
        (buf.area.left()..buf.area.right())
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    fn first_post() -> Post {
        let posts = images::load_images(data::sample_posts().unwrap()).unwrap();
        posts.into_inner().remove(0)
    }

    #[test]
    fn top_height_grows_with_title_lines() {
        let post = first_post();
        let wide = card_height(CardStyle::Top, &post, 200);
        let narrow = card_height(CardStyle::Top, &post, 30);
        assert_eq!(wide + 1, narrow);
    }

    #[test]
    fn history_card_shows_overline_title_and_read_time() {
        let post = first_post();
        let area = Rect::new(0, 0, 60, HISTORY_HEIGHT);
        let mut buf = Buffer::empty(area);
        draw_card(&mut buf, area, CardStyle::History, &post, false);

        assert!(row_text(&buf, 1).contains("BASED ON YOUR HISTORY"));
        assert!(row_text(&buf, 2).contains("A Little Thing about"));
        assert!(row_text(&buf, 4).contains("Pietro Maggi · 1 min read"));
    }

    #[test]
    fn popular_card_border_follows_selection() {
        let post = first_post();
        let area = Rect::new(0, 0, 30, POPULAR_HEIGHT);

        let mut plain = Buffer::empty(area);
        draw_card(&mut plain, area, CardStyle::Popular, &post, false);
        let mut focused = Buffer::empty(area);
        draw_card(&mut focused, area, CardStyle::Popular, &post, true);

        assert_eq!(plain[(0, 0)].fg, Color::DarkGray);
        assert_eq!(focused[(0, 0)].fg, Color::Cyan);
    }

    #[test]
    fn image_is_clipped_to_the_buffer() {
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);
        draw_image(
            &mut buf,
            Rect::new(2, 1, 10, 10),
            images::lookup("post_1").as_ref(),
        );
        assert_eq!(buf[(3, 1)].symbol(), "░");
        assert_eq!(buf[(0, 0)].symbol(), " ");
    }
}
