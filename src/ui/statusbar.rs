use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

const HINTS: &str = "j/k: move | Enter: open | Esc: back | q: quit";

pub fn draw_statusbar(frame: &mut Frame, area: Rect, notice: Option<&str>, show_hints: bool) {
    if let Some(notice) = notice {
        let bar = Paragraph::new(format!(" {}  (Esc: dismiss)", notice))
            .style(Style::default().fg(Color::Black).bg(Color::Cyan));
        frame.render_widget(bar, area);
        return;
    }

    let text = if show_hints { HINTS } else { "" };
    let bar = Paragraph::new(format!(" {}", text))
        .style(Style::default().fg(Color::DarkGray).bg(Color::Black));
    frame.render_widget(bar, area);
}
