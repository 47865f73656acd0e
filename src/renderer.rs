use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::config::Palette;
use crate::frame::TextFrame;
use crate::game::GameStatus;
use crate::grid::Glyphs;
use crate::ui::menu::render_status_menu;

/// Draws one text frame, then the popup for `status` on top of it.
pub fn render(
    frame: &mut Frame<'_>,
    text: &TextFrame,
    status: GameStatus,
    glyphs: Glyphs,
    palette: &Palette,
) {
    let area = frame.area();
    frame.render_widget(
        Block::new().style(Style::default().bg(palette.background)),
        area,
    );

    let header_height = u16::try_from(text.header.len()).unwrap_or(u16::MAX);
    let [header_area, map_area] =
        Layout::vertical([Constraint::Length(header_height), Constraint::Min(0)]).areas(area);

    let header: Vec<Line<'_>> = text
        .header
        .iter()
        .map(|line| Line::from(line.as_str()))
        .collect();
    frame.render_widget(
        Paragraph::new(header).style(Style::default().fg(palette.text)),
        header_area,
    );

    render_map(frame, map_area, &text.rows, glyphs, palette);
    render_status_menu(frame, area, status, palette);
}

fn render_map(
    frame: &mut Frame<'_>,
    area: Rect,
    rows: &[String],
    glyphs: Glyphs,
    palette: &Palette,
) {
    let lines: Vec<Line<'_>> = rows
        .iter()
        .map(|row| {
            let spans: Vec<Span<'_>> = row
                .chars()
                .map(|glyph| styled_glyph(glyph, glyphs, palette))
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

fn styled_glyph(glyph: char, glyphs: Glyphs, palette: &Palette) -> Span<'static> {
    let style = if glyph == glyphs.wall {
        Style::default().fg(palette.wall)
    } else if glyph == glyphs.actor {
        Style::default()
            .fg(palette.actor)
            .add_modifier(Modifier::BOLD)
    } else if glyph.is_ascii_digit() {
        Style::default()
            .fg(palette.collectable)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.text)
    };

    Span::styled(glyph.to_string(), style)
}
