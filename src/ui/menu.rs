use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::Palette;
use crate::game::GameStatus;

/// Draws the popup matching `status`. Nothing is drawn while ticking.
pub fn render_status_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    status: GameStatus,
    palette: &Palette,
) {
    match status {
        GameStatus::Tick => {}
        GameStatus::AwaitingStart => render_start_menu(frame, area, palette),
        GameStatus::HealthLost => render_notice(
            frame,
            area,
            " respawn ",
            "1 HP lost!",
            "[Enter] Respawn",
            palette.menu_health_bg,
            palette,
        ),
        GameStatus::LevelAdvanced => render_notice(
            frame,
            area,
            " next level ",
            "NEXT LEVEL!",
            "[Enter] Continue",
            palette.menu_level_bg,
            palette,
        ),
        GameStatus::GameOver => render_notice(
            frame,
            area,
            " game over ",
            "GAME OVER!",
            "[Enter] Return to game menu",
            palette.menu_game_over_bg,
            palette,
        ),
    }
}

/// Draws the start screen with the controls as a centered popup.
fn render_start_menu(frame: &mut Frame<'_>, area: Rect, palette: &Palette) {
    let popup = centered_popup(area, 60, 60);
    frame.render_widget(Clear, popup);

    let [title_row, body_row] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(3)]).areas(popup);
    let backdrop = Style::default().fg(palette.text).bg(palette.menu_start_bg);

    frame.render_widget(
        Paragraph::new(Line::from("NIBBLES"))
            .alignment(Alignment::Center)
            .block(Block::bordered())
            .style(backdrop.add_modifier(Modifier::BOLD)),
        title_row,
    );

    let body = vec![
        Line::from("Controls:"),
        Line::from("Arrow keys"),
        Line::from("or"),
        Line::from("WASD"),
        Line::from(""),
        Line::from("[Enter] Start"),
        Line::from("[Esc]/[Q] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(body)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" start "))
            .style(backdrop),
        body_row,
    );
}

fn render_notice(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    headline: &str,
    action: &str,
    background: Color,
    palette: &Palette,
) {
    let popup = centered_popup(area, 60, 35);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from(""),
        Line::from(headline.to_owned()).style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from(""),
        Line::from(action.to_owned()),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(title.to_owned()))
            .style(Style::default().fg(palette.text).bg(background)),
        popup,
    );
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}
