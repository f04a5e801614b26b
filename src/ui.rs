use crate::{
    app::{App, Mode},
    fingerboard,
};

use ratatui::{
    layout::{Constraint, Direction, Layout},
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

pub fn draw_ui(f: &mut Frame, app: &App) {
    match app.mode {
        Mode::StartScreen => draw_start_screen(f, app),
        Mode::Practice => draw_practice_screen(f, app),
    }
}

fn draw_start_screen(f: &mut Frame, app: &App) {
    let area = centered_rect(70, 80, f.area());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(5)])
        .split(area);

    let intro = Paragraph::new(
        "Hear a note, find it on the fingerboard.\n\n\
         Enter  start a practice session\n\
         q      quit",
    )
    .block(Block::default().title("fiddler").borders(Borders::ALL))
    .alignment(Alignment::Center);
    f.render_widget(intro, chunks[0]);

    if app.highscores.records.is_empty() {
        let empty = Paragraph::new("No sessions yet. Your three best will show up here.")
            .block(Block::default().title("Best Sessions").borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(empty, chunks[1]);
        return;
    }

    let rows: Vec<Row> = app
        .highscores
        .records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let day = r.date.split('T').next().unwrap_or_default().to_string();
            Row::new(vec![
                format!("{}", i + 1),
                format!("{:.0}%", r.score),
                format!("{}/{}", r.correct, r.total),
                day,
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Length(7),
            Constraint::Length(7),
            Constraint::Length(12),
        ],
    )
    .header(Row::new(vec!["#", "Score", "Notes", "Date"]).style(Style::default().fg(Color::Cyan)))
    .block(Block::default().title("Best Sessions").borders(Borders::ALL));
    f.render_widget(table, chunks[1]);
}

fn draw_practice_screen(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(11),
            Constraint::Length(4),
        ])
        .split(f.area());

    let score = app.game.score;
    let pct = if score.total > 0 {
        100.0 * f64::from(score.correct) / f64::from(score.total)
    } else {
        0.0
    };
    let score_line = Paragraph::new(format!(
        "Score: {}/{} ({:.0}%)",
        score.correct, score.total, pct
    ))
    .block(Block::default().title("Session").borders(Borders::ALL))
    .alignment(Alignment::Center);
    f.render_widget(score_line, chunks[0]);

    let rows: Vec<Row> = fingerboard::LAYOUT
        .iter()
        .enumerate()
        .map(|(row_idx, finger)| {
            let mut cells: Vec<Cell> = finger
                .notes
                .iter()
                .enumerate()
                .map(|(col_idx, slot)| match slot {
                    Some(note) => Cell::from(format!("({})", fingerboard::letter(note)))
                        .style(marker_style(app, row_idx, col_idx, note)),
                    None => Cell::from(""),
                })
                .collect();
            cells.push(Cell::from(finger.label).style(Style::default().fg(Color::DarkGray)));
            Row::new(cells)
        })
        .collect();

    let board = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(17),
        ],
    )
    .header(Row::new(vec!["G", "D", "A", "E", ""]).style(Style::default().fg(Color::Cyan)))
    .block(
        Block::default()
            .title("Fingerboard (arrows move, Enter presses)")
            .borders(Borders::ALL)
            .border_style(if app.game.awaiting() {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            }),
    );
    f.render_widget(board, chunks[1]);

    let help = "p play/replay   c next note   r reference (A4)   s stop";
    let message = Paragraph::new(format!("{}\n{}", app.message, help))
        .block(Block::default().title("Message").borders(Borders::ALL))
        .alignment(Alignment::Center);
    f.render_widget(message, chunks[2]);
}

fn marker_style(app: &App, row: usize, col: usize, note: &str) -> Style {
    let mut style = Style::default();
    if row == 0 {
        // Open strings read differently from fingered markers.
        style = style.add_modifier(Modifier::BOLD);
    }
    if let Some(outcome) = app.last_outcome {
        if outcome.target == note {
            style = style.fg(Color::Green);
        } else if !outcome.correct && app.last_selected == Some((row, col)) {
            style = style.fg(Color::Red);
        }
    }
    if app.cursor == (row, col) {
        style = style.add_modifier(Modifier::REVERSED);
    }
    style
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
