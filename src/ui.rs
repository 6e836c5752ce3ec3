//! TUI rendering module.
//!
//! This module handles all visual rendering using ratatui:
//! - Code input field
//! - The board with lit glyphs and the gliding planchette
//! - Calculation steps (or error) panel and decoded message panel
//! - Status bar and help overlay

pub mod glyphs;

use std::time::Duration;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::board::{Board, BoardPoint, GlyphId};
use crate::model::AppState;
use crate::presentation::{DetailsPanel, Presentation};
use crate::reveal::{RESULT_HEADER, STEPS_HEADER};
use crate::session::SessionPhase;
use glyphs::Glyphs;

/// Height of the input box (including borders).
const INPUT_HEIGHT: u16 = 3;
/// Terminal rows per board row: label line + pointer line.
const TILE_HEIGHT: u16 = 2;
/// Narrowest tile we still draw.
const MIN_TILE_WIDTH: u16 = 3;
/// Height of the status bar.
const STATUS_BAR_HEIGHT: u16 = 1;

/// Renders the complete UI.
pub fn render(frame: &mut Frame, state: &AppState, glyphs: &Glyphs) {
    let area = frame.area();
    let now = state.now();
    let board = state.session.board();
    let board_height = board.rows() as u16 * TILE_HEIGHT + 2;

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(board_height),
            Constraint::Min(3),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(main_layout[2]);

    render_input(frame, state, glyphs, main_layout[0]);
    render_board(frame, board, state.session.presentation(), glyphs, main_layout[1], now);
    render_details(frame, state.session.presentation(), glyphs, panels[0], now);
    render_result(frame, state.session.presentation(), panels[1], now);
    render_status_bar(frame, state, glyphs, main_layout[3]);

    if state.show_help {
        render_help(frame, area);
    }
}

/// Renders the code input field.
fn render_input(frame: &mut Frame, state: &AppState, glyphs: &Glyphs, area: Rect) {
    let line = Line::from(vec![
        Span::raw(state.input.clone()),
        Span::styled(glyphs.cursor, Style::default().fg(Color::Gray)),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Códigos ASCII (Enter decifra, Esc limpa)");
    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Width of one tile for a board drawn inside `inner`.
pub fn tile_width(inner: Rect, board: &Board) -> u16 {
    let cols = board.cols().max(1) as u16;
    (inner.width / cols).max(MIN_TILE_WIDTH)
}

/// Maps a board-space point to a terminal cell inside `inner`.
pub fn board_to_cell(inner: Rect, board: &Board, point: BoardPoint) -> (u16, u16) {
    let tile_w = f32::from(tile_width(inner, board));
    let x = (point.x * tile_w).max(0.0) as u16;
    let y = (point.y * f32::from(TILE_HEIGHT)).max(0.0) as u16;
    (
        (inner.x + x).min(inner.right().saturating_sub(1)),
        (inner.y + y).min(inner.bottom().saturating_sub(1)),
    )
}

/// Renders the board tiles and the planchette on top of them.
fn render_board(
    frame: &mut Frame,
    board: &Board,
    presentation: &Presentation,
    glyphs: &Glyphs,
    area: Rect,
    now: Duration,
) {
    let block = Block::default().borders(Borders::ALL).title("Tabuleiro");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let tile_w = tile_width(inner, board);
    for (index, glyph) in board.glyphs().iter().enumerate() {
        let x = inner.x + glyph.col as u16 * tile_w;
        let y = inner.y + glyph.row as u16 * TILE_HEIGHT;
        if x + tile_w > inner.right() || y >= inner.bottom() {
            continue;
        }
        let rect = Rect::new(x, y, tile_w, 1);

        let lit = presentation.is_active(GlyphId(index));
        let (text, style) = if lit {
            (
                format!("{}{}{}", glyphs.active_left, glyph.label, glyphs.active_right),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            (glyph.label.clone(), Style::default().fg(Color::White))
        };
        let paragraph = Paragraph::new(text).style(style).alignment(Alignment::Center);
        frame.render_widget(paragraph, rect);
    }

    let indicator = presentation.indicator();
    if indicator.visible && inner.width > 0 && inner.height > 0 {
        let (x, y) = board_to_cell(inner, board, indicator.position(now));
        let width = (glyphs.planchette.chars().count() as u16).min(inner.right() - x);
        let marker = Paragraph::new(glyphs.planchette).style(
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(marker, Rect::new(x, y, width.max(1), 1));
    }
}

/// Renders the calculation steps or the error entry.
fn render_details(
    frame: &mut Frame,
    presentation: &Presentation,
    glyphs: &Glyphs,
    area: Rect,
    now: Duration,
) {
    let mut lines: Vec<Line> = Vec::new();

    match presentation.details() {
        DetailsPanel::Empty => {}
        DetailsPanel::Steps(steps) => {
            lines.push(Line::from(Span::styled(
                STEPS_HEADER,
                Style::default().add_modifier(Modifier::BOLD),
            )));
            for entry in steps.visible(now) {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("Código {}:", entry.ordinal),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(format!(" {} {} ", entry.code, glyphs.arrow)),
                    Span::styled(
                        entry.token.clone(),
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                    ),
                ]));
            }
        }
        DetailsPanel::Error(message) => {
            lines.push(Line::from(vec![
                Span::styled(
                    glyphs.error_prefix,
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!(" {}", message), Style::default().fg(Color::LightRed)),
            ]));
        }
    }

    let block = Block::default().borders(Borders::ALL).title("Decifração");
    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Renders the decoded message as it is revealed.
fn render_result(frame: &mut Frame, presentation: &Presentation, area: Rect, now: Duration) {
    let mut lines: Vec<Line> = Vec::new();

    if let Some(result) = presentation.result() {
        lines.push(Line::from(Span::styled(
            RESULT_HEADER,
            Style::default().add_modifier(Modifier::BOLD),
        )));
        let spans: Vec<Span> = result
            .visible_pieces(now)
            .into_iter()
            .map(|piece| Span::styled(piece, Style::default().fg(Color::Yellow)))
            .collect();
        lines.push(Line::from(spans));
    }

    let block = Block::default().borders(Borders::ALL).title("Mensagem");
    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Renders the status bar at the bottom.
fn render_status_bar(frame: &mut Frame, state: &AppState, glyphs: &Glyphs, area: Rect) {
    let phase = match state.session.phase() {
        SessionPhase::Idle => "PRONTO".to_string(),
        SessionPhase::Animating => {
            let total = state.session.message().map_or(0, |m| m.len());
            let step = state.session.current_step().map_or(0, |i| i + 1);
            format!("DECIFRANDO {}/{}", step, total)
        }
        SessionPhase::Revealed => "REVELADO".to_string(),
        SessionPhase::Failed => "ERRO".to_string(),
    };

    let message = state.status_message.as_deref().unwrap_or("");
    let left_content = format!(" {} | {} ", phase, message);
    let right_content = format!("{} {} | F1 ajuda ", glyphs.audio, state.ambient.label());

    let used = left_content.chars().count() + right_content.chars().count();
    let status_line = Line::from(vec![
        Span::styled(left_content, Style::default().fg(Color::Black).bg(Color::Magenta)),
        Span::styled(
            " ".repeat((area.width as usize).saturating_sub(used)),
            Style::default().bg(Color::Magenta),
        ),
        Span::styled(
            right_content,
            Style::default()
                .fg(Color::Black)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    frame.render_widget(Paragraph::new(status_line), area);
}

/// Renders the help overlay.
fn render_help(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from("Digite códigos ASCII (0-127) separados por espaço."),
        Line::from(""),
        Line::from("Enter      decifrar"),
        Line::from("Esc        limpar tudo"),
        Line::from("Backspace  apagar"),
        Line::from("F2 / F3    tocar / pausar áudio"),
        Line::from("Ctrl+C     sair"),
    ];
    let width = 56.min(area.width);
    let height = (lines.len() as u16 + 2).min(area.height);
    let rect = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );
    let block = Block::default().borders(Borders::ALL).title("Ajuda");
    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(lines).block(block), rect);
}
