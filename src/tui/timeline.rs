//! Report history timeline.
//!
//! Each report takes [`ENTRY_HEIGHT`] rows: a header with the dot, title and
//! status chip, then date, summary and a spacer. The rail below the dot joins
//! an entry to the next one, so the last entry has none.

use crate::api::{Report, HIGH_RISK_STATUS};
use crate::app::AppState;
use crate::history::ListView;
use crate::tui::{spinner, truncate};
use chrono::{Local, TimeZone};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};
use ratatui::Frame;
use std::fmt;

pub const ENTRY_HEIGHT: usize = 4;
pub const ENTRY_TITLE: &str = "Medical Report";
pub const EMPTY_TITLE: &str = "No Reports Found";
pub const EMPTY_HINT: &str = "Your uploaded medical reports will appear here.";
pub const DOT: &str = "●";
pub const RAIL: &str = "│";

pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
    let history = &state.history;
    let mut title = " Report History ".to_string();
    if let ListView::Loaded(reports) = &history.view {
        if !reports.is_empty() {
            title = format!(" Report History ({}) ", reports.len());
        }
    }
    if history.deleting.is_some() {
        title.push_str(&spinner::label(state.spinner_frame, "Deleting… "));
    }
    let block = Block::default()
        .title(title)
        .borders(Borders::NONE)
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    f.render_widget(block, area);

    match &history.view {
        ListView::Loading => {
            let text = spinner::label(state.spinner_frame, "Loading your reports…");
            let line = Line::styled(text, Style::default().fg(Color::Yellow));
            f.render_widget(placeholder(vec![line]), inner);
        }
        ListView::Error(err) => {
            let panel = Paragraph::new(vec![
                Line::from(""),
                Line::styled(err.to_string(), Style::default().fg(Color::Red)),
                Line::from(""),
                Line::styled("Press r to try again", Style::default().fg(Color::DarkGray)),
            ])
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(" Error ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red)),
            );
            f.render_widget(panel, inner);
        }
        ListView::Loaded(reports) if reports.is_empty() => {
            f.render_widget(placeholder(empty_lines()), inner);
        }
        ListView::Loaded(reports) => {
            let lines = timeline_lines(reports, history.cursor, inner.width as usize, &Local);
            let offset = scroll_offset(history.cursor, inner.height as usize);
            let para = Paragraph::new(lines).scroll((u16::try_from(offset).unwrap_or(u16::MAX), 0));
            f.render_widget(para, inner);
        }
    }
}

fn placeholder(lines: Vec<Line<'static>>) -> Paragraph<'static> {
    let mut padded = vec![Line::from("")];
    padded.extend(lines);
    Paragraph::new(padded).alignment(Alignment::Center)
}

pub fn empty_lines() -> Vec<Line<'static>> {
    vec![
        Line::styled(
            EMPTY_TITLE,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Line::styled(EMPTY_HINT, Style::default().fg(Color::DarkGray)),
        Line::from(""),
        Line::from(vec![
            Span::styled("u", Style::default().fg(Color::Cyan)),
            Span::styled(" upload a report", Style::default().fg(Color::DarkGray)),
        ]),
    ]
}

/// First row to show so the selected entry is fully visible.
pub fn scroll_offset(cursor: usize, visible_height: usize) -> usize {
    let bottom = (cursor + 1) * ENTRY_HEIGHT;
    bottom.saturating_sub(visible_height)
}

pub fn timeline_lines<Tz: TimeZone>(
    reports: &[Report],
    cursor: usize,
    width: usize,
    tz: &Tz,
) -> Vec<Line<'static>>
where
    Tz::Offset: fmt::Display,
{
    let mut lines = Vec::with_capacity(reports.len() * ENTRY_HEIGHT);
    for (i, report) in reports.iter().enumerate() {
        let is_last = i + 1 == reports.len();
        let selected = i == cursor;
        let rail = if is_last { " " } else { RAIL };
        let rail_style = Style::default().fg(Color::DarkGray);
        let (dot_color, chip_color) = status_colors(&report.status);

        let marker = if selected { "› " } else { "  " };
        let title_style = if selected {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        };
        let mut header = vec![
            Span::styled(marker, Style::default().fg(Color::Cyan)),
            Span::styled(DOT, Style::default().fg(dot_color)),
            Span::raw(" "),
            Span::styled(ENTRY_TITLE, title_style),
        ];
        let status = report.display_status();
        if !status.is_empty() {
            header.push(Span::raw("  "));
            header.push(Span::styled(
                format!("[{status}]"),
                Style::default().fg(chip_color).add_modifier(Modifier::BOLD),
            ));
        }
        lines.push(Line::from(header));

        let body_width = width.saturating_sub(4);
        let date = format!("Date: {}", report.display_date(tz));
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(rail, rail_style),
            Span::raw(" "),
            Span::styled(truncate(&date, body_width), Style::default().fg(Color::Gray)),
        ]));

        let summary = format!("Summary: {}", report.summary());
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(rail, rail_style),
            Span::raw(" "),
            Span::styled(truncate(&summary, body_width), Style::default().fg(Color::White)),
        ]));

        lines.push(Line::from(vec![Span::raw("  "), Span::styled(rail, rail_style)]));
    }
    lines
}

fn status_colors(status: &str) -> (Color, Color) {
    match status {
        HIGH_RISK_STATUS => (Color::Red, Color::Red),
        "Normal" => (Color::Green, Color::Green),
        "" => (Color::DarkGray, Color::DarkGray),
        _ => (Color::Cyan, Color::Yellow),
    }
}
