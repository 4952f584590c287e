use chrono::Local;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use vype::session::{Session, Status, TestMode};
use vype::time_series::GraphPoint;
use vype::token::LetterState;

use crate::{App, Screen};

const HORIZONTAL_MARGIN: u16 = 5;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.screen {
            Screen::Typing => render_typing(&self.session, area, buf),
            Screen::Results => render_results(&self.session, area, buf),
        }
    }
}

fn render_typing(session: &Session, area: Rect, buf: &mut Buffer) {
    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
    let prompt_width = prompt_string(session).width() as u16;
    let prompt_lines = (prompt_width / max_chars_per_line + 1).max(1);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length((area.height.saturating_sub(prompt_lines + 2)) / 2),
            Constraint::Length(2),
            Constraint::Length(prompt_lines),
            Constraint::Min(0),
        ])
        .split(area);

    let status = Paragraph::new(Span::styled(
        status_line(session),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center);
    status.render(chunks[1], buf);

    let prompt = Paragraph::new(Line::from(prompt_spans(session)))
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });
    prompt.render(chunks[2], buf);
}

fn status_line(session: &Session) -> String {
    let hint = match session.status {
        Status::Idle => " — start typing",
        _ => "",
    };
    match session.mode() {
        TestMode::Time => {
            let left = session
                .remaining()
                .map(|d| d.as_secs_f64().ceil() as u64)
                .unwrap_or(0);
            format!("time · {left}s left{hint}")
        }
        TestMode::Words => format!(
            "words · {}/{}{hint}",
            session.cursor.word, session.params.number_of_words
        ),
        TestMode::Quote => {
            let source = session
                .quote
                .as_ref()
                .map(|q| q.source.as_str())
                .unwrap_or("unknown");
            format!("quote · {source}{hint}")
        }
        TestMode::Zen => format!("zen · {} words · ctrl-e to finish{hint}", session.cursor.word),
    }
}

/// Flat string of the visible prompt, used only for wrap estimation.
fn prompt_string(session: &Session) -> String {
    session
        .bank
        .words()
        .map(|(_, w)| {
            if w.typed_len() > w.target_len() {
                w.typed.clone()
            } else {
                w.target.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn prompt_spans(session: &Session) -> Vec<Span<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let pending = Style::default().add_modifier(Modifier::DIM);
    let correct = bold.fg(Color::Green);
    let wrong = bold.fg(Color::Red);
    let extra = bold.fg(Color::Magenta);

    let cursor = session.cursor;
    let mut spans = Vec::new();

    for (idx, word) in session.bank.words() {
        let target: Vec<char> = word.target.chars().collect();
        let typed: Vec<char> = word.typed.chars().collect();

        for (li, state) in word.letters.iter().enumerate() {
            let ch = match state {
                LetterState::Extra => typed[li],
                _ => target[li],
            };
            let mut style = match state {
                LetterState::Pending => pending,
                LetterState::Correct => correct,
                LetterState::Wrong => wrong,
                LetterState::Extra => extra,
            };
            if idx == cursor.word && li == cursor.letter {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            spans.push(Span::styled(ch.to_string(), style));
        }

        let mut space = pending;
        if idx == cursor.word && cursor.letter >= word.letters.len() {
            space = space.add_modifier(Modifier::UNDERLINED);
        }
        spans.push(Span::styled(" ".to_string(), space));
    }
    spans
}

fn render_results(session: &Session, area: Rect, buf: &mut Buffer) {
    let Some(display) = &session.display else {
        Paragraph::new("no results yet")
            .alignment(Alignment::Center)
            .render(area, buf);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([Constraint::Length(9), Constraint::Min(8)])
        .split(area);

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let dim = Style::default().add_modifier(Modifier::DIM);
    let italic = Style::default().add_modifier(Modifier::ITALIC);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("wpm ", dim),
            Span::styled(format!("{:.0}", display.wpm), bold.fg(Color::Yellow)),
            Span::styled("   raw ", dim),
            Span::styled(format!("{:.0}", display.raw_wpm), bold),
        ]),
        Line::from(vec![
            Span::styled("acc ", dim),
            Span::styled(format!("{:.2}%", display.accuracy), bold.fg(Color::Green)),
            Span::styled("   consistency ", dim),
            Span::styled(format!("{:.2}%", display.consistency), bold),
        ]),
        Line::from(vec![
            Span::styled("time ", dim),
            Span::styled(format!("{:.0}s", display.duration_sec), bold),
            Span::styled(format!("   mode {}", display.mode), dim),
        ]),
    ];
    if let Some(quote) = &session.quote {
        lines.push(Line::from(Span::styled(
            format!("— {}", quote.source),
            italic,
        )));
    }
    lines.push(Line::from(Span::styled(
        format!("completed {}", Local::now().format("%H:%M:%S")),
        dim,
    )));
    lines.push(Line::default());
    lines.push(Line::from(Span::styled("(r)etry  (q)uit", italic)));

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    render_chart(session, chunks[1], buf);
}

fn render_chart(session: &Session, area: Rect, buf: &mut Buffer) {
    if session.graph.is_empty() || area.height < 5 {
        return;
    }

    let wpm_data: Vec<(f64, f64)> = session.graph.iter().map(GraphPoint::wpm_xy).collect();
    let raw_data: Vec<(f64, f64)> = session.graph.iter().map(GraphPoint::raw_xy).collect();
    let error_data: Vec<(f64, f64)> = session
        .graph
        .iter()
        .filter(|p| p.errors > 0)
        .map(|p| (p.t, p.wpm))
        .collect();

    let max_x = session
        .graph
        .last()
        .map(|p| p.t)
        .unwrap_or(1.0)
        .max(1.0);
    let max_y = session
        .graph
        .iter()
        .map(|p| p.raw_wpm)
        .fold(0.0, f64::max)
        + 20.0;

    let datasets = vec![
        Dataset::default()
            .name("raw")
            .marker(ratatui::symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::DarkGray))
            .data(&raw_data),
        Dataset::default()
            .name("wpm")
            .marker(ratatui::symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Yellow))
            .data(&wpm_data),
        Dataset::default()
            .name("errors")
            .marker(ratatui::symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Red))
            .data(&error_data),
    ];

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title("seconds")
                .style(Style::default().add_modifier(Modifier::DIM))
                .bounds([0.0, max_x])
                .labels(vec![
                    Span::from("0"),
                    Span::from(format!("{:.0}", max_x / 2.0)),
                    Span::from(format!("{max_x:.0}")),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("wpm")
                .style(Style::default().add_modifier(Modifier::DIM))
                .bounds([0.0, max_y])
                .labels(vec![
                    Span::from("0"),
                    Span::from(format!("{:.0}", max_y / 2.0)),
                    Span::from(format!("{max_y:.0}")),
                ]),
        );

    chart.render(area, buf);
}
