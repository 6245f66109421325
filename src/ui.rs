pub mod charting;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, AppState};
use crate::clock::Clock;
use crate::diff::Classification;
use crate::metrics::remark;
use crate::session::{FinalReport, Session, WordResult};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

struct Palette {
    bold: Style,
    correct: Style,
    incorrect: Style,
    untyped: Style,
    cursor: Style,
}

impl Palette {
    fn new() -> Self {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let untyped = Style::default().patch(bold).add_modifier(Modifier::DIM);

        Self {
            bold,
            correct: Style::default().patch(bold).fg(Color::Green),
            incorrect: Style::default().patch(bold).fg(Color::Red),
            untyped,
            cursor: Style::default()
                .patch(untyped)
                .add_modifier(Modifier::UNDERLINED),
        }
    }
}

impl<C: Clock> Widget for &App<C> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Ok(session) = self.session() else {
            return;
        };
        let palette = Palette::new();

        match (self.state, self.report()) {
            (AppState::Results, Some(report)) => render_results(report, &palette, area, buf),
            _ => render_typing(self, session, &palette, area, buf),
        }
    }
}

fn render_typing<C: Clock>(
    app: &App<C>,
    session: &Session,
    palette: &Palette,
    area: Rect,
    buf: &mut Buffer,
) {
    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
    let prompt_width = session.words().join(" ").width();
    let mut prompt_occupied_lines =
        ((prompt_width as f64 / max_chars_per_line as f64).ceil() + 1.0) as u16;
    if prompt_width <= max_chars_per_line as usize {
        prompt_occupied_lines = 1;
    }
    let padding = area.height.saturating_sub(prompt_occupied_lines) / 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(padding),
            Constraint::Length(2),
            Constraint::Length(prompt_occupied_lines),
            Constraint::Length(padding),
        ])
        .split(area);

    let widget = Paragraph::new(Line::from(prompt_spans(session, palette)))
        .alignment(if prompt_occupied_lines == 1 {
            // short prompts read better centred
            Alignment::Center
        } else {
            Alignment::Left
        })
        .wrap(Wrap { trim: true });
    widget.render(chunks[2], buf);

    let status = if session.has_started() {
        let snapshot = app.snapshot();
        format!(
            "{:.0}   {} wpm   {}% acc",
            app.seconds_remaining().ceil(),
            snapshot.wpm,
            snapshot.accuracy
        )
    } else {
        format!("{:.0}   start typing", app.seconds_remaining().ceil())
    };
    Paragraph::new(Span::styled(status, palette.untyped))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);
}

/// Styled characters for every target word, separated by spaces.
fn prompt_spans(session: &Session, palette: &Palette) -> Vec<Span<'static>> {
    let current = session.current_word_index();
    let mut spans = Vec::new();

    for (index, result) in session.word_results().iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled(" ", palette.untyped));
        }
        if index > current {
            spans.push(Span::styled(result.target().to_string(), palette.untyped));
        } else {
            word_spans(result, index == current, palette, &mut spans);
        }
    }

    spans
}

fn word_spans(
    result: &WordResult,
    is_current: bool,
    palette: &Palette,
    spans: &mut Vec<Span<'static>>,
) {
    let target: Vec<char> = result.target().chars().collect();
    let typed: Vec<char> = result.typed().chars().collect();
    let mut cursor_placed = false;

    for (slot, classification) in result.classifications().iter().enumerate() {
        let span = match classification {
            Classification::Correct => Span::styled(target[slot].to_string(), palette.correct),
            Classification::Incorrect => {
                let shown = typed.get(slot).or(target.get(slot)).copied().unwrap_or('·');
                Span::styled(shown.to_string(), palette.incorrect)
            }
            Classification::Pending if is_current && !cursor_placed => {
                cursor_placed = true;
                Span::styled(target[slot].to_string(), palette.cursor)
            }
            Classification::Pending => Span::styled(target[slot].to_string(), palette.untyped),
        };
        spans.push(span);
    }
}

fn render_results(report: &FinalReport, palette: &Palette, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Min(1),    // chart
            Constraint::Length(1), // stats
            Constraint::Length(1), // remark
            Constraint::Length(1), // padding
            Constraint::Length(1), // legend
        ])
        .split(area);

    let points: Vec<(f64, f64)> = report.history.iter().map(|&s| s.into()).collect();
    let (overall_duration, highest_wpm) =
        charting::compute_chart_params(&points, report.snapshot.elapsed_secs);

    let datasets = vec![Dataset::default()
        .marker(ratatui::symbols::Marker::Braille)
        .style(Style::default().fg(Color::Magenta))
        .graph_type(GraphType::Line)
        .data(&points)];

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title("seconds")
                .bounds([1.0, overall_duration])
                .labels(vec![
                    Span::styled("1", palette.bold),
                    Span::styled(charting::format_label(overall_duration), palette.bold),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("wpm")
                .bounds([0.0, highest_wpm])
                .labels(vec![
                    Span::styled("0", palette.bold),
                    Span::styled(charting::format_label(highest_wpm), palette.bold),
                ]),
        );
    chart.render(chunks[0], buf);

    let consistency = match report.consistency {
        Some(sd) => format!("{sd:.2} sd"),
        None => "- sd".to_string(),
    };
    let stats = Paragraph::new(Span::styled(
        format!(
            "{} wpm   {}% acc   {}",
            report.snapshot.wpm, report.snapshot.accuracy, consistency
        ),
        palette.bold,
    ))
    .alignment(Alignment::Center);
    stats.render(chunks[1], buf);

    Paragraph::new(Span::styled(
        remark(report.snapshot.wpm),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .render(chunks[2], buf);

    Paragraph::new(Span::styled(
        "(r)estart / (esc)ape",
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .render(chunks[4], buf);
}
