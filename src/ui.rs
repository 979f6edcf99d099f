use countdown::{preset::Preset, timer::TimerStatus};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
    Frame,
};

use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

pub fn draw(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let engine = &self.engine;
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // remaining time
                Constraint::Length(1), // status
                Constraint::Length(1), // padding
                Constraint::Length(1), // presets
                Constraint::Length(1), // padding
                Constraint::Min(3),    // session log
                Constraint::Length(1), // legend
            ])
            .split(area);

        let status = engine.status();
        let status_color = match status {
            TimerStatus::Running => Color::Green,
            TimerStatus::Finished => Color::Yellow,
            TimerStatus::Idle => Color::Gray,
        };

        Paragraph::new(Span::styled(
            engine.display(),
            bold_style.fg(status_color),
        ))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

        Paragraph::new(Span::styled(
            status.to_string(),
            italic_style.fg(status_color),
        ))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

        let active = engine.active_preset();
        let mut preset_spans = Vec::with_capacity(Preset::ALL.len() * 2);
        for (i, preset) in Preset::ALL.iter().enumerate() {
            if i > 0 {
                preset_spans.push(Span::raw("  "));
            }
            let style = if Some(*preset) == active {
                bold_style.add_modifier(Modifier::REVERSED)
            } else {
                dim_style
            };
            preset_spans.push(Span::styled(format!("({}) {}", i + 1, preset), style));
        }
        Paragraph::new(Line::from(preset_spans))
            .alignment(Alignment::Center)
            .render(chunks[3], buf);

        let log = engine.log();
        let items: Vec<ListItem> = if log.is_empty() {
            vec![ListItem::new(Span::styled("no sessions yet", dim_style))]
        } else {
            log.entries()
                .map(|entry| {
                    let style = if entry.is_complete() {
                        Style::default().fg(Color::Green)
                    } else {
                        Style::default()
                    };
                    ListItem::new(Span::styled(entry.to_string(), style))
                })
                .collect()
        };
        List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Sessions ({})", log.len())),
            )
            .render(chunks[5], buf);

        Paragraph::new(Span::styled(
            "(1-6) preset / (s)tart / (p)ause / (space) toggle / (r)eset / (esc)ape",
            italic_style,
        ))
        .alignment(Alignment::Center)
        .render(chunks[6], buf);
    }
}
