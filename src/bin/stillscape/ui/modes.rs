//! Mode selector widget

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use stillscape::Mode;

/// Render the ambience list with the requested mode highlighted
pub fn render_modes(frame: &mut Frame, area: Rect, current: Mode) {
    let block = Block::default().title(" Ambience ").borders(Borders::ALL);

    let items: Vec<ListItem> = Mode::ALL
        .iter()
        .enumerate()
        .map(|(i, &mode)| {
            let marker = if mode == current { "▶" } else { " " };
            let style = if mode == current {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {marker} "), style),
                Span::styled(format!("[{i}] "), Style::default().fg(Color::DarkGray)),
                Span::styled(mode.label().to_string(), style),
            ]))
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
