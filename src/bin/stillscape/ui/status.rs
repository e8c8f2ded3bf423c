//! Status bar widget - mode, volume, music state, and audio stats

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use stillscape::io::AmbientHandle;
use stillscape::Mode;

/// Audio statistics for display
pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    /// Compute audio stats from a buffer
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

/// Render the status bar
pub fn render_status(frame: &mut Frame, area: Rect, handle: &AmbientHandle, stats: &AudioStats) {
    let block = Block::default().title(" stillscape ").borders(Borders::ALL);

    let mode = handle.mode();
    let mode_color = if mode == Mode::Off {
        Color::Yellow
    } else {
        Color::Green
    };

    // Coarse volume meter: one bar per 0.05 up to the 0.8 ceiling.
    let volume = handle.volume();
    let filled = (volume / 0.05).round() as usize;
    let meter: String = "▮".repeat(filled) + &"▯".repeat(16usize.saturating_sub(filled));

    let music = if handle.music_on() { "music ♪" } else { "music ·" };

    let line = Line::from(vec![
        Span::styled(format!(" {mode}  "), Style::default().fg(mode_color)),
        Span::styled(
            format!("vol {volume:.2} {meter}  "),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("{music}  "),
            Style::default().fg(if handle.music_on() {
                Color::Green
            } else {
                Color::DarkGray
            }),
        ),
        Span::styled(
            format!("Peak: {:.3}  RMS: {:.3}", stats.peak, stats.rms),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    let paragraph = Paragraph::new(line).block(block);
    frame.render_widget(paragraph, area);
}
