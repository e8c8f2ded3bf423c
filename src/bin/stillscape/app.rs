//! Event loop and keyboard handling.

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::Consumer;
use std::time::Duration;

use stillscape::io::AmbientHandle;
use stillscape::Mode;

use crate::ui::{
    render_modes, render_spectrum, render_status, render_waveform, AudioStats, SpectrumAnalyzer,
};

/// Audio visualization buffer size
const VIS_BUFFER_SIZE: usize = 2048;

const VOLUME_STEP: f32 = 0.05;

pub struct App {
    handle: AmbientHandle,
    /// Ring buffer receiver for audio samples
    audio_rx: Consumer<f32>,
    /// Audio sample buffer for visualization
    audio_buffer: Vec<f32>,
    spectrum: SpectrumAnalyzer,
    should_quit: bool,
}

impl App {
    pub fn new(handle: AmbientHandle, audio_rx: Consumer<f32>, sample_rate: f32) -> Self {
        Self {
            handle,
            audio_rx,
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            spectrum: SpectrumAnalyzer::new(VIS_BUFFER_SIZE, sample_rate),
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();
            self.spectrum.update(&self.audio_buffer);

            terminal.draw(|frame| self.render(frame))?;

            // Non-blocking input, ~60fps
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }
        Ok(())
    }

    /// Read as many samples as available, keeping the last VIS_BUFFER_SIZE.
    fn poll_audio(&mut self) {
        let mut new_samples = Vec::new();
        while let Ok(sample) = self.audio_rx.pop() {
            new_samples.push(sample);
        }

        if !new_samples.is_empty() {
            self.audio_buffer.extend(new_samples);
            if self.audio_buffer.len() > VIS_BUFFER_SIZE {
                let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
                self.audio_buffer.drain(0..excess);
            }
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(c @ '0'..='5') => {
                let index = c as usize - '0' as usize;
                self.handle.set_mode(Mode::ALL[index]);
            }
            KeyCode::Up => {
                let volume = self.handle.volume() + VOLUME_STEP;
                self.handle.set_volume(volume);
            }
            KeyCode::Down => {
                let volume = self.handle.volume() - VOLUME_STEP;
                self.handle.set_volume(volume);
            }
            KeyCode::Char('m') | KeyCode::Char('M') => self.handle.toggle_music(),
            KeyCode::Char('c') | KeyCode::Char('C') => self.handle.play_chime(),
            KeyCode::Char('x') | KeyCode::Char('X') => self.handle.play_click(),
            _ => {}
        }
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status bar
                Constraint::Min(8),    // Mode list + spectrum
                Constraint::Length(8), // Waveform
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        let stats = AudioStats::from_buffer(&self.audio_buffer);
        render_status(frame, chunks[0], &self.handle, &stats);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(24), Constraint::Min(20)])
            .split(chunks[1]);
        render_modes(frame, middle[0], self.handle.mode());
        render_spectrum(frame, middle[1], self.spectrum.data());

        render_waveform(frame, chunks[2], &self.audio_buffer);

        let help = Paragraph::new(
            " [0-5] Mode  [↑/↓] Volume  [M] Music  [C] Chime  [X] Click  [Q] Quit",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}
