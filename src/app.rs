use std::{error::Error, io, path::PathBuf, time::Duration};

use chrono::Utc;
use rodio::buffer::SamplesBuffer;
use rodio::{Sink, Source};

use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};

use crate::{
    audio::{self, SampleBank},
    fingerboard,
    game::{Game, Outcome},
    scores::{HighScores, ScoreRecord},
    ui::draw_ui,
};

/// The question tone starts this long after its round opens.
const LISTEN_DELAY: Duration = Duration::from_millis(500);

/// The tuning reference, always available regardless of the current round.
const REFERENCE_NOTE: &str = "A4";

pub enum Mode {
    StartScreen,
    Practice,
}

pub struct App {
    pub mode: Mode,
    pub game: Game,
    pub highscores: HighScores,
    /// (finger row, string column) under the marker cursor.
    pub cursor: (usize, usize),
    pub message: String,
    pub last_outcome: Option<Outcome>,
    pub last_selected: Option<(usize, usize)>,
    samples_dir: PathBuf,
    tone_secs: f32,
    bank: SampleBank,
    bank_loaded: bool,
    stream: Option<rodio::OutputStream>,
    sink: Option<Sink>,
}

impl App {
    pub fn new(samples_dir: PathBuf, tone_secs: f32) -> Self {
        Self {
            mode: Mode::StartScreen,
            game: Game::new(),
            highscores: HighScores::load(),
            cursor: (0, 0),
            message: String::new(),
            last_outcome: None,
            last_selected: None,
            samples_dir,
            tone_secs,
            bank: SampleBank::default(),
            bank_loaded: false,
            stream: None,
            sink: None,
        }
    }

    pub fn run(&mut self) -> Result<(), Box<dyn Error>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = ratatui::backend::CrosstermBackend::new(stdout);
        let mut terminal = ratatui::Terminal::new(backend)?;

        loop {
            terminal.draw(|f| draw_ui(f, self))?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press && self.handle_key(key.code) {
                        break;
                    }
                }
            }
        }

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }

    /// Returns true when the app should exit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match self.mode {
            Mode::StartScreen => match code {
                KeyCode::Char('q') | KeyCode::Esc => return true,
                KeyCode::Enter => self.start_session(),
                _ => {}
            },
            Mode::Practice => match code {
                KeyCode::Char('p') => self.play_or_replay(),
                KeyCode::Char('c') => {
                    if !self.game.awaiting() {
                        self.new_round();
                    }
                }
                KeyCode::Char('r') => self.play(REFERENCE_NOTE, Duration::ZERO),
                KeyCode::Down | KeyCode::Char('j') => {
                    if self.cursor.0 + 1 < fingerboard::LAYOUT.len() {
                        self.cursor.0 += 1;
                    }
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.cursor.0 = self.cursor.0.saturating_sub(1);
                }
                KeyCode::Right | KeyCode::Char('l') => {
                    if self.cursor.1 + 1 < fingerboard::STRINGS.len() {
                        self.cursor.1 += 1;
                    }
                }
                KeyCode::Left | KeyCode::Char('h') => {
                    self.cursor.1 = self.cursor.1.saturating_sub(1);
                }
                KeyCode::Enter | KeyCode::Char(' ') => self.press_marker(),
                KeyCode::Char('s') | KeyCode::Char('q') | KeyCode::Esc => self.stop_session(),
                _ => {}
            },
        }
        false
    }

    fn start_session(&mut self) {
        if self.stream.is_none() {
            match rodio::stream::OutputStreamBuilder::open_default_stream() {
                Ok(mut stream) => {
                    stream.log_on_drop(false);
                    self.stream = Some(stream);
                }
                Err(err) => log::warn!("no audio output, practicing silently: {err}"),
            }
        }
        if !self.bank_loaded {
            self.bank = SampleBank::preload(&self.samples_dir, &fingerboard::catalog());
            self.bank_loaded = true;
        }

        self.game = Game::new();
        self.cursor = (0, 0);
        self.last_outcome = None;
        self.last_selected = None;
        self.mode = Mode::Practice;
        self.message = if self.bank.is_empty() {
            "No recordings found, using synthesized tones. Press p to play a note.".into()
        } else {
            format!(
                "Loaded {} recordings. Press p to play a note.",
                self.bank.len()
            )
        };
    }

    /// Stop always files a record, even for an unplayed session; a 0% entry
    /// sorts to the bottom and falls off the board on its own.
    fn stop_session(&mut self) {
        let score = self.game.end_session();
        self.highscores
            .insert(ScoreRecord::from_session(score, Utc::now()));
        self.highscores.save();
        self.last_outcome = None;
        self.last_selected = None;
        self.mode = Mode::StartScreen;
    }

    fn new_round(&mut self) {
        self.last_outcome = None;
        self.last_selected = None;
        let target = self.game.start_round(&mut rand::rng());
        self.message = "Listen... then pick the position and press Enter.".into();
        self.play(target, LISTEN_DELAY);
    }

    fn play_or_replay(&mut self) {
        match self.game.replay() {
            Some(target) => self.play(target, Duration::ZERO),
            None => self.new_round(),
        }
    }

    fn press_marker(&mut self) {
        let (row, col) = self.cursor;
        let Some(note) = fingerboard::LAYOUT[row].notes[col] else {
            return;
        };
        if let Some(outcome) = self.game.submit_answer(note) {
            self.last_selected = Some((row, col));
            self.last_outcome = Some(outcome);
            self.message = if outcome.correct {
                format!("Correct! It was {}. Press c for the next note.", outcome.target)
            } else {
                format!(
                    "Not quite, it was {}. Press c for the next note.",
                    outcome.target
                )
            };
        } else if self.game.replay().is_some() {
            // Round already revealed; presses are review listening.
            self.play(note, Duration::ZERO);
        }
    }

    /// Sample if we have one, synthesized tone if we at least know the
    /// frequency, silence otherwise. Audio trouble never reaches the game.
    fn play(&mut self, note: &str, delay: Duration) {
        let Some(stream) = &self.stream else {
            return;
        };
        let sink = Sink::connect_new(stream.mixer());
        if let Some(sample) = self.bank.get(note) {
            sink.append(sample.to_source().delay(delay));
        } else if let Some(freq) = fingerboard::frequency(note) {
            let tone = audio::decaying_sine(freq, self.tone_secs, audio::SAMPLE_RATE);
            sink.append(SamplesBuffer::new(1, audio::SAMPLE_RATE, tone).delay(delay));
        } else {
            return;
        }
        // Replacing the old sink cuts any still-ringing note.
        self.sink = Some(sink);
    }
}
