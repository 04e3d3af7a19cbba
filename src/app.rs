use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::Color;
use tracing::debug;

use crate::animation::TweenAnimator;
use crate::celebration::{AudioPlayer, ConfettiField, TerminalCelebration};
use crate::config::{parse_key, Config, GeneralConfig};
use crate::error::WheelResult;
use crate::event::Event;
use crate::ui::theme::Theme;
use crate::wheel::{PrizeWheel, SpinOutcome, Viewport, WheelLayout};

/// How long a toast stays on screen
const TOAST_DURATION: Duration = Duration::from_secs(3);

// ── Key bindings ──────────────────────────────────────────────────────

/// Keys resolved from the `[keys]` table. Unparseable entries fall back
/// to the built-in binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    pub spin: KeyCode,
    pub reset: KeyCode,
    pub help: KeyCode,
    pub quit: KeyCode,
}

impl KeyBindings {
    pub fn from_config(config: &Config) -> Self {
        let keys = config.keys();
        let resolve = |name: &str, raw: &str, fallback: KeyCode| {
            parse_key(raw).unwrap_or_else(|| {
                debug!("unknown key \"{}\" for {}, using default", raw, name);
                fallback
            })
        };
        Self {
            spin: resolve("spin", &keys.spin, KeyCode::Char(' ')),
            reset: resolve("reset", &keys.reset, KeyCode::Char('r')),
            help: resolve("help", &keys.help, KeyCode::Char('?')),
            quit: resolve("quit", &keys.quit, KeyCode::Char('q')),
        }
    }
}

/// Human-readable key name for hints
pub fn key_label(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".into(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".into(),
        KeyCode::Esc => "Esc".into(),
        KeyCode::Tab => "Tab".into(),
        KeyCode::Backspace => "Backspace".into(),
        other => format!("{other:?}"),
    }
}

pub type Wheel = PrizeWheel<TweenAnimator, TerminalCelebration>;

// ── Application State ─────────────────────────────────────────────────

pub struct App {
    pub should_quit: bool,
    pub show_help: bool,
    pub theme: Theme,
    pub keys: KeyBindings,
    pub labels: GeneralConfig,

    pub wheel: Wheel,
    pub layout: WheelLayout,
    /// One color per segment
    pub colors: Vec<Color>,

    // Animation clocks
    pub tick_count: u64,
    tick_rate: Duration,
    last_tick: Option<Instant>,
    /// Ticks since the current prize was revealed
    pub reveal_ticks: Option<u64>,
    /// Segment boundaries the pointer has passed, drives the pointer flicker
    pub pointer_ticks: u64,
    pointer_segment: usize,

    // Toast notification
    pub toast_message: Option<String>,
    pub toast_is_error: bool,
    pub toast_ticks: u16,
}

impl App {
    pub fn new(config: &Config) -> WheelResult<Self> {
        let prizes = config.prize_list()?;
        let count = prizes.len();
        let settings = config.spin_settings()?;
        let picker = config.picker(count)?;

        let celebration = TerminalCelebration::new(
            ConfettiField::new(config.wheel.colors.clone(), config.general.seed),
            config.celebration.confetti,
            AudioPlayer::new(config.audio_settings()),
        );
        let wheel = PrizeWheel::new(prizes, settings, picker, TweenAnimator::new(), celebration)?;
        let layout = WheelLayout::new(count, config.layout_params(), Viewport::square(1.0));
        let pointer_segment = wheel.segment_under_pointer();

        Ok(Self {
            should_quit: false,
            show_help: false,
            theme: Theme::from_config(&config.theme),
            keys: KeyBindings::from_config(config),
            labels: config.general.clone(),

            wheel,
            layout,
            colors: (0..count).map(|i| config.segment_color(i)).collect(),

            tick_count: 0,
            tick_rate: Duration::from_millis(config.tick_rate_ms()),
            last_tick: None,
            reveal_ticks: None,
            pointer_ticks: 0,
            pointer_segment,

            toast_message: None,
            toast_is_error: false,
            toast_ticks: 0,
        })
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        // Help overlay swallows everything but its own toggles
        if self.show_help {
            if matches!(key.code, KeyCode::Esc) || key.code == self.keys.help {
                self.show_help = false;
            } else if key.code == self.keys.quit {
                self.should_quit = true;
            }
            return;
        }

        match key.code {
            code if code == self.keys.spin || code == KeyCode::Enter => self.spin(),
            code if code == self.keys.reset => self.reset(),
            code if code == self.keys.help => self.show_help = true,
            code if code == self.keys.quit => self.should_quit = true,
            KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    /// Spin button. Inert while the wheel is turning.
    pub fn spin(&mut self) {
        if self.wheel.is_spinning() {
            return;
        }
        if let SpinOutcome::Started { index, .. } = self.wheel.spin() {
            debug!("spin requested, landing on segment {}", index + 1);
            self.reveal_ticks = None;
            self.wheel.celebration_mut().clear();
        }
    }

    /// Reset button. Inert while the wheel is turning.
    pub fn reset(&mut self) {
        if self.wheel.is_spinning() {
            return;
        }
        if self.wheel.reset() {
            self.reveal_ticks = None;
            self.wheel.celebration_mut().clear();
            self.show_toast("Wheel reset", false);
        }
    }

    /// Recompute the wheel geometry for a new drawable area
    pub fn resize(&mut self, viewport: Viewport) {
        self.layout.resize(viewport);
    }

    /// Advance animations by `dt`
    pub fn tick(&mut self, dt: Duration) {
        self.tick_count = self.tick_count.wrapping_add(1);

        if let Some(done) = self.wheel.animator_mut().advance(dt) {
            if let Some(prize) = self.wheel.complete(done) {
                debug!("revealing \"{}\"", prize);
                self.reveal_ticks = Some(0);
            }
        } else if let Some(ticks) = self.reveal_ticks.as_mut() {
            *ticks += 1;
        }

        let segment = self.wheel.segment_under_pointer();
        if segment != self.pointer_segment {
            self.pointer_segment = segment;
            self.pointer_ticks += 1;
        }

        self.wheel.celebration_mut().tick(dt);
        self.tick_toast();
    }

    pub fn show_toast(&mut self, message: &str, is_error: bool) {
        self.toast_message = Some(message.to_string());
        self.toast_is_error = is_error;
        let ticks = TOAST_DURATION.as_millis() / self.tick_rate.as_millis().max(1);
        self.toast_ticks = ticks.clamp(1, u16::MAX as u128) as u16;
    }

    pub fn tick_toast(&mut self) {
        if self.toast_ticks > 0 {
            self.toast_ticks -= 1;
            if self.toast_ticks == 0 {
                self.toast_message = None;
            }
        }
    }

    /// Handle events from the event loop
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Tick => {
                let now = Instant::now();
                let dt = self
                    .last_tick
                    .map(|last| now.duration_since(last))
                    .unwrap_or(self.tick_rate);
                self.last_tick = Some(now);
                self.tick(dt);
            }
            Event::Resize(w, h) => {
                self.resize(crate::ui::wheel_viewport(Rect::new(0, 0, w, h)));
            }
        }
    }
}
