use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use crossterm::event::KeyCode;
use ratatui::style::Color;
use serde::{Deserialize, Deserializer};
use tracing::info;

use crate::animation::{deserialize_easing, Easing};
use crate::celebration::AudioSettings;
use crate::error::{WheelError, WheelResult};
use crate::wheel::{Burst, IndexPicker, LayoutParams, PrizeList, SpinSettings};

// ─── Embedded Default ────────────────────────────────────────────────────
/// Baked into the binary at compile time, always available as the base layer.
const DEFAULT_CONFIG_TOML: &str = include_str!("../default_config.toml");

// ─── CLI Arguments (override layer) ─────────────────────────────────────
/// prize-wheel — spin the wheel, win a prize
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "prize-wheel", version, about, long_about = None)]
pub struct CliArgs {
    /// Path to a custom config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the default config to stdout and exit
    #[arg(long)]
    pub print_default_config: bool,

    /// Log level filter (overrides config file)
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Log file path (defaults to the data directory)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Full revolutions per spin (overrides config file)
    #[arg(short, long)]
    pub spins: Option<u32>,

    /// Always land on this prize index (overrides config file)
    #[arg(long)]
    pub fixed_index: Option<usize>,

    /// Seed for the prize draw, for reproducible sessions
    #[arg(long)]
    pub seed: Option<u64>,

    /// Target FPS for the render loop (overrides config file)
    #[arg(long)]
    pub fps: Option<u16>,

    /// Disable sounds
    #[arg(long)]
    pub no_audio: bool,

    /// Disable confetti
    #[arg(long)]
    pub no_confetti: bool,

    /// Write the wheel as an SVG document and exit
    #[arg(long, value_name = "PATH")]
    pub export_svg: Option<PathBuf>,

    /// Resolve a single spin without the UI, print it as JSON and exit
    #[arg(long)]
    pub once: bool,
}

// ─── TOML Structs ───────────────────────────────────────────────────────

/// Root configuration — parsed from TOML, then overridden by CLI flags.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub wheel: WheelConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub celebration: CelebrationConfig,
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub keys: KeysConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: String,
    pub title: String,
    pub subtitle: String,
    pub reveal_heading: String,
    pub spin_label: String,
    pub spinning_label: String,
    pub reset_label: String,
    /// Seed for the prize draw (unset = fresh entropy each run)
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Selection {
    Random,
    Fixed,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    pub prizes: Vec<String>,
    #[serde(deserialize_with = "deserialize_colors")]
    pub colors: Vec<Color>,
    pub pointer_angle: f64,
    pub spins: u32,
    pub selection: Selection,
    pub fixed_index: usize,
    pub radius_fraction: f64,
    pub label_radius: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub enabled: bool,
    pub fps: u16,
    pub spin_duration_secs: f64,
    #[serde(deserialize_with = "deserialize_easing")]
    pub spin_easing: Easing,
    pub reset_duration_secs: f64,
    #[serde(deserialize_with = "deserialize_easing")]
    pub reset_easing: Easing,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CelebrationConfig {
    pub confetti: bool,
    pub particle_count: u32,
    pub spread: f64,
    pub origin_x: f64,
    pub origin_y: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub enabled: bool,
    pub player: String,
    pub spin_sound: String,
    pub win_sound: String,
    pub bell: bool,
    pub play_spin_sound: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    #[serde(deserialize_with = "deserialize_color")]
    pub fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub fg_dim: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub accent: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub border: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub rim: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub pointer: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub hub: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub success: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub warning: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub error: Color,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeysConfig {
    pub spin: String,
    pub reset: String,
    pub help: String,
    pub quit: String,
}

// ─── Defaults ───────────────────────────────────────────────────────────

impl Default for Config {
    fn default() -> Self {
        // Parse the embedded TOML — this cannot fail since we control it
        toml::from_str(DEFAULT_CONFIG_TOML)
            .expect("BUG: embedded default_config.toml is invalid TOML")
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
            title: "Prize Wheel".into(),
            subtitle: "Spin the wheel and win a prize!".into(),
            reveal_heading: "CONGRATULATIONS!".into(),
            spin_label: "SPIN THE WHEEL!".into(),
            spinning_label: "Spinning...".into(),
            reset_label: "Reset".into(),
            seed: None,
        }
    }
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            prizes: (1..=8).map(|i| format!("Prize {i}")).collect(),
            colors: vec![
                Color::Rgb(0x75, 0x75, 0x75),
                Color::Rgb(0x4E, 0xCD, 0xC4),
                Color::Rgb(0x45, 0xB7, 0xD1),
                Color::Rgb(0x96, 0xCE, 0xB4),
                Color::Rgb(0xFE, 0xCA, 0x57),
                Color::Rgb(0xFF, 0x9F, 0xF3),
                Color::Rgb(0x54, 0xA0, 0xFF),
                Color::Rgb(0x5F, 0x27, 0xCD),
            ],
            pointer_angle: 270.0,
            spins: 15,
            selection: Selection::Random,
            fixed_index: 0,
            radius_fraction: 0.9333,
            label_radius: 0.68,
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            fps: 30,
            spin_duration_secs: 10.0,
            spin_easing: Easing::InOut(4),
            reset_duration_secs: 1.0,
            reset_easing: Easing::InOut(2),
        }
    }
}

impl Default for CelebrationConfig {
    fn default() -> Self {
        Self {
            confetti: true,
            particle_count: 200,
            spread: 90.0,
            origin_x: 0.5,
            origin_y: 0.6,
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            player: String::new(),
            spin_sound: String::new(),
            win_sound: String::new(),
            bell: true,
            play_spin_sound: false,
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            fg: Color::White,
            fg_dim: Color::DarkGray,
            accent: Color::Yellow,
            border: Color::DarkGray,
            rim: Color::Red,
            pointer: Color::Red,
            hub: Color::Yellow,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
        }
    }
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            spin: "space".into(),
            reset: "r".into(),
            help: "?".into(),
            quit: "q".into(),
        }
    }
}

// ─── Color Deserializers ────────────────────────────────────────────────

fn deserialize_color<'de, D>(deserializer: D) -> std::result::Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_color(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid color: \"{s}\"")))
}

fn deserialize_colors<'de, D>(deserializer: D) -> std::result::Result<Vec<Color>, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<String>::deserialize(deserializer)?
        .iter()
        .map(|s| {
            parse_color(s)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid color: \"{s}\"")))
        })
        .collect()
}

/// Parse a color string into a ratatui Color.
/// Supports: named colors, "reset", "#RRGGBB" hex.
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim().to_lowercase();
    match s.as_str() {
        "reset" | "default" | "transparent" => Some(Color::Reset),
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" | "dark_gray" | "dark_grey" => Some(Color::DarkGray),
        "lightred" | "light_red" => Some(Color::LightRed),
        "lightgreen" | "light_green" => Some(Color::LightGreen),
        "lightyellow" | "light_yellow" => Some(Color::LightYellow),
        "lightblue" | "light_blue" => Some(Color::LightBlue),
        "lightmagenta" | "light_magenta" => Some(Color::LightMagenta),
        "lightcyan" | "light_cyan" => Some(Color::LightCyan),
        hex if hex.starts_with('#')
            && hex.len() == 7
            && hex[1..].chars().all(|c| c.is_ascii_hexdigit()) =>
        {
            let r = u8::from_str_radix(&hex[1..3], 16).ok()?;
            let g = u8::from_str_radix(&hex[3..5], 16).ok()?;
            let b = u8::from_str_radix(&hex[5..7], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

/// Parse a key name from the `[keys]` table.
/// Supports: "space", "enter", "esc", "tab", "backspace" and single characters.
pub fn parse_key(s: &str) -> Option<KeyCode> {
    let trimmed = s.trim();
    match trimmed.to_lowercase().as_str() {
        "space" => Some(KeyCode::Char(' ')),
        "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        "backspace" => Some(KeyCode::Backspace),
        _ => {
            let mut chars = trimmed.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(KeyCode::Char(c)),
                _ => None,
            }
        }
    }
}

fn duration_from_secs(name: &str, secs: f64) -> WheelResult<Duration> {
    Duration::try_from_secs_f64(secs)
        .map_err(|_| WheelError::Config(format!("{name} must be a non-negative number, got {secs}")))
}

fn non_empty_path(s: &str) -> Option<PathBuf> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(PathBuf::from(s))
    }
}

// ─── Path Resolution & Conversions ──────────────────────────────────────

impl Config {
    /// Standard config file path: ~/.config/prize-wheel/config.toml
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("prize-wheel")
            .join("config.toml")
    }

    /// Log directory: ~/.local/share/prize-wheel/
    pub fn log_dir() -> PathBuf {
        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("prize-wheel");
        std::fs::create_dir_all(&data_dir).ok();
        data_dir
    }

    /// Convenience: tick interval from FPS
    pub fn tick_rate_ms(&self) -> u64 {
        let fps = self.animation.fps.max(1);
        1000 / fps as u64
    }

    pub fn prize_list(&self) -> WheelResult<PrizeList> {
        PrizeList::new(self.wheel.prizes.iter().cloned())
    }

    /// Color of segment `index`, cycling through the palette
    pub fn segment_color(&self, index: usize) -> Color {
        if self.wheel.colors.is_empty() {
            return self.theme.accent;
        }
        self.wheel.colors[index % self.wheel.colors.len()]
    }

    pub fn layout_params(&self) -> LayoutParams {
        LayoutParams {
            radius_fraction: self.wheel.radius_fraction.clamp(0.1, 1.0),
            label_radius: self.wheel.label_radius.clamp(0.0, 1.0),
        }
    }

    pub fn spin_settings(&self) -> WheelResult<SpinSettings> {
        let anim = &self.animation;
        let (spin_duration, reset_duration) = if anim.enabled {
            (
                duration_from_secs("spin_duration_secs", anim.spin_duration_secs)?,
                duration_from_secs("reset_duration_secs", anim.reset_duration_secs)?,
            )
        } else {
            (Duration::ZERO, Duration::ZERO)
        };

        let c = &self.celebration;
        let burst = c.confetti.then_some(Burst {
            particle_count: c.particle_count,
            spread: c.spread,
            origin: (c.origin_x.clamp(0.0, 1.0), c.origin_y.clamp(0.0, 1.0)),
        });

        SpinSettings {
            pointer_angle: self.wheel.pointer_angle,
            spins: self.wheel.spins,
            spin_duration,
            spin_easing: anim.spin_easing,
            reset_duration,
            reset_easing: anim.reset_easing,
            burst,
            spin_cue: self.audio.play_spin_sound,
        }
        .validate()
    }

    /// Index picker for the configured selection mode. `count` is the
    /// number of prizes.
    pub fn picker(&self, count: usize) -> WheelResult<IndexPicker> {
        match self.wheel.selection {
            Selection::Fixed => IndexPicker::fixed(self.wheel.fixed_index, count),
            Selection::Random => Ok(match self.general.seed {
                Some(seed) => IndexPicker::seeded(seed),
                None => IndexPicker::random(),
            }),
        }
    }

    pub fn audio_settings(&self) -> AudioSettings {
        let player = self.audio.player.trim();
        AudioSettings {
            enabled: self.audio.enabled,
            player: (!player.is_empty()).then(|| player.to_string()),
            spin_sound: non_empty_path(&self.audio.spin_sound),
            win_sound: non_empty_path(&self.audio.win_sound),
            bell: self.audio.bell,
        }
    }

    /// Access keybinding config
    pub fn keys(&self) -> &KeysConfig {
        &self.keys
    }

    /// Apply CLI flags on top of the file values
    pub fn apply_overrides(&mut self, cli: &CliArgs) {
        if let Some(ref level) = cli.log_level {
            self.general.log_level = level.clone();
        }
        if let Some(spins) = cli.spins {
            self.wheel.spins = spins;
        }
        if let Some(index) = cli.fixed_index {
            self.wheel.selection = Selection::Fixed;
            self.wheel.fixed_index = index;
        }
        if let Some(seed) = cli.seed {
            self.general.seed = Some(seed);
        }
        if let Some(fps) = cli.fps {
            self.animation.fps = fps;
        }
        if cli.no_audio {
            self.audio.enabled = false;
        }
        if cli.no_confetti {
            self.celebration.confetti = false;
        }
    }
}

// ─── Bootloader ─────────────────────────────────────────────────────────

/// The single entry point for configuration. Called exactly once at startup.
///
/// 1. Resolve config file path (CLI override or default)
/// 2. If the default config file doesn't exist, create directory tree + write defaults
/// 3. Parse TOML from disk into Config
/// 4. Apply CLI overrides on top
pub fn load(cli: &CliArgs) -> Result<Config> {
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);

    // Bootstrap only the standard location; a missing explicit path is an error
    if cli.config.is_none() && !config_path.exists() {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).wrap_err_with(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        std::fs::write(&config_path, DEFAULT_CONFIG_TOML).wrap_err_with(|| {
            format!(
                "Failed to write default config to {}",
                config_path.display()
            )
        })?;
        info!("Created default config at {}", config_path.display());
    }

    let toml_str = std::fs::read_to_string(&config_path)
        .wrap_err_with(|| format!("Failed to read config from {}", config_path.display()))?;

    let mut config = parse(&toml_str).wrap_err_with(|| {
        format!(
            "Failed to parse config at {}.\n\
             Delete the file to regenerate defaults, or run:\n  \
             prize-wheel --print-default-config > {:?}",
            config_path.display(),
            config_path
        )
    })?;

    config.apply_overrides(cli);
    Ok(config)
}

/// Parse a TOML document into a Config
pub fn parse(toml_str: &str) -> WheelResult<Config> {
    toml::from_str(toml_str).map_err(|e| WheelError::Config(e.to_string()))
}

/// Returns the embedded default config TOML string.
pub fn default_config_toml() -> &'static str {
    DEFAULT_CONFIG_TOML
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_default_parses() {
        let config = Config::default();
        assert_eq!(config.wheel.prizes.len(), 8);
        assert_eq!(config.wheel.colors.len(), 8);
        assert_eq!(config.wheel.colors[0], Color::Rgb(0x75, 0x75, 0x75));
        assert_eq!(config.wheel.spins, 15);
        assert_eq!(config.wheel.selection, Selection::Random);
        assert_eq!(config.animation.spin_easing, Easing::InOut(4));
        assert_eq!(config.animation.reset_easing, Easing::InOut(2));
        assert_eq!(config.theme.rim, Color::Rgb(0xAA, 0x18, 0x2C));
        assert_eq!(config.tick_rate_ms(), 33);
    }

    #[test]
    fn default_settings_match_reference_wheel() {
        let settings = Config::default().spin_settings().unwrap();
        assert_eq!(settings.pointer_angle, 270.0);
        assert_eq!(settings.spin_duration, Duration::from_secs(10));
        assert_eq!(settings.reset_duration, Duration::from_secs(1));
        assert_eq!(settings.burst, Some(Burst::default()));
        assert!(!settings.spin_cue);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config = parse("[wheel]\nprizes = [\"only\"]\n").unwrap();
        assert_eq!(config.wheel.prizes, vec!["only".to_string()]);
        assert_eq!(config.wheel.spins, 15);
        assert_eq!(config.keys.spin, "space");
        assert_eq!(config.prize_list().unwrap().len(), 1);
    }

    #[test]
    fn empty_prize_list_is_a_construction_error() {
        let config = parse("[wheel]\nprizes = []\n").unwrap();
        assert!(matches!(config.prize_list(), Err(WheelError::EmptyPrizeList)));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(parse("[theme]\nfg = \"chartreuse-ish\"\n").is_err());
        assert!(parse("[animation]\nspin_easing = \"wobble\"\n").is_err());
        assert!(parse("[wheel]\nselection = \"sometimes\"\n").is_err());

        let mut config = Config::default();
        config.animation.spin_duration_secs = -1.0;
        assert!(matches!(config.spin_settings(), Err(WheelError::Config(_))));

        config.animation.spin_duration_secs = 4.0;
        config.wheel.spins = 0;
        assert!(matches!(config.spin_settings(), Err(WheelError::InvalidSpinCount)));
    }

    #[test]
    fn disabled_animation_is_instant() {
        let mut config = Config::default();
        config.animation.enabled = false;
        let settings = config.spin_settings().unwrap();
        assert_eq!(settings.spin_duration, Duration::ZERO);
        assert_eq!(settings.reset_duration, Duration::ZERO);
    }

    #[test]
    fn cli_overrides_apply() {
        let mut config = Config::default();
        let cli = CliArgs {
            spins: Some(6),
            fixed_index: Some(4),
            seed: Some(9),
            fps: Some(60),
            no_audio: true,
            no_confetti: true,
            log_level: Some("debug".into()),
            ..CliArgs::default()
        };
        config.apply_overrides(&cli);

        assert_eq!(config.wheel.spins, 6);
        assert_eq!(config.wheel.selection, Selection::Fixed);
        assert_eq!(config.wheel.fixed_index, 4);
        assert_eq!(config.general.seed, Some(9));
        assert_eq!(config.tick_rate_ms(), 16);
        assert!(!config.audio_settings().enabled);
        assert_eq!(config.spin_settings().unwrap().burst, None);
        assert_eq!(config.general.log_level, "debug");

        let mut picker = config.picker(8).unwrap();
        assert_eq!(picker.pick(8), 4);
        assert!(config.picker(3).is_err());
    }

    #[test]
    fn segment_colors_cycle() {
        let config = Config::default();
        assert_eq!(config.segment_color(8), config.segment_color(0));
        assert_eq!(config.segment_color(9), config.segment_color(1));
    }

    #[test]
    fn audio_paths_are_optional() {
        let mut config = Config::default();
        let audio = config.audio_settings();
        assert_eq!(audio.player.as_deref(), Some("paplay"));
        assert_eq!(audio.win_sound, None);

        config.audio.win_sound = "/tmp/win.mp3".into();
        assert_eq!(
            config.audio_settings().win_sound,
            Some(PathBuf::from("/tmp/win.mp3"))
        );
    }

    #[test]
    fn parses_colors_and_keys() {
        assert_eq!(parse_color("#FF0080"), Some(Color::Rgb(255, 0, 128)));
        assert_eq!(parse_color(" Dark_Gray "), Some(Color::DarkGray));
        assert_eq!(parse_color("#12"), None);
        assert_eq!(parse_color("#aééb"), None);
        assert_eq!(parse_color("#gg0000"), None);

        assert_eq!(parse_key("space"), Some(KeyCode::Char(' ')));
        assert_eq!(parse_key("Enter"), Some(KeyCode::Enter));
        assert_eq!(parse_key("R"), Some(KeyCode::Char('R')));
        assert_eq!(parse_key("?"), Some(KeyCode::Char('?')));
        assert_eq!(parse_key("ctrl+x"), None);
    }

    #[test]
    fn multibyte_color_is_a_config_error() {
        let err = parse("[theme]\nfg = \"#aééb\"\n").unwrap_err();
        assert!(matches!(err, WheelError::Config(ref msg) if msg.contains("invalid color")));
    }
}
