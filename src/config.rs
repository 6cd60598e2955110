use log::warn;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const CONFIG_PATH: &str = "reelrunner.ini";

// --- Minimal INI reader ---
#[derive(Debug, Default)]
pub struct SimpleIni {
    sections: HashMap<String, HashMap<String, String>>,
}

impl SimpleIni {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<(), std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        self.sections.clear();

        let mut current_section: Option<String> = None;

        for raw_line in content.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            // Section header: [SectionName]
            if line.starts_with('[') && line.ends_with(']') && line.len() >= 2 {
                let name = &line[1..line.len() - 1];
                let section = name.trim().to_string();
                current_section = Some(section.clone());
                self.sections.entry(section).or_default();
                continue;
            }

            // Key/value pair: key=value
            if let Some(eq_idx) = line.find('=') {
                let (key_raw, value_raw) = line.split_at(eq_idx);
                let key = key_raw.trim();
                if key.is_empty() {
                    continue;
                }
                let value = value_raw[1..].trim().to_string();
                let section = current_section.clone().unwrap_or_default();
                self.sections
                    .entry(section)
                    .or_default()
                    .insert(key.to_string(), value);
            }
        }

        Ok(())
    }

    pub fn get(&self, section: &str, key: &str) -> Option<String> {
        self.sections.get(section).and_then(|s| s.get(key)).cloned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub const fn as_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Off => log::LevelFilter::Off,
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

impl FromStr for LogLevel {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" => Ok(Self::Off),
            "error" => Ok(Self::Error),
            "warn" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(()),
        }
    }
}

/// Immutable runtime configuration. Constructed once in `main` and passed by
/// reference everywhere; there is no process-wide mutable instance.
#[derive(Debug, Clone)]
pub struct Config {
    pub screen_width: u32,
    pub screen_height: u32,
    /// Number of lanes the actor can occupy. Posters only ever use the two
    /// outermost lanes of a pair spawn, so this is 2 in practice.
    pub lane_count: usize,
    pub panel_width: i32,
    pub actor_size: i32,
    pub actor_bottom_margin: i32,
    pub poster_width: u32,
    pub poster_height_cap: u32,
    pub poster_speed: f32,
    /// Ticks to wait after a pair resolves before the next pair spawns.
    pub round_delay_ticks: u32,
    pub poster_dir: PathBuf,
    pub catalog_path: PathBuf,
    pub enable_remote_posters: bool,
    pub lookup_url: String,
    pub lookup_api_key: String,
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen_width: 800,
            screen_height: 600,
            lane_count: 2,
            panel_width: 200,
            actor_size: 80,
            actor_bottom_margin: 100,
            poster_width: 100,
            poster_height_cap: 150,
            poster_speed: 2.0,
            round_delay_ticks: 60,
            poster_dir: PathBuf::from("assets/posters"),
            catalog_path: PathBuf::from("assets/movies.json"),
            enable_remote_posters: true,
            lookup_url: "https://www.omdbapi.com/".to_string(),
            lookup_api_key: String::new(),
            log_level: LogLevel::Info,
        }
    }
}

impl Config {
    /// Width of the play area; the picks panel occupies the rest.
    pub const fn play_width(&self) -> i32 {
        self.screen_width as i32 - self.panel_width
    }

    /// Horizontal center of a lane within the play area.
    pub const fn lane_center_x(&self, lane: usize) -> i32 {
        let count = if self.lane_count == 0 { 1 } else { self.lane_count };
        self.play_width() * (2 * lane as i32 + 1) / (2 * count as i32)
    }

    pub const fn actor_top_y(&self) -> i32 {
        self.screen_height as i32 - self.actor_bottom_margin - self.actor_size
    }
}

const DEFAULT_CONFIG_FILE: &str = "\
[Display]\n\
ScreenWidth=800\n\
ScreenHeight=600\n\
\n\
[Game]\n\
LaneCount=2\n\
PanelWidth=200\n\
ActorSize=80\n\
ActorBottomMargin=100\n\
PosterWidth=100\n\
PosterHeightCap=150\n\
PosterSpeed=2.0\n\
RoundDelayTicks=60\n\
\n\
[Assets]\n\
PosterDir=assets/posters\n\
CatalogPath=assets/movies.json\n\
\n\
[Network]\n\
EnableRemotePosters=1\n\
LookupUrl=https://www.omdbapi.com/\n\
LookupApiKey=\n\
\n\
[Logging]\n\
LogLevel=info\n";

pub fn load<P: AsRef<Path>>(path: P) -> Config {
    let path = path.as_ref();
    if !path.exists()
        && let Err(e) = std::fs::write(path, DEFAULT_CONFIG_FILE)
    {
        warn!("Failed to create default config file: {e}");
    }

    let default = Config::default();
    let mut conf = SimpleIni::new();
    if let Err(e) = conf.load(path) {
        warn!(
            "Could not read '{}' ({e}); using built-in defaults.",
            path.display()
        );
        return default;
    }

    Config {
        screen_width: conf
            .get("Display", "ScreenWidth")
            .and_then(|v| v.parse().ok())
            .map_or(default.screen_width, |v: u32| v.max(320)),
        screen_height: conf
            .get("Display", "ScreenHeight")
            .and_then(|v| v.parse().ok())
            .map_or(default.screen_height, |v: u32| v.max(240)),
        lane_count: conf
            .get("Game", "LaneCount")
            .and_then(|v| v.parse().ok())
            .map_or(default.lane_count, |v: usize| v.max(2)),
        panel_width: conf
            .get("Game", "PanelWidth")
            .and_then(|v| v.parse().ok())
            .unwrap_or(default.panel_width),
        actor_size: conf
            .get("Game", "ActorSize")
            .and_then(|v| v.parse().ok())
            .unwrap_or(default.actor_size),
        actor_bottom_margin: conf
            .get("Game", "ActorBottomMargin")
            .and_then(|v| v.parse().ok())
            .unwrap_or(default.actor_bottom_margin),
        poster_width: conf
            .get("Game", "PosterWidth")
            .and_then(|v| v.parse().ok())
            .map_or(default.poster_width, |v: u32| v.max(8)),
        poster_height_cap: conf
            .get("Game", "PosterHeightCap")
            .and_then(|v| v.parse().ok())
            .map_or(default.poster_height_cap, |v: u32| v.max(8)),
        poster_speed: conf
            .get("Game", "PosterSpeed")
            .and_then(|v| v.parse().ok())
            .unwrap_or(default.poster_speed),
        round_delay_ticks: conf
            .get("Game", "RoundDelayTicks")
            .and_then(|v| v.parse().ok())
            .unwrap_or(default.round_delay_ticks),
        poster_dir: conf
            .get("Assets", "PosterDir")
            .map_or(default.poster_dir, PathBuf::from),
        catalog_path: conf
            .get("Assets", "CatalogPath")
            .map_or(default.catalog_path, PathBuf::from),
        enable_remote_posters: conf
            .get("Network", "EnableRemotePosters")
            .and_then(|v| v.parse::<u8>().ok())
            .map_or(default.enable_remote_posters, |v| v != 0),
        lookup_url: conf
            .get("Network", "LookupUrl")
            .unwrap_or(default.lookup_url),
        lookup_api_key: conf
            .get("Network", "LookupApiKey")
            .unwrap_or(default.lookup_api_key),
        log_level: conf
            .get("Logging", "LogLevel")
            .and_then(|v| LogLevel::from_str(&v).ok())
            .unwrap_or(default.log_level),
    }
}
