//! Game configuration resource.
//!
//! Holds every tunable of the simulation, loaded from an INI configuration
//! file. Defaults reproduce the reference feel of the game, so a missing file
//! or missing keys are never fatal.
//!
//! # Configuration File Format
//!
//! ```ini
//! [tiles]
//! width = 40
//! height = 32
//!
//! [simulation]
//! fps = 60
//!
//! [player]
//! move_acceleration = 13000
//! max_move_speed = 1750
//! ground_drag = 0.48
//! air_drag = 0.58
//! max_jump_time = 0.35
//! jump_launch_velocity = -3500
//! gravity = 3400
//! max_fall_speed = 550
//! jump_control_power = 0.14
//! frame_width = 64
//! frame_height = 64
//!
//! [enemy]
//! move_speed = 64
//! max_wait_time = 0.5
//!
//! [round]
//! time_limit = 120
//! points_per_second = 5
//!
//! [gem]
//! points = 30
//! height = 32
//!
//! [textures]
//! impassable_block = Tiles/BlockA0
//! ```

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use rustc_hash::FxHashMap;

use crate::level::TileKind;
use crate::resources::tilegrid::TileSize;

const DEFAULT_CONFIG_PATH: &str = "./config.ini";
const DEFAULT_FPS: u32 = 60;

/// Horizontal and vertical movement constants of the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerTuning {
    pub move_acceleration: f32,
    pub max_move_speed: f32,
    pub ground_drag: f32,
    pub air_drag: f32,
    /// Seconds of ascent during which the jump curve owns vertical velocity.
    pub max_jump_time: f32,
    /// Negative: up is -y.
    pub jump_launch_velocity: f32,
    pub gravity: f32,
    pub max_fall_speed: f32,
    pub jump_control_power: f32,
    pub frame_width: i32,
    pub frame_height: i32,
    /// Collision box width as a fraction of the frame.
    pub width_factor: f32,
    pub height_factor: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            move_acceleration: 13000.0,
            max_move_speed: 1750.0,
            ground_drag: 0.48,
            air_drag: 0.58,
            max_jump_time: 0.35,
            jump_launch_velocity: -3500.0,
            gravity: 3400.0,
            max_fall_speed: 550.0,
            jump_control_power: 0.14,
            frame_width: 64,
            frame_height: 64,
            width_factor: 0.4,
            height_factor: 0.8,
        }
    }
}

/// Patrol behaviour of enemies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatrolTuning {
    pub move_speed: f32,
    pub max_wait_time: f32,
    pub frame_width: i32,
    pub frame_height: i32,
    pub width_factor: f32,
    pub height_factor: f32,
}

impl Default for PatrolTuning {
    fn default() -> Self {
        Self {
            move_speed: 64.0,
            max_wait_time: 0.5,
            frame_width: 64,
            frame_height: 64,
            width_factor: 0.35,
            height_factor: 0.7,
        }
    }
}

/// Round timing and scoring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundRules {
    /// Seconds available to reach the exit.
    pub time_limit: f32,
    /// Score granted per second left on the clock at the exit.
    pub points_per_second: u32,
    pub gem_points: u32,
    /// Height of the gem sprite; scales the bounce.
    pub gem_height: f32,
}

impl Default for RoundRules {
    fn default() -> Self {
        Self {
            time_limit: 120.0,
            points_per_second: 5,
            gem_points: 30,
            gem_height: 32.0,
        }
    }
}

/// Game configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    pub tile_size: TileSize,
    /// Fixed simulation rate used by the headless runner.
    pub fps: u32,
    pub player: PlayerTuning,
    pub enemy: PatrolTuning,
    pub round: RoundRules,
    /// Texture key per tile kind. Kinds without an entry draw nothing.
    pub tile_textures: FxHashMap<TileKind, String>,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn default_tile_textures() -> FxHashMap<TileKind, String> {
    let mut textures = FxHashMap::default();
    textures.insert(TileKind::Exit, "Tiles/Exit".to_string());
    textures.insert(TileKind::PlatformBlock, "Tiles/Platform".to_string());
    textures.insert(TileKind::PassableBlock, "Tiles/BlockB0".to_string());
    textures.insert(TileKind::ImpassableBlock, "Tiles/BlockA0".to_string());
    textures
}

impl GameConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            tile_size: TileSize::default(),
            fps: DEFAULT_FPS,
            player: PlayerTuning::default(),
            enemy: PatrolTuning::default(),
            round: RoundRules::default(),
            tile_textures: default_tile_textures(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Seconds per simulation tick.
    pub fn fixed_delta(&self) -> f32 {
        1.0 / self.fps.max(1) as f32
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config);
        info!(
            "Loaded config from {:?}: tiles {}x{}, {} fps, time limit {}s",
            self.config_path,
            self.tile_size.width,
            self.tile_size.height,
            self.fps,
            self.round.time_limit
        );
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        let float = |section: &str, key: &str| -> Option<f32> {
            match config.getfloat(section, key) {
                Ok(value) => value.map(|v| v as f32),
                Err(e) => {
                    warn!("Ignoring [{}] {}: {}", section, key, e);
                    None
                }
            }
        };
        let int = |section: &str, key: &str| -> Option<i64> {
            match config.getint(section, key) {
                Ok(value) => value,
                Err(e) => {
                    warn!("Ignoring [{}] {}: {}", section, key, e);
                    None
                }
            }
        };

        // [tiles] section
        if let Some(width) = int("tiles", "width") {
            self.tile_size.width = width as i32;
        }
        if let Some(height) = int("tiles", "height") {
            self.tile_size.height = height as i32;
        }

        // [simulation] section
        if let Some(fps) = int("simulation", "fps") {
            if fps > 0 {
                self.fps = fps as u32;
            } else {
                warn!("Ignoring [simulation] fps = {}", fps);
            }
        }

        // [player] section
        let p = &mut self.player;
        for (key, slot) in [
            ("move_acceleration", &mut p.move_acceleration),
            ("max_move_speed", &mut p.max_move_speed),
            ("ground_drag", &mut p.ground_drag),
            ("air_drag", &mut p.air_drag),
            ("max_jump_time", &mut p.max_jump_time),
            ("jump_launch_velocity", &mut p.jump_launch_velocity),
            ("gravity", &mut p.gravity),
            ("max_fall_speed", &mut p.max_fall_speed),
            ("jump_control_power", &mut p.jump_control_power),
            ("width_factor", &mut p.width_factor),
            ("height_factor", &mut p.height_factor),
        ] {
            if let Some(value) = float("player", key) {
                *slot = value;
            }
        }
        if let Some(width) = int("player", "frame_width") {
            p.frame_width = width as i32;
        }
        if let Some(height) = int("player", "frame_height") {
            p.frame_height = height as i32;
        }

        // [enemy] section
        let e = &mut self.enemy;
        for (key, slot) in [
            ("move_speed", &mut e.move_speed),
            ("max_wait_time", &mut e.max_wait_time),
            ("width_factor", &mut e.width_factor),
            ("height_factor", &mut e.height_factor),
        ] {
            if let Some(value) = float("enemy", key) {
                *slot = value;
            }
        }
        if let Some(width) = int("enemy", "frame_width") {
            e.frame_width = width as i32;
        }
        if let Some(height) = int("enemy", "frame_height") {
            e.frame_height = height as i32;
        }

        // [round] and [gem] sections
        if let Some(limit) = float("round", "time_limit") {
            self.round.time_limit = limit;
        }
        if let Some(points) = int("round", "points_per_second") {
            self.round.points_per_second = points.max(0) as u32;
        }
        if let Some(points) = int("gem", "points") {
            self.round.gem_points = points.max(0) as u32;
        }
        if let Some(height) = float("gem", "height") {
            self.round.gem_height = height;
        }

        // [textures] section
        for kind in TileKind::ALL {
            if let Some(texture) = config.get("textures", kind.name()) {
                if texture.is_empty() {
                    self.tile_textures.remove(&kind);
                } else {
                    self.tile_textures.insert(kind, texture);
                }
            }
        }
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("tiles", "width", Some(self.tile_size.width.to_string()));
        config.set("tiles", "height", Some(self.tile_size.height.to_string()));
        config.set("simulation", "fps", Some(self.fps.to_string()));

        let p = &self.player;
        for (key, value) in [
            ("move_acceleration", p.move_acceleration),
            ("max_move_speed", p.max_move_speed),
            ("ground_drag", p.ground_drag),
            ("air_drag", p.air_drag),
            ("max_jump_time", p.max_jump_time),
            ("jump_launch_velocity", p.jump_launch_velocity),
            ("gravity", p.gravity),
            ("max_fall_speed", p.max_fall_speed),
            ("jump_control_power", p.jump_control_power),
            ("width_factor", p.width_factor),
            ("height_factor", p.height_factor),
        ] {
            config.set("player", key, Some(value.to_string()));
        }
        config.set("player", "frame_width", Some(p.frame_width.to_string()));
        config.set("player", "frame_height", Some(p.frame_height.to_string()));

        let e = &self.enemy;
        config.set("enemy", "move_speed", Some(e.move_speed.to_string()));
        config.set("enemy", "max_wait_time", Some(e.max_wait_time.to_string()));
        config.set("enemy", "width_factor", Some(e.width_factor.to_string()));
        config.set("enemy", "height_factor", Some(e.height_factor.to_string()));
        config.set("enemy", "frame_width", Some(e.frame_width.to_string()));
        config.set("enemy", "frame_height", Some(e.frame_height.to_string()));

        config.set("round", "time_limit", Some(self.round.time_limit.to_string()));
        config.set(
            "round",
            "points_per_second",
            Some(self.round.points_per_second.to_string()),
        );
        config.set("gem", "points", Some(self.round.gem_points.to_string()));
        config.set("gem", "height", Some(self.round.gem_height.to_string()));

        for (kind, texture) in &self.tile_textures {
            config.set("textures", kind.name(), Some(texture.clone()));
        }

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}
