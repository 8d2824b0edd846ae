//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution: configuration, input, timing, the
//! loaded level and the audio bridge. Each submodule documents the semantics
//! and intended usage of its resource(s).
//!
//! Overview
//! - `animationstore` – definitions for animations reused across entities
//! - `audio` – bridge and channels for the background audio thread
//! - `gameconfig` – tuning and tile textures loaded from `config.ini`
//! - `input` – per-tick input snapshot and edge-tracked input state
//! - `levelplaylist` – parsed levels and the index of the current one
//! - `levelstate` – clock, score and outcome of the current round
//! - `texturepack` – tile kind to texture key table of the loaded level
//! - `tilegrid` – immutable collision grid of the loaded level
//! - `worldtime` – simulation time and delta
pub mod animationstore;
pub mod audio;
pub mod gameconfig;
pub mod input;
pub mod levelplaylist;
pub mod levelstate;
pub mod texturepack;
pub mod tilegrid;
pub mod worldtime;
