//! Event types and observers used by the game.
//!
//! This module groups the domain events exchanged across systems and the
//! corresponding observers that react to them. Detection systems trigger
//! events; observers apply the consequences.
//!
//! Submodules:
//! - [`audio`] – commands and messages for the background audio thread
//! - [`gameplay`] – player death, gem pickup and exit events with their observers
//!
//! See each submodule for concrete event data and semantics.
pub mod audio;
pub mod gameplay;
