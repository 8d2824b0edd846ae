use bevy_ecs::message::Message;

/// Sound effect ids requested by gameplay.
pub mod sounds {
    pub const PLAYER_JUMP: &str = "PlayerJump";
    pub const PLAYER_KILLED: &str = "PlayerKilled";
    pub const PLAYER_FALL: &str = "PlayerFall";
    pub const GEM_COLLECTED: &str = "GemCollected";
    pub const EXIT_REACHED: &str = "ExitReached";
    /// Looping background track started by the host.
    pub const MUSIC: &str = "Music";
}

/// Commands sent *to* the audio thread
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioCmd {
    PlayFx { id: String },
    PlayMusic { id: String, looped: bool },
    StopMusic { id: String },
    Shutdown,
}

impl AudioCmd {
    pub fn fx(id: &str) -> Self {
        AudioCmd::PlayFx { id: id.to_string() }
    }
}

/// Events sent *back* from the audio thread
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioMessage {
    FxPlayed { id: String },
    MusicStarted { id: String },
    MusicStopped { id: String },
}
