//! Sound sink wiring.
//!
//! Gameplay only ever writes [`AudioCmd`] messages. They reach the sink
//! thread when an [`AudioBridge`] is present; headless runs and tests can
//! leave it out and the commands simply age out of the queue.
//!
//! [`setup_audio`] starts the sink and [`shutdown_audio`] stops it, handing
//! back any music still marked as playing through the reply channel.

use std::io;
use std::thread::JoinHandle;

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::{debug, warn};

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::systems::audio::audio_thread;

/// Name given to the sink thread, shown in panics and debuggers.
const SINK_THREAD_NAME: &str = "tilerunner-audio";

/// Channels to the running sound sink.
#[derive(Resource)]
pub struct AudioBridge {
    commands: Sender<AudioCmd>,
    replies: Receiver<AudioMessage>,
    sink: JoinHandle<()>,
}

impl AudioBridge {
    /// Start the sink thread.
    pub fn spawn() -> io::Result<Self> {
        let (commands, sink_commands) = unbounded::<AudioCmd>();
        let (sink_replies, replies) = unbounded::<AudioMessage>();
        let sink = std::thread::Builder::new()
            .name(SINK_THREAD_NAME.to_string())
            .spawn(move || audio_thread(sink_commands, sink_replies))?;
        Ok(Self {
            commands,
            replies,
            sink,
        })
    }

    /// Queue `cmd` for the sink. Returns false once the sink has stopped.
    pub fn send(&self, cmd: AudioCmd) -> bool {
        self.commands.send(cmd).is_ok()
    }

    /// Replies the sink has produced so far, without blocking.
    pub fn replies(&self) -> impl Iterator<Item = AudioMessage> + '_ {
        self.replies.try_iter()
    }

    /// Ask the sink to stop and wait for it.
    ///
    /// Returns the replies it sent on the way out.
    pub fn stop(self) -> Vec<AudioMessage> {
        if !self.send(AudioCmd::Shutdown) {
            debug!("audio sink already stopped");
        }
        if self.sink.join().is_err() {
            warn!("audio sink thread panicked");
        }
        self.replies.try_iter().collect()
    }
}

/// Register both audio message queues.
pub fn init_audio_messages(world: &mut World) {
    world.init_resource::<Messages<AudioMessage>>();
    world.init_resource::<Messages<AudioCmd>>();
}

/// Start the sink and insert its [`AudioBridge`].
pub fn setup_audio(world: &mut World) -> io::Result<()> {
    let bridge = AudioBridge::spawn()?;
    world.insert_resource(bridge);
    init_audio_messages(world);
    Ok(())
}

/// Stop the sink if one is running and remove its bridge.
pub fn shutdown_audio(world: &mut World) {
    let Some(bridge) = world.remove_resource::<AudioBridge>() else {
        return;
    };
    for reply in bridge.stop() {
        debug!("audio sink: {:?}", reply);
    }
}
