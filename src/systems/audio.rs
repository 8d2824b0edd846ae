//! Audio bridge systems and the background sound sink.
//!
//! - [`forward_audio_cmds`] sends every [`AudioCmd`] written this tick to the
//!   audio thread.
//! - [`poll_audio_messages`] drains the thread's replies into
//!   `Messages<AudioMessage>` without blocking.
//! - [`audio_thread`] is the sink itself. Playback is left to the host; the
//!   sink tracks which music is playing, logs every request and acknowledges it.

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::resources::audio::AudioBridge;
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender};
use log::{debug, info};
use rustc_hash::FxHashSet;

/// Drain any pending replies from the audio thread into the ECS mailbox.
pub fn poll_audio_messages(bridge: Res<AudioBridge>, mut writer: MessageWriter<AudioMessage>) {
    writer.write_batch(bridge.replies());
}

/// Advance the ECS message queue for [`AudioMessage`].
pub fn update_bevy_audio_messages(mut events: ResMut<Messages<AudioMessage>>) {
    events.update();
}

/// Forward this tick's [`AudioCmd`] messages to the sink.
pub fn forward_audio_cmds(bridge: Res<AudioBridge>, mut reader: MessageReader<AudioCmd>) {
    for cmd in reader.read() {
        // Dropped once the sink has stopped.
        bridge.send(cmd.clone());
    }
}

/// Advance the ECS message queue for AudioCmd.
pub fn update_bevy_audio_cmds(mut msgs: ResMut<Messages<AudioCmd>>) {
    msgs.update();
}

/// Entry point of the dedicated audio thread.
///
/// Blocks on the command channel until [`AudioCmd::Shutdown`] arrives or every
/// sender is dropped.
pub fn audio_thread(rx_cmd: Receiver<AudioCmd>, tx_evt: Sender<AudioMessage>) {
    debug!("audio thread starting (id={:?})", std::thread::current().id());

    let mut playing: FxHashSet<String> = FxHashSet::default();

    while let Ok(cmd) = rx_cmd.recv() {
        match cmd {
            AudioCmd::PlayFx { id } => {
                info!("play fx '{}'", id);
                let _ = tx_evt.send(AudioMessage::FxPlayed { id });
            }
            AudioCmd::PlayMusic { id, looped } => {
                info!("play music '{}' looped={}", id, looped);
                playing.insert(id.clone());
                let _ = tx_evt.send(AudioMessage::MusicStarted { id });
            }
            AudioCmd::StopMusic { id } => {
                if playing.remove(&id) {
                    info!("stop music '{}'", id);
                    let _ = tx_evt.send(AudioMessage::MusicStopped { id });
                }
            }
            AudioCmd::Shutdown => {
                debug!("audio shutdown requested");
                for id in playing.drain() {
                    let _ = tx_evt.send(AudioMessage::MusicStopped { id });
                }
                break;
            }
        }
    }

    debug!("audio thread exiting (id={:?})", std::thread::current().id());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    #[test]
    fn test_audio_thread_acknowledges_commands() {
        let (tx_cmd, rx_cmd) = unbounded();
        let (tx_msg, rx_msg) = unbounded();
        let handle = std::thread::spawn(move || audio_thread(rx_cmd, tx_msg));

        tx_cmd.send(AudioCmd::fx("GemCollected")).unwrap();
        tx_cmd
            .send(AudioCmd::PlayMusic {
                id: "Music".into(),
                looped: true,
            })
            .unwrap();
        tx_cmd.send(AudioCmd::StopMusic { id: "Other".into() }).unwrap();
        tx_cmd.send(AudioCmd::Shutdown).unwrap();
        handle.join().unwrap();

        let replies: Vec<AudioMessage> = rx_msg.try_iter().collect();
        assert_eq!(
            replies,
            vec![
                AudioMessage::FxPlayed {
                    id: "GemCollected".into()
                },
                AudioMessage::MusicStarted { id: "Music".into() },
                AudioMessage::MusicStopped { id: "Music".into() },
            ]
        );
    }

    #[test]
    fn test_forwarding_through_bridge() {
        let mut world = World::new();
        crate::resources::audio::setup_audio(&mut world).unwrap();
        world
            .resource_mut::<Messages<AudioCmd>>()
            .write(AudioCmd::fx("PlayerJump"));

        let mut schedule = Schedule::default();
        schedule.add_systems((forward_audio_cmds, update_bevy_audio_cmds).chain());
        schedule.run(&mut world);

        crate::resources::audio::shutdown_audio(&mut world);
        assert!(world.get_resource::<AudioBridge>().is_none());
    }
}
