use anyhow::Result;
use crossbeam_channel::{Receiver, Sender, bounded};
use log::{debug, error, warn};
use std::thread::{self, JoinHandle};

use crate::game::{MAX_VOLUME, SOUND_EFFECT_AMOUNT, SOUNDTRACKS_AMOUNT};

// Sound effects the engine can trigger, one slot each in the effect bank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    MoveLeft,
    MoveRight,
    MoveDown,
    HardDrop,
    RotateClockwise,
    RotateCounterClockwise,
    Hold,
    Lock,
    LineClear,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; SOUND_EFFECT_AMOUNT] = [
        SoundEffect::MoveLeft,
        SoundEffect::MoveRight,
        SoundEffect::MoveDown,
        SoundEffect::HardDrop,
        SoundEffect::RotateClockwise,
        SoundEffect::RotateCounterClockwise,
        SoundEffect::Hold,
        SoundEffect::Lock,
        SoundEffect::LineClear,
    ];

    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

// Commands understood by the audio thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCommand {
    PlaySoundtrack(u8),
    PlayEffect(SoundEffect),
    SetVolumes { music: u8, effects: u8 },
    Quit,
}

/// Whatever actually produces sound. Runs on the audio thread.
pub trait AudioBackend: Send {
    fn handle(&mut self, command: AudioCommand) -> Result<()>;
}

/// Backend that only records commands in the log.
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn handle(&mut self, command: AudioCommand) -> Result<()> {
        match command {
            AudioCommand::PlaySoundtrack(index) => debug!("Soundtrack {index} started"),
            AudioCommand::PlayEffect(effect) => {
                debug!("Effect {} ({effect:?})", effect.index());
            }
            AudioCommand::SetVolumes { music, effects } => {
                debug!("Volumes set: music {music}, effects {effects}");
            }
            AudioCommand::Quit => {}
        }
        Ok(())
    }
}

// Fire-and-forget front end for the audio thread
pub struct AudioState {
    sender: Option<Sender<AudioCommand>>,
    handle: Option<JoinHandle<()>>,
    music_volume: u8,
    effects_volume: u8,
}

impl AudioState {
    pub fn new(backend: Box<dyn AudioBackend>) -> std::io::Result<Self> {
        let (sender, receiver) = bounded(64);

        let handle = thread::Builder::new()
            .name("audio".into())
            .spawn(move || {
                if let Err(e) = run_audio_thread(&receiver, backend) {
                    error!("Audio thread error: {e}");
                }
            })?;

        Ok(Self {
            sender: Some(sender),
            handle: Some(handle),
            music_volume: MAX_VOLUME,
            effects_volume: MAX_VOLUME,
        })
    }

    /// An audio front end with no thread behind it; every command is dropped.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            sender: None,
            handle: None,
            music_volume: 0,
            effects_volume: 0,
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.sender.is_some()
    }

    fn send(&self, command: AudioCommand) {
        if let Some(sender) = &self.sender {
            // A full channel drops the command rather than stalling gameplay
            if sender.try_send(command).is_err() {
                warn!("Audio command dropped: {command:?}");
            }
        }
    }

    pub fn play_effect(&self, effect: SoundEffect) {
        self.send(AudioCommand::PlayEffect(effect));
    }

    /// Returns false for an index outside the soundtrack bank.
    pub fn play_soundtrack(&self, index: u8) -> bool {
        if index >= SOUNDTRACKS_AMOUNT {
            return false;
        }
        self.send(AudioCommand::PlaySoundtrack(index));
        true
    }

    #[must_use]
    pub fn music_volume(&self) -> u8 {
        self.music_volume
    }

    #[must_use]
    pub fn effects_volume(&self) -> u8 {
        self.effects_volume
    }

    pub fn set_volumes(&mut self, music: u8, effects: u8) {
        self.music_volume = music.min(MAX_VOLUME);
        self.effects_volume = effects.min(MAX_VOLUME);
        self.send(AudioCommand::SetVolumes {
            music: self.music_volume,
            effects: self.effects_volume,
        });
    }

    pub fn shutdown(&mut self) {
        if let Some(sender) = self.sender.take() {
            let _ = sender.send(AudioCommand::Quit);
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("Audio thread panicked");
            }
        }
    }
}

impl Drop for AudioState {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_audio_thread(
    receiver: &Receiver<AudioCommand>,
    mut backend: Box<dyn AudioBackend>,
) -> Result<()> {
    // Keep the thread alive and process commands until told to stop
    while let Ok(command) = receiver.recv() {
        if command == AudioCommand::Quit {
            break;
        }
        backend.handle(command)?;
    }
    Ok(())
}
