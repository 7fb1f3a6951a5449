#![cfg(test)]

use crate::components::TileShape;
use crate::game::SOUND_EFFECT_AMOUNT;
use crate::input::Action;
use crate::sound::{AudioCommand, AudioState, SoundEffect};
use crate::systems::apply_action;
use crate::tests::test_utils::{RecordingBackend, started_session};

#[test]
fn test_effect_bank_indices() {
    assert_eq!(SoundEffect::ALL.len(), SOUND_EFFECT_AMOUNT);
    for (i, effect) in SoundEffect::ALL.iter().enumerate() {
        assert_eq!(effect.index(), i);
    }
}

#[test]
fn test_disabled_audio_keeps_volumes() {
    let mut audio = AudioState::disabled();
    assert!(!audio.is_enabled());

    audio.set_volumes(200, 64);
    assert_eq!(audio.music_volume(), 128);
    assert_eq!(audio.effects_volume(), 64);
    assert!(audio.play_soundtrack(2));
    assert!(!audio.play_soundtrack(3));
}

#[test]
fn test_commands_reach_the_backend_in_order() {
    let backend = RecordingBackend::default();
    let commands = backend.commands.clone();

    let mut audio = AudioState::new(Box::new(backend)).unwrap();
    assert!(audio.is_enabled());
    audio.play_soundtrack(1);
    audio.play_effect(SoundEffect::Lock);
    audio.set_volumes(10, 20);
    // Joining the audio thread drains the channel
    audio.shutdown();

    assert_eq!(
        *commands.lock().unwrap(),
        vec![
            AudioCommand::PlaySoundtrack(1),
            AudioCommand::PlayEffect(SoundEffect::Lock),
            AudioCommand::SetVolumes {
                music: 10,
                effects: 20
            },
        ]
    );
}

#[test]
fn test_gameplay_triggers_effects() {
    let backend = RecordingBackend::default();
    let commands = backend.commands.clone();
    let mut audio = AudioState::new(Box::new(backend)).unwrap();
    let mut session = started_session(&[TileShape::Bar]);

    apply_action(&mut session, Action::MoveLeft, &audio).unwrap();
    apply_action(&mut session, Action::DropHard, &audio).unwrap();
    audio.shutdown();

    assert_eq!(
        *commands.lock().unwrap(),
        vec![
            AudioCommand::PlayEffect(SoundEffect::MoveLeft),
            AudioCommand::PlayEffect(SoundEffect::HardDrop),
            AudioCommand::PlayEffect(SoundEffect::Lock),
        ]
    );
}
