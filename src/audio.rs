//! Sound cue routing
//!
//! The simulation emits cues; this layer picks channels and volumes and
//! hands them to a fire-and-forget backend. Device playback is someone
//! else's problem.

use crate::settings::Settings;
use crate::sim::enemy::EnemyClass;

/// Everything the game can ask to hear
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Menu click
    Click,
    /// Player shot, by bullet tier
    PlayerBullet(u8),
    PlayerHit,
    PlayerDeath,
    /// Enemy shot, by archetype
    EnemyBullet(EnemyClass),
    EnemyDeath,
    /// Extra-score pickup collected
    ExtraScore,
    /// Power-up pickup collected
    PowerUp,
    GameCleared,
}

/// Reserved mixer channels; rapid-fire cues each get their own so they
/// interrupt themselves instead of exhausting the free pool
pub const CHANNEL_ENEMY_DEATH: usize = 0;
pub const CHANNEL_PARASITE_BULLET: usize = 1;
pub const CHANNEL_FLOODER_BULLET: usize = 2;
pub const CHANNEL_BEAST_BULLET: usize = 3;

/// Playback device abstraction. Calls never block and never fail upward.
pub trait AudioBackend {
    /// Play a cue, on a reserved channel when one is given
    fn play(&mut self, cue: SoundCue, channel: Option<usize>, volume: f32);
    /// Start or stop the background music loop
    fn set_music(&mut self, on: bool, volume: f32);
}

/// Backend that discards everything; used headless and in tests
#[derive(Debug, Default)]
pub struct NullBackend;

impl AudioBackend for NullBackend {
    fn play(&mut self, _cue: SoundCue, _channel: Option<usize>, _volume: f32) {}
    fn set_music(&mut self, _on: bool, _volume: f32) {}
}

/// Backend that logs cues instead of playing them
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play(&mut self, cue: SoundCue, channel: Option<usize>, volume: f32) {
        log::trace!("cue {cue:?} channel={channel:?} vol={volume:.2}");
    }

    fn set_music(&mut self, on: bool, volume: f32) {
        log::debug!("music {} vol={volume:.2}", if on { "on" } else { "off" });
    }
}

/// Routes cues to the backend with channel and volume applied
pub struct AudioMixer {
    backend: Box<dyn AudioBackend>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl AudioMixer {
    pub fn new(backend: Box<dyn AudioBackend>, settings: &Settings) -> Self {
        Self {
            backend,
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            music_volume: settings.music_volume.clamp(0.0, 1.0),
            muted: settings.muted,
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a cue on its designated channel
    pub fn play(&mut self, cue: SoundCue) {
        let volume = self.effective_volume();
        if volume <= 0.0 {
            return;
        }
        self.backend.play(cue, Self::route(cue), volume);
    }

    pub fn music(&mut self, on: bool) {
        let volume = if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        };
        self.backend.set_music(on, volume);
    }

    /// Channel assignment. Asking for a bullet cue of an archetype that
    /// never fires is a dispatch bug, not a playable sound.
    fn route(cue: SoundCue) -> Option<usize> {
        match cue {
            SoundCue::EnemyDeath => Some(CHANNEL_ENEMY_DEATH),
            SoundCue::EnemyBullet(EnemyClass::Parasite) => Some(CHANNEL_PARASITE_BULLET),
            SoundCue::EnemyBullet(EnemyClass::FlooderDown) => Some(CHANNEL_FLOODER_BULLET),
            SoundCue::EnemyBullet(EnemyClass::Beast) => Some(CHANNEL_BEAST_BULLET),
            SoundCue::EnemyBullet(EnemyClass::Gear) => None,
            SoundCue::EnemyBullet(EnemyClass::FlooderU) => {
                unreachable!("flooder-u never fires, it has no bullet cue")
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorder {
        played: Rc<RefCell<Vec<(SoundCue, Option<usize>)>>>,
    }

    impl AudioBackend for Recorder {
        fn play(&mut self, cue: SoundCue, channel: Option<usize>, _volume: f32) {
            self.played.borrow_mut().push((cue, channel));
        }
        fn set_music(&mut self, _on: bool, _volume: f32) {}
    }

    fn mixer_with_recorder() -> (AudioMixer, Rc<RefCell<Vec<(SoundCue, Option<usize>)>>>) {
        let recorder = Recorder::default();
        let played = recorder.played.clone();
        let mixer = AudioMixer::new(Box::new(recorder), &Settings::default());
        (mixer, played)
    }

    #[test]
    fn firing_archetypes_get_their_reserved_channels() {
        let (mut mixer, played) = mixer_with_recorder();
        mixer.play(SoundCue::EnemyDeath);
        mixer.play(SoundCue::EnemyBullet(EnemyClass::Parasite));
        mixer.play(SoundCue::EnemyBullet(EnemyClass::FlooderDown));
        mixer.play(SoundCue::EnemyBullet(EnemyClass::Beast));
        mixer.play(SoundCue::EnemyBullet(EnemyClass::Gear));
        mixer.play(SoundCue::PlayerBullet(0));
        let played = played.borrow();
        let channels: Vec<Option<usize>> = played.iter().map(|(_, c)| *c).collect();
        assert_eq!(
            channels,
            vec![
                Some(CHANNEL_ENEMY_DEATH),
                Some(CHANNEL_PARASITE_BULLET),
                Some(CHANNEL_FLOODER_BULLET),
                Some(CHANNEL_BEAST_BULLET),
                None,
                None,
            ]
        );
    }

    #[test]
    fn beast_and_flooder_share_nothing() {
        assert_ne!(CHANNEL_BEAST_BULLET, CHANNEL_FLOODER_BULLET);
    }

    #[test]
    fn muted_mixer_stays_silent() {
        let (mut mixer, played) = mixer_with_recorder();
        mixer.set_muted(true);
        mixer.play(SoundCue::Click);
        assert!(played.borrow().is_empty());
    }

    #[test]
    #[should_panic(expected = "never fires")]
    fn flooder_u_bullet_cue_is_a_dispatch_bug() {
        let (mut mixer, _) = mixer_with_recorder();
        mixer.play(SoundCue::EnemyBullet(EnemyClass::FlooderU));
    }
}
