//! Feedback cues for the presentation layer
//!
//! The core never plays sounds or vibrates; it queues `Cue` values that the
//! host turns into audio and haptics. Muted channels are filtered here so
//! every host honors the player's settings the same way.

use crate::settings::Settings;
use crate::sim::EntityKind;

/// How hard a contact should feel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpactStrength {
    Light,
    Medium,
    Heavy,
}

impl ImpactStrength {
    pub fn for_kind(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Obstacle => Self::Heavy,
            EntityKind::CosmicBonus => Self::Medium,
            EntityKind::Bonus | EntityKind::HealthBonus => Self::Light,
        }
    }
}

/// Feedback event types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    /// Actor touched an entity
    Impact(ImpactStrength),
    /// Side-challenge marked done
    ChallengeCompleted,
    /// Run terminated
    GameOver,
    /// Finalized run beat the previous best
    NewBest,
}

/// Output channel a cue is meant for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Sound,
    Haptics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cue {
    pub channel: Channel,
    pub feedback: Feedback,
}

/// Queues cues for the enabled channels
#[derive(Debug, Clone, Default)]
pub struct FeedbackRouter {
    sound: bool,
    haptics: bool,
    queue: Vec<Cue>,
}

impl FeedbackRouter {
    pub fn new(settings: &Settings) -> Self {
        let mut router = Self::default();
        router.apply(settings);
        router
    }

    /// Pick up changed sound/haptics toggles
    pub fn apply(&mut self, settings: &Settings) {
        self.sound = settings.sound_enabled;
        self.haptics = settings.haptics_enabled;
    }

    pub fn emit(&mut self, feedback: Feedback) {
        if self.sound {
            self.queue.push(Cue {
                channel: Channel::Sound,
                feedback,
            });
        }
        // Impacts only vibrate when they matter
        let vibrate = match feedback {
            Feedback::Impact(strength) => strength != ImpactStrength::Light,
            _ => true,
        };
        if self.haptics && vibrate {
            self.queue.push(Cue {
                channel: Channel::Haptics,
                feedback,
            });
        }
    }

    /// Take every queued cue, oldest first
    pub fn drain(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.queue)
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SettingOption;

    #[test]
    fn test_impact_strength_by_kind() {
        assert_eq!(
            ImpactStrength::for_kind(EntityKind::Obstacle),
            ImpactStrength::Heavy
        );
        assert_eq!(
            ImpactStrength::for_kind(EntityKind::CosmicBonus),
            ImpactStrength::Medium
        );
        assert_eq!(
            ImpactStrength::for_kind(EntityKind::Bonus),
            ImpactStrength::Light
        );
    }

    #[test]
    fn test_both_channels_by_default() {
        let mut router = FeedbackRouter::new(&Settings::default());
        router.emit(Feedback::GameOver);
        let cues = router.drain();
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0].channel, Channel::Sound);
        assert_eq!(cues[1].channel, Channel::Haptics);
        assert_eq!(router.pending(), 0);
    }

    #[test]
    fn test_light_impacts_skip_haptics() {
        let mut router = FeedbackRouter::new(&Settings::default());
        router.emit(Feedback::Impact(ImpactStrength::Light));
        let cues = router.drain();
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].channel, Channel::Sound);
    }

    #[test]
    fn test_disabled_channels_are_filtered() {
        let mut settings = Settings::default();
        settings.set_option(SettingOption::Sound(false));
        let mut router = FeedbackRouter::new(&settings);
        router.emit(Feedback::NewBest);
        assert_eq!(
            router.drain(),
            vec![Cue {
                channel: Channel::Haptics,
                feedback: Feedback::NewBest
            }]
        );

        settings.set_option(SettingOption::Haptics(false));
        router.apply(&settings);
        router.emit(Feedback::ChallengeCompleted);
        assert!(router.drain().is_empty());
    }
}
