//! Player settings and preferences
//!
//! Persisted separately from the session record. Every change goes through
//! `Settings::set_option`, which returns the follow-up action the host must
//! perform (e.g. rescheduling the daily reminder) instead of firing it
//! behind the caller's back.

use serde::{Deserialize, Serialize};

/// Time of day for the daily reminder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderTime {
    pub hour: u8,
    pub minute: u8,
}

impl Default for ReminderTime {
    fn default() -> Self {
        Self { hour: 9, minute: 0 }
    }
}

impl ReminderTime {
    /// Clamp into a valid wall-clock time
    pub fn clamped(self) -> Self {
        Self {
            hour: self.hour.min(23),
            minute: self.minute.min(59),
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Feedback ===
    /// Sound cues for impacts and events
    pub sound_enabled: bool,
    /// Vibration for impacts and events
    pub haptics_enabled: bool,

    // === Gameplay ===
    /// Offer side-challenges during runs
    pub challenges_enabled: bool,
    /// Show the stats panel on the menu
    pub show_performance_stats: bool,

    // === Reminders ===
    pub notifications_enabled: bool,
    pub reminder_time: ReminderTime,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            haptics_enabled: true,
            challenges_enabled: true,
            show_performance_stats: true,
            notifications_enabled: false,
            reminder_time: ReminderTime::default(),
        }
    }
}

/// A single settings change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingOption {
    Sound(bool),
    Haptics(bool),
    Challenges(bool),
    PerformanceStats(bool),
    Notifications(bool),
    ReminderTime(ReminderTime),
}

/// Work the host must do after a settings change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingEffect {
    None,
    /// (Re)schedule the daily reminder at this time
    ScheduleReminder(ReminderTime),
    /// Remove any scheduled reminder
    CancelReminder,
}

impl Settings {
    /// Apply one change and report the derived action
    pub fn set_option(&mut self, option: SettingOption) -> SettingEffect {
        match option {
            SettingOption::Sound(on) => self.sound_enabled = on,
            SettingOption::Haptics(on) => self.haptics_enabled = on,
            SettingOption::Challenges(on) => self.challenges_enabled = on,
            SettingOption::PerformanceStats(on) => self.show_performance_stats = on,
            SettingOption::Notifications(on) => {
                self.notifications_enabled = on;
                return if on {
                    SettingEffect::ScheduleReminder(self.reminder_time)
                } else {
                    SettingEffect::CancelReminder
                };
            }
            SettingOption::ReminderTime(time) => {
                self.reminder_time = time.clamped();
                if self.notifications_enabled {
                    return SettingEffect::ScheduleReminder(self.reminder_time);
                }
            }
        }
        SettingEffect::None
    }

    /// Whether any feedback channel is on
    pub fn feedback_enabled(&self) -> bool {
        self.sound_enabled || self.haptics_enabled
    }
}
