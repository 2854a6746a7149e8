//! Screen definition
//!
//! All touch handling and redraw behavior is a function of the current
//! screen and an event.

use super::events::{Event, UiCommand};

/// UI screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    /// Status overview with the CONFIGURE button
    Home,
    /// Output selection, duration adjustment, FIRE
    DurationConfig,
    /// Output energized; touch ignored until the timer expires
    Firing,
}

impl Screen {
    /// Human-readable screen name
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Home => "HOME",
            Screen::DurationConfig => "DURATION_CONFIG",
            Screen::Firing => "FIRING",
        }
    }

    /// Check if touches are interpreted on this screen
    ///
    /// Firing cannot be interrupted by touch, only by timer expiry.
    pub fn accepts_touch(&self) -> bool {
        !matches!(self, Screen::Firing)
    }

    /// Check if the auxiliary contact is live on this screen
    pub fn aux_enabled(&self) -> bool {
        matches!(self, Screen::DurationConfig)
    }

    /// Check if this screen repaints on every tick
    pub fn redraws_every_tick(&self) -> bool {
        matches!(self, Screen::Firing)
    }

    /// Process an event and return the next screen
    ///
    /// This is the core transition logic. Side effects (config mutation,
    /// starting the output) belong to the controller.
    pub fn transition(self, event: Event) -> Self {
        use Screen::*;
        use UiCommand::*;

        match (self, event) {
            // Home transitions
            (Home, Event::Command(Navigate(DurationConfig))) => DurationConfig,

            // DurationConfig transitions
            (DurationConfig, Event::Command(SelectOutput(_))) => DurationConfig,
            (DurationConfig, Event::Command(IncrementDuration)) => DurationConfig,
            (DurationConfig, Event::Command(DecrementDuration)) => DurationConfig,
            (DurationConfig, Event::Command(StartFiring)) => Firing,

            // Firing transitions
            (Firing, Event::FiringFinished) => DurationConfig,

            // Default: stay on current screen
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Channel;

    #[test]
    fn test_home_to_config() {
        let next = Screen::Home.transition(Event::Command(UiCommand::Navigate(
            Screen::DurationConfig,
        )));
        assert_eq!(next, Screen::DurationConfig);
    }

    #[test]
    fn test_config_edits_stay() {
        let commands = [
            UiCommand::SelectOutput(Channel::Two),
            UiCommand::IncrementDuration,
            UiCommand::DecrementDuration,
        ];

        for command in commands {
            let next = Screen::DurationConfig.transition(Event::Command(command));
            assert_eq!(next, Screen::DurationConfig);
        }
    }

    #[test]
    fn test_firing_flow() {
        let firing = Screen::DurationConfig.transition(Event::Command(UiCommand::StartFiring));
        assert_eq!(firing, Screen::Firing);

        let done = firing.transition(Event::FiringFinished);
        assert_eq!(done, Screen::DurationConfig);
    }

    #[test]
    fn test_firing_ignores_commands() {
        let commands = [
            UiCommand::StartFiring,
            UiCommand::IncrementDuration,
            UiCommand::Navigate(Screen::Home),
            UiCommand::SelectOutput(Channel::One),
        ];

        for command in commands {
            assert_eq!(
                Screen::Firing.transition(Event::Command(command)),
                Screen::Firing
            );
        }
    }

    #[test]
    fn test_unlisted_pairs_stay() {
        assert_eq!(
            Screen::Home.transition(Event::Command(UiCommand::StartFiring)),
            Screen::Home
        );
        assert_eq!(Screen::Home.transition(Event::FiringFinished), Screen::Home);
        assert_eq!(
            Screen::DurationConfig.transition(Event::FiringFinished),
            Screen::DurationConfig
        );
    }

    #[test]
    fn test_screen_flags() {
        assert!(Screen::Home.accepts_touch());
        assert!(Screen::DurationConfig.accepts_touch());
        assert!(!Screen::Firing.accepts_touch());

        assert!(Screen::DurationConfig.aux_enabled());
        assert!(!Screen::Home.aux_enabled());
        assert!(!Screen::Firing.aux_enabled());

        assert!(Screen::Firing.redraws_every_tick());
        assert!(!Screen::Home.redraws_every_tick());
    }
}
