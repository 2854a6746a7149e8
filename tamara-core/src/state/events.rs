//! Events that trigger screen transitions

use super::screen::Screen;
use crate::traits::Channel;

/// Commands produced by mapping a touch against the current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UiCommand {
    /// Move to another screen
    Navigate(Screen),
    /// Choose the output to fire
    SelectOutput(Channel),
    /// Lengthen the duration by one step
    IncrementDuration,
    /// Shorten the duration by one step
    DecrementDuration,
    /// Energize the selected output
    StartFiring,
}

impl UiCommand {
    /// Check if this command edits the firing configuration
    pub fn is_config_edit(&self) -> bool {
        matches!(
            self,
            UiCommand::SelectOutput(_)
                | UiCommand::IncrementDuration
                | UiCommand::DecrementDuration
        )
    }
}

/// Events that can trigger screen transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Operator touched a hit-region
    Command(UiCommand),
    /// The firing session ended (timer expiry or stop)
    FiringFinished,
}

impl From<UiCommand> for Event {
    fn from(command: UiCommand) -> Self {
        Event::Command(command)
    }
}
