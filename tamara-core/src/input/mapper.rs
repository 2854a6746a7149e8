//! Touch hit-region mapping
//!
//! Stateless: the same screen and point always give the same command.
//! Regions are tested in a fixed priority order and the first match
//! wins. The regions of each screen are disjoint, so the order only
//! matters if the layout is changed.

use crate::layout::{
    HitRegion, HIT_CONFIGURE, HIT_DECREMENT, HIT_FIRE, HIT_INCREMENT, HIT_OUTPUT1, HIT_OUTPUT2,
};
use crate::state::{Screen, UiCommand};
use crate::traits::{Channel, TouchPoint};

/// Home screen regions, in priority order
const HOME_REGIONS: &[(HitRegion, UiCommand)] =
    &[(HIT_CONFIGURE, UiCommand::Navigate(Screen::DurationConfig))];

/// DurationConfig regions, in priority order
const CONFIG_REGIONS: &[(HitRegion, UiCommand)] = &[
    (HIT_OUTPUT1, UiCommand::SelectOutput(Channel::One)),
    (HIT_OUTPUT2, UiCommand::SelectOutput(Channel::Two)),
    (HIT_DECREMENT, UiCommand::DecrementDuration),
    (HIT_INCREMENT, UiCommand::IncrementDuration),
    (HIT_FIRE, UiCommand::StartFiring),
];

/// Hit-regions active on a screen, in priority order
pub fn regions(screen: Screen) -> &'static [(HitRegion, UiCommand)] {
    match screen {
        Screen::Home => HOME_REGIONS,
        Screen::DurationConfig => CONFIG_REGIONS,
        Screen::Firing => &[],
    }
}

/// Map a touch on the given screen to a command
///
/// Returns `None` if the point misses every region. A miss is not an
/// error.
pub fn map_touch(screen: Screen, point: TouchPoint) -> Option<UiCommand> {
    regions(screen)
        .iter()
        .find(|(region, _)| region.contains(point))
        .map(|(_, command)| *command)
}
