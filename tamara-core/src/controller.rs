//! Top-level screen controller
//!
//! [`ScreenStateMachine`] owns the operator configuration, the firing
//! controller and the current screen. The firmware calls [`tick`] once per
//! loop iteration and hands the returned [`RedrawPlan`] plus a [`View`]
//! snapshot to the renderer.
//!
//! One tick is indivisible: aux contact edge, firing timer, at most one
//! touch command, redraw decision. Nothing in it blocks.
//!
//! [`tick`]: ScreenStateMachine::tick

use crate::config::FiringConfig;
use crate::firing::{FiringController, FiringReport};
use crate::input::{map_touch, AuxContact, ContactEdge};
use crate::safety::{SafetyStatus, TickMonitor};
use crate::state::{Event, Screen, UiCommand};
use crate::traits::{Channel, OutputDriver, TouchPoint};

/// What the renderer must repaint after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RedrawPlan {
    /// Screen was entered: clear the center area and draw it fully
    pub full: Option<Screen>,
    /// Output selection chips changed
    pub output_selection: bool,
    /// Duration value changed
    pub duration_value: bool,
    /// Progress bar and time remaining
    pub firing_progress: bool,
    /// Flash the rejected-touch indicator
    pub rejected_flash: bool,
}

impl RedrawPlan {
    /// Check if nothing needs repainting
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Firing state as seen by the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FiringView {
    pub channel: Channel,
    pub remaining_ms: u32,
    pub progress: f32,
}

/// Read-only snapshot handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct View {
    pub screen: Screen,
    pub duration_ms: u32,
    pub selected_output: Channel,
    pub firing: Option<FiringView>,
}

/// Application controller
pub struct ScreenStateMachine<O> {
    current: Screen,
    /// Last screen that was fully drawn; `None` until the first tick
    previous: Option<Screen>,
    config: FiringConfig,
    firing: FiringController<O>,
    aux: AuxContact,
    monitor: TickMonitor,
}

impl<O: OutputDriver> ScreenStateMachine<O> {
    /// Create the controller on the Home screen with default configuration
    ///
    /// Takes ownership of the output stage, which is driven LOW at once.
    pub fn new(outputs: O, tick_period_ms: u32) -> Self {
        Self {
            current: Screen::Home,
            previous: None,
            config: FiringConfig::new(),
            firing: FiringController::new(outputs),
            aux: AuxContact::new(),
            monitor: TickMonitor::new(tick_period_ms),
        }
    }

    /// Run one loop iteration
    ///
    /// `touch` is this tick's touch sample, `aux_pressed` the current
    /// level of the auxiliary contact.
    pub fn tick(
        &mut self,
        now_ms: u32,
        touch: Option<TouchPoint>,
        aux_pressed: bool,
    ) -> RedrawPlan {
        let mut plan = RedrawPlan::default();

        if let SafetyStatus::Fault(fault) = self.monitor.record_tick(now_ms) {
            if self.firing.is_active() {
                warn!("Late tick during firing: {}", fault);
            }
        }

        let aux_edge = self.aux.update(aux_pressed);
        if aux_edge == Some(ContactEdge::Pressed) && !self.current.aux_enabled() {
            debug!("Aux contact rejected on {}", self.current.name());
            plan.rejected_flash = true;
        }

        if let Some(report) = self.firing.tick(now_ms) {
            self.firing_finished(&report);
        }

        if self.current.accepts_touch() {
            if let Some(command) = touch.and_then(|point| map_touch(self.current, point)) {
                let partial = self.dispatch(command, now_ms);
                plan.output_selection |= partial.output_selection;
                plan.duration_value |= partial.duration_value;
                plan.rejected_flash |= partial.rejected_flash;
            }
        }

        if self.previous != Some(self.current) {
            debug!("Entering {}", self.current.name());
            self.previous = Some(self.current);
            plan.full = Some(self.current);
            // A full draw covers these
            plan.output_selection = false;
            plan.duration_value = false;
        }

        if self.current.redraws_every_tick() {
            plan.firing_progress = true;
        }

        plan
    }

    /// Apply one command to the current screen
    ///
    /// Commands that mean nothing on the current screen are ignored. The
    /// returned plan carries partial redraws only; screen entry is
    /// detected by [`tick`](Self::tick).
    pub fn dispatch(&mut self, command: UiCommand, now_ms: u32) -> RedrawPlan {
        let mut plan = RedrawPlan::default();

        match (self.current, command) {
            (Screen::Home, UiCommand::Navigate(Screen::DurationConfig)) => {}
            (Screen::DurationConfig, UiCommand::SelectOutput(channel)) => {
                self.config.select_output(channel);
                plan.output_selection = true;
            }
            (Screen::DurationConfig, UiCommand::IncrementDuration) => {
                self.config.increment();
                plan.duration_value = true;
            }
            (Screen::DurationConfig, UiCommand::DecrementDuration) => {
                self.config.decrement();
                plan.duration_value = true;
            }
            (Screen::DurationConfig, UiCommand::StartFiring) => {
                let channel = self.config.selected_output();
                let duration_ms = self.config.duration_ms();
                if let Err(e) = self.firing.start(channel, duration_ms, now_ms) {
                    warn!("Cannot fire: {}", e);
                    plan.rejected_flash = true;
                    return plan;
                }
            }
            _ => {
                trace!("Ignoring {} on {}", command, self.current.name());
                return plan;
            }
        }

        if command.is_config_edit() {
            debug!(
                "{} on {}: output {}, {} ms",
                command,
                self.current.name(),
                self.config.selected_output().number(),
                self.config.duration_ms()
            );
        } else {
            debug!("{} on {}", command, self.current.name());
        }

        let next = self.current.transition(Event::Command(command));
        if next != self.current {
            info!("{} -> {}", self.current.name(), next.name());
            self.current = next;
        }

        plan
    }

    fn firing_finished(&mut self, report: &FiringReport) {
        self.monitor.record_firing(report);

        let next = self.current.transition(Event::FiringFinished);
        if next != self.current {
            info!("{} -> {}", self.current.name(), next.name());
            self.current = next;
        }
    }

    /// Current screen
    pub fn screen(&self) -> Screen {
        self.current
    }

    /// Operator configuration
    pub fn config(&self) -> &FiringConfig {
        &self.config
    }

    /// Firing controller
    pub fn firing(&self) -> &FiringController<O> {
        &self.firing
    }

    /// Tick monitor
    pub fn safety(&self) -> &TickMonitor {
        &self.monitor
    }

    /// Snapshot for the renderer
    pub fn view(&self, now_ms: u32) -> View {
        View {
            screen: self.current,
            duration_ms: self.config.duration_ms(),
            selected_output: self.config.selected_output(),
            firing: self.firing.session().map(|session| FiringView {
                channel: session.channel,
                remaining_ms: self.firing.remaining(now_ms),
                progress: self.firing.progress(now_ms),
            }),
        }
    }
}
