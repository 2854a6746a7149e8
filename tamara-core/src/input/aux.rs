//! Auxiliary contact edge detection
//!
//! The contact is sampled once per tick. Only transitions are reported,
//! so a held contact produces a single press edge.

/// Debounced contact state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ContactState {
    #[default]
    Released,
    Pressed,
}

/// Transition between two consecutive samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ContactEdge {
    Pressed,
    Released,
}

/// Edge detector for the auxiliary contact
#[derive(Debug, Clone, Default)]
pub struct AuxContact {
    state: ContactState,
}

impl AuxContact {
    /// Create a detector in the released state
    pub const fn new() -> Self {
        Self {
            state: ContactState::Released,
        }
    }

    /// Feed one sample
    ///
    /// Returns the edge if the state changed since the previous sample.
    pub fn update(&mut self, pressed: bool) -> Option<ContactEdge> {
        let new_state = if pressed {
            ContactState::Pressed
        } else {
            ContactState::Released
        };

        if new_state == self.state {
            return None;
        }

        self.state = new_state;
        Some(match new_state {
            ContactState::Pressed => ContactEdge::Pressed,
            ContactState::Released => ContactEdge::Released,
        })
    }
}
