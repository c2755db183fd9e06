//! Controller capability and the standard 8-button implementation.

use famibus_support::bits::bit_is_set;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// NES controller buttons, one bit each.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Button {
    /// A button.
    A = 0b0000_0001,
    /// B button.
    B = 0b0000_0010,
    /// Select button.
    Select = 0b0000_0100,
    /// Start button.
    Start = 0b0000_1000,
    /// D-pad up.
    Up = 0b0001_0000,
    /// D-pad down.
    Down = 0b0010_0000,
    /// D-pad left.
    Left = 0b0100_0000,
    /// D-pad right.
    Right = 0b1000_0000,
}

/// Port-visible controller state, for save states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PortState {
    /// Live button bits.
    pub buttons: u8,
    /// Latched snapshot being shifted out.
    pub latched: u8,
    /// Next bit index to shift out.
    pub index: u8,
    /// Strobe line level.
    pub strobe: bool,
    /// Whether anything is plugged into the port.
    pub active: bool,
}

/// What the CPU bus needs from a controller port.
///
/// Implemented by the headless [`StandardController`] and by host
/// front ends that bind keyboards or gamepads.
pub trait Controller {
    /// Refresh input, called once per frame by the driver.
    fn update(&mut self);

    /// Serial read: bit 0 carries the next button state.
    fn read_bit(&mut self) -> u8;

    /// Strobe write; bit 0 of `value` is the strobe level.
    fn set_strobe(&mut self, value: u8);

    /// Push live button states into the port.
    ///
    /// Front ends that poll their own device in [`Controller::update`]
    /// can ignore this; the default does nothing.
    fn set_buttons(&mut self, buttons: u8) {
        let _ = buttons;
    }

    /// Snapshot the port-visible state.
    fn snapshot(&self) -> PortState;

    /// Restore a snapshot.
    fn restore(&mut self, state: PortState);
}

/// Headless standard controller: the host pushes button states in.
#[derive(Debug, Clone)]
pub struct StandardController {
    buttons: u8,
    latched: u8,
    index: u8,
    strobe: bool,
    active: bool,
}

impl StandardController {
    /// A connected controller with no buttons held.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buttons: 0,
            latched: 0,
            index: 0,
            strobe: false,
            active: true,
        }
    }

    /// An empty port; all reads return 0.
    #[must_use]
    pub const fn unplugged() -> Self {
        Self {
            buttons: 0,
            latched: 0,
            index: 0,
            strobe: false,
            active: false,
        }
    }

    /// Press or release one button.
    pub fn set_button(&mut self, button: Button, pressed: bool) {
        if pressed {
            self.buttons |= button as u8;
        } else {
            self.buttons &= !(button as u8);
        }
    }

    /// Current live button bits.
    #[must_use]
    pub const fn buttons(&self) -> u8 {
        self.buttons
    }
}

impl Default for StandardController {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller for StandardController {
    fn update(&mut self) {
        // Headless: buttons arrive via set_buttons
    }

    fn read_bit(&mut self) -> u8 {
        if !self.active {
            return 0;
        }
        if self.strobe {
            // Continuous reload: always the live A button
            return self.buttons & 0x01;
        }
        if self.index < 8 {
            let bit = u8::from(bit_is_set(self.latched, self.index));
            self.index += 1;
            bit
        } else {
            // Shifted past the last button
            1
        }
    }

    fn set_strobe(&mut self, value: u8) {
        let level = bit_is_set(value, 0);
        if self.strobe && !level {
            // Falling edge: freeze the live states for read-out
            self.latched = self.buttons;
            self.index = 0;
        }
        self.strobe = level;
    }

    fn set_buttons(&mut self, buttons: u8) {
        self.buttons = buttons;
    }

    fn snapshot(&self) -> PortState {
        PortState {
            buttons: self.buttons,
            latched: self.latched,
            index: self.index,
            strobe: self.strobe,
            active: self.active,
        }
    }

    fn restore(&mut self, state: PortState) {
        self.buttons = state.buttons;
        self.latched = state.latched;
        self.index = state.index;
        self.strobe = state.strobe;
        self.active = state.active;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strobe_pulse(controller: &mut StandardController) {
        controller.set_strobe(1);
        controller.set_strobe(0);
    }

    #[test]
    fn test_serial_read_order() {
        let mut controller = StandardController::new();
        controller.set_button(Button::A, true);
        controller.set_button(Button::Select, true);
        controller.set_button(Button::Down, true);
        controller.set_button(Button::Right, true);

        strobe_pulse(&mut controller);

        let bits: Vec<u8> = (0..8).map(|_| controller.read_bit()).collect();
        assert_eq!(bits, [1, 0, 1, 0, 0, 1, 0, 1]);
    }

    #[test]
    fn test_reads_past_eight_return_one() {
        let mut controller = StandardController::new();
        strobe_pulse(&mut controller);

        for _ in 0..8 {
            assert_eq!(controller.read_bit(), 0);
        }
        assert_eq!(controller.read_bit(), 1);
        assert_eq!(controller.read_bit(), 1);
    }

    #[test]
    fn test_strobe_high_returns_live_a() {
        let mut controller = StandardController::new();
        controller.set_strobe(1);

        assert_eq!(controller.read_bit(), 0);
        controller.set_button(Button::A, true);
        assert_eq!(controller.read_bit(), 1);
        assert_eq!(controller.read_bit(), 1); // no shifting while strobed
    }

    #[test]
    fn test_latch_freezes_on_falling_edge() {
        let mut controller = StandardController::new();
        controller.set_button(Button::A, true);
        strobe_pulse(&mut controller);

        // Releasing after the latch does not affect the read-out
        controller.set_button(Button::A, false);
        assert_eq!(controller.read_bit(), 1);
    }

    #[test]
    fn test_unplugged_port_reads_zero() {
        let mut controller = StandardController::unplugged();
        strobe_pulse(&mut controller);
        for _ in 0..16 {
            assert_eq!(controller.read_bit(), 0);
        }
    }

    #[test]
    fn test_snapshot_restore() {
        let mut controller = StandardController::new();
        controller.set_button(Button::Start, true);
        strobe_pulse(&mut controller);
        controller.read_bit();

        let state = controller.snapshot();
        let mut other = StandardController::new();
        other.restore(state);

        // Both continue the read-out identically
        let rest: Vec<u8> = (0..7).map(|_| controller.read_bit()).collect();
        let other_rest: Vec<u8> = (0..7).map(|_| other.read_bit()).collect();
        assert_eq!(rest, other_rest);
    }
}
