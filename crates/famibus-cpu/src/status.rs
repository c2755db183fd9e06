//! 6502 status register.

use bitflags::bitflags;

bitflags! {
    /// Processor status flags.
    ///
    /// ```text
    /// 7  bit  0
    /// ---- ----
    /// NV1B DIZC
    /// |||| ||||
    /// |||| |||+- Carry
    /// |||| ||+-- Zero
    /// |||| |+--- Interrupt disable
    /// |||| +---- Decimal (latched but ignored by the 2A03 ALU)
    /// |||+------ Break (only exists on pushed copies)
    /// ||+------- Unused, reads as 1
    /// |+-------- Overflow
    /// +--------- Negative
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Status: u8 {
        /// Carry flag.
        const C = 0b0000_0001;
        /// Zero flag.
        const Z = 0b0000_0010;
        /// Interrupt-disable flag.
        const I = 0b0000_0100;
        /// Decimal flag (no effect on the NES CPU).
        const D = 0b0000_1000;
        /// Break flag, set on the copy pushed by BRK/PHP.
        const B = 0b0001_0000;
        /// Unused bit, always set.
        const U = 0b0010_0000;
        /// Overflow flag.
        const V = 0b0100_0000;
        /// Negative flag.
        const N = 0b1000_0000;
    }
}

impl Status {
    /// Power-on state: interrupts disabled, unused bit set.
    #[must_use]
    pub const fn power_on() -> Self {
        Self::I.union(Self::U)
    }

    /// Set Z and N from a result byte.
    #[inline]
    pub fn set_zn(&mut self, value: u8) {
        self.set(Self::Z, value == 0);
        self.set(Self::N, value & 0x80 != 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_on() {
        let status = Status::power_on();
        assert!(status.contains(Status::I));
        assert!(status.contains(Status::U));
        assert!(!status.contains(Status::C));
    }

    #[test]
    fn test_set_zn() {
        let mut status = Status::empty();

        status.set_zn(0);
        assert!(status.contains(Status::Z));
        assert!(!status.contains(Status::N));

        status.set_zn(0x80);
        assert!(!status.contains(Status::Z));
        assert!(status.contains(Status::N));

        status.set_zn(0x01);
        assert!(!status.contains(Status::Z));
        assert!(!status.contains(Status::N));
    }
}
