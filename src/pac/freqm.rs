//! Frequency Meter (FREQM) register block.

use super::generic::{Reg, Synchronize, reg_bit, reg_field, register};

register! {
    /// Control A (CTRLA).
    Ctrla: u8
}

impl Ctrla {
    reg_bit! {
        /// Software reset.
        u8, swrst, set_swrst, 0
    }
    reg_bit! {
        /// Peripheral enable.
        u8, enable, set_enable, 1
    }
}

register! {
    /// Control B (CTRLB).
    Ctrlb: u8
}

impl Ctrlb {
    reg_bit! {
        /// Start a measurement.
        u8, start, set_start, 0
    }
}

register! {
    /// Configuration A (CFGA).
    Cfga: u16
}

impl Cfga {
    reg_field! {
        /// Number of reference clock cycles in the measurement window.
        u16, refnum, set_refnum, 0, 8
    }
}

register! {
    /// Interrupt flag layout shared by INTENCLR, INTENSET and INTFLAG.
    IntFlags: u8
}

impl IntFlags {
    reg_bit! {
        /// Measurement done.
        u8, done, set_done, 0
    }
}

register! {
    /// Status (STATUS).
    Status: u8
}

impl Status {
    reg_bit! {
        /// A measurement is in progress.
        u8, busy, set_busy, 0
    }
    reg_bit! {
        /// The measurement counter overflowed.
        u8, ovf, set_ovf, 1
    }
}

register! {
    /// Synchronization busy (SYNCBUSY).
    Syncbusy: u32
}

impl Syncbusy {
    /// Software reset synchronization.
    pub const SWRST: Self = Self(1 << 0);
    /// Enable bit synchronization.
    pub const ENABLE: Self = Self(1 << 1);
}

register! {
    /// Measurement value (VALUE).
    Value: u32
}

impl Value {
    reg_field! {
        /// Number of measured clock edges in the window.
        u32, value, set_value, 0, 24
    }
}

/// FREQM register block.
#[repr(C)]
pub struct RegisterBlock {
    /// Control A.
    pub ctrla: Reg<Ctrla>,
    /// Control B.
    pub ctrlb: Reg<Ctrlb>,
    /// Configuration A.
    pub cfga: Reg<Cfga>,
    _reserved0: [u8; 4],
    /// Interrupt enable clear.
    pub intenclr: Reg<IntFlags>,
    /// Interrupt enable set.
    pub intenset: Reg<IntFlags>,
    /// Interrupt flag status and clear.
    pub intflag: Reg<IntFlags>,
    /// Status.
    pub status: Reg<Status>,
    /// Synchronization busy.
    pub syncbusy: Reg<Syncbusy>,
    /// Measurement value.
    pub value: Reg<Value>,
}

impl RegisterBlock {
    /// Creates a register block with every register at its reset value.
    ///
    /// Driver code on hardware obtains the block through
    /// [`crate::pac::FREQM`]; a block in plain memory lets the drivers run
    /// without the peripheral, as the test suite does.
    pub const fn new() -> Self {
        Self {
            ctrla: Reg::new(Ctrla(0)),
            ctrlb: Reg::new(Ctrlb(0)),
            cfga: Reg::new(Cfga(0)),
            _reserved0: [0; 4],
            intenclr: Reg::new(IntFlags(0)),
            intenset: Reg::new(IntFlags(0)),
            intflag: Reg::new(IntFlags(0)),
            status: Reg::new(Status(0)),
            syncbusy: Reg::new(Syncbusy(0)),
            value: Reg::new(Value(0)),
        }
    }
}

impl Default for RegisterBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl Synchronize for RegisterBlock {
    type Mask = Syncbusy;

    #[inline]
    fn is_syncing(&self, mask: Syncbusy) -> bool {
        self.syncbusy.read().bits() & mask.bits() != 0
    }
}
