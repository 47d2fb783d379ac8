//! Position Decoder (PDEC) register block.

use super::generic::{Reg, Synchronize, reg_bit, reg_field, register};

register! {
    /// Control A (CTRLA).
    Ctrla: u32
}

impl Ctrla {
    reg_bit! {
        /// Software reset.
        u32, swrst, set_swrst, 0
    }
    reg_bit! {
        /// Peripheral enable.
        u32, enable, set_enable, 1
    }
    reg_field! {
        /// Operation mode (quadrature decoder, hall, counter).
        u32, mode, set_mode, 2, 2
    }
    reg_bit! {
        /// Keep counting in standby sleep mode.
        u32, runstdby, set_runstdby, 6
    }
    reg_field! {
        /// Decoder configuration preset.
        u32, conf, set_conf, 8, 3
    }
    reg_bit! {
        /// Auto-lock the double-buffered registers.
        u32, alock, set_alock, 11
    }
    reg_bit! {
        /// Swap the phase A and phase B inputs.
        u32, swap, set_swap, 14
    }
    reg_bit! {
        /// Period (angular counter) enable.
        u32, peren, set_peren, 15
    }
    reg_bit! {
        /// Phase A pin enable.
        u32, pinen0, set_pinen0, 16
    }
    reg_bit! {
        /// Phase B pin enable.
        u32, pinen1, set_pinen1, 17
    }
    reg_bit! {
        /// Index pin enable.
        u32, pinen2, set_pinen2, 18
    }
    reg_bit! {
        /// Invert the phase A input.
        u32, pinven0, set_pinven0, 20
    }
    reg_bit! {
        /// Invert the phase B input.
        u32, pinven1, set_pinven1, 21
    }
    reg_bit! {
        /// Invert the index input.
        u32, pinven2, set_pinven2, 22
    }
    reg_field! {
        /// Angular counter width.
        u32, angular, set_angular, 24, 3
    }
    reg_field! {
        /// Maximum consecutive missing index pulses.
        u32, maxcmp, set_maxcmp, 28, 4
    }
}

/// Counter commands issued through CTRLBSET.CMD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// No command.
    None      = 0x0,
    /// Retrigger the counter.
    Retrigger = 0x1,
    /// Force an update of the double-buffered registers.
    Update    = 0x2,
    /// Synchronize COUNT for a read.
    ReadSync  = 0x3,
    /// Start the counter.
    Start     = 0x4,
    /// Stop the counter.
    Stop      = 0x5,
}

register! {
    /// Control B set (CTRLBSET).
    Ctrlbset: u8
}

impl Ctrlbset {
    reg_bit! {
        /// Lock update of the double-buffered registers.
        u8, lupd, set_lupd, 1
    }
    reg_field! {
        /// Command field, raw.
        u8, cmd, set_cmd_raw, 5, 3
    }

    /// Issues a counter command.
    #[inline]
    pub fn set_cmd(&mut self, command: Command) {
        self.set_cmd_raw(command as u8);
    }
}

register! {
    /// Control B clear (CTRLBCLR).
    Ctrlbclr: u8
}

register! {
    /// Event control (EVCTRL).
    Evctrl: u16
}

impl Evctrl {
    reg_field! {
        /// Event action.
        u16, evact, set_evact, 0, 2
    }
    reg_field! {
        /// Invert event inputs.
        u16, evinv, set_evinv, 2, 3
    }
    reg_field! {
        /// Event input enables.
        u16, evei, set_evei, 5, 3
    }
    reg_bit! {
        /// Overflow/underflow event output.
        u16, ovfeo, set_ovfeo, 8
    }
    reg_bit! {
        /// Error event output.
        u16, erreo, set_erreo, 9
    }
    reg_bit! {
        /// Direction-change event output.
        u16, direo, set_direo, 10
    }
    reg_bit! {
        /// Velocity event output.
        u16, vlceo, set_vlceo, 11
    }
    reg_bit! {
        /// Match/capture channel 0 event output.
        u16, mceo0, set_mceo0, 12
    }
    reg_bit! {
        /// Match/capture channel 1 event output.
        u16, mceo1, set_mceo1, 13
    }
}

register! {
    /// Interrupt flag layout shared by INTENCLR, INTENSET and INTFLAG.
    IntFlags: u8
}

impl IntFlags {
    reg_bit! {
        /// Counter overflow or underflow.
        u8, ovf, set_ovf, 0
    }
    reg_bit! {
        /// Quadrature error.
        u8, err, set_err, 1
    }
    reg_bit! {
        /// Direction change.
        u8, dir, set_dir, 2
    }
    reg_bit! {
        /// Velocity (position changed).
        u8, vlc, set_vlc, 3
    }
    reg_bit! {
        /// Match/capture channel 0.
        u8, mc0, set_mc0, 4
    }
    reg_bit! {
        /// Match/capture channel 1.
        u8, mc1, set_mc1, 5
    }
}

register! {
    /// Status (STATUS).
    Status: u16
}

impl Status {
    reg_bit! {
        /// Quadrature error.
        u16, qerr, set_qerr, 0
    }
    reg_bit! {
        /// Index error.
        u16, idxerr, set_idxerr, 1
    }
    reg_bit! {
        /// Missing pulse error.
        u16, mperr, set_mperr, 2
    }
    reg_bit! {
        /// Winding error.
        u16, winerr, set_winerr, 3
    }
    reg_bit! {
        /// The counter is stopped.
        u16, stop, set_stop, 6
    }
    reg_bit! {
        /// Counting direction: set when counting down.
        u16, dir, set_dir, 7
    }
}

register! {
    /// Debug control (DBGCTRL).
    Dbgctrl: u8
}

impl Dbgctrl {
    reg_bit! {
        /// Keep running while halted by a debugger.
        u8, dbgrun, set_dbgrun, 0
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
    /// CTRLB command synchronization.
    pub const CTRLB: Self = Self(1 << 2);
    /// STATUS synchronization.
    pub const STATUS: Self = Self(1 << 3);
    /// Prescaler synchronization.
    pub const PRESC: Self = Self(1 << 4);
    /// Filter synchronization.
    pub const FILTER: Self = Self(1 << 5);
    /// COUNT synchronization.
    pub const COUNT: Self = Self(1 << 6);
    /// Compare channel 0 synchronization.
    pub const CC0: Self = Self(1 << 7);
    /// Compare channel 1 synchronization.
    pub const CC1: Self = Self(1 << 8);
}

register! {
    /// Prescaler (PRESC).
    Presc: u8
}

impl Presc {
    reg_field! {
        /// Prescaler selection.
        u8, presc, set_presc, 0, 4
    }
}

register! {
    /// Input filter duration (FILTER).
    Filter: u8
}

register! {
    /// Position counter (COUNT). The counter is 16 bits wide.
    Count: u32
}

register! {
    /// Compare channel (CCx).
    Cc: u32
}

/// PDEC register block.
#[repr(C)]
pub struct RegisterBlock {
    /// Control A.
    pub ctrla: Reg<Ctrla>,
    /// Control B clear.
    pub ctrlbclr: Reg<Ctrlbclr>,
    /// Control B set.
    pub ctrlbset: Reg<Ctrlbset>,
    /// Event control.
    pub evctrl: Reg<Evctrl>,
    /// Interrupt enable clear.
    pub intenclr: Reg<IntFlags>,
    /// Interrupt enable set.
    pub intenset: Reg<IntFlags>,
    /// Interrupt flag status and clear.
    pub intflag: Reg<IntFlags>,
    _reserved0: u8,
    /// Status.
    pub status: Reg<Status>,
    _reserved1: u8,
    /// Debug control.
    pub dbgctrl: Reg<Dbgctrl>,
    /// Synchronization busy.
    pub syncbusy: Reg<Syncbusy>,
    /// Prescaler.
    pub presc: Reg<Presc>,
    /// Input filter duration.
    pub filter: Reg<Filter>,
    _reserved2: [u8; 2],
    /// Prescaler buffer.
    pub prescbuf: Reg<Presc>,
    /// Input filter buffer.
    pub filterbuf: Reg<Filter>,
    _reserved3: [u8; 2],
    /// Position counter.
    pub count: Reg<Count>,
    /// Compare channels.
    pub cc: [Reg<Cc>; 2],
    /// Compare channel buffers.
    pub ccbuf: [Reg<Cc>; 2],
}

impl RegisterBlock {
    /// Creates a register block with every register at its reset value.
    ///
    /// Driver code on hardware obtains the block through
    /// [`crate::pac::PDEC`]; a block in plain memory lets the drivers run
    /// without the peripheral, as the test suite does.
    pub const fn new() -> Self {
        Self {
            ctrla: Reg::new(Ctrla(0)),
            ctrlbclr: Reg::new(Ctrlbclr(0)),
            ctrlbset: Reg::new(Ctrlbset(0)),
            evctrl: Reg::new(Evctrl(0)),
            intenclr: Reg::new(IntFlags(0)),
            intenset: Reg::new(IntFlags(0)),
            intflag: Reg::new(IntFlags(0)),
            _reserved0: 0,
            status: Reg::new(Status(0)),
            _reserved1: 0,
            dbgctrl: Reg::new(Dbgctrl(0)),
            syncbusy: Reg::new(Syncbusy(0)),
            presc: Reg::new(Presc(0)),
            filter: Reg::new(Filter(0)),
            _reserved2: [0; 2],
            prescbuf: Reg::new(Presc(0)),
            filterbuf: Reg::new(Filter(0)),
            _reserved3: [0; 2],
            count: Reg::new(Count(0)),
            cc: [Reg::new(Cc(0)), Reg::new(Cc(0))],
            ccbuf: [Reg::new(Cc(0)), Reg::new(Cc(0))],
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
