//! Analog Comparator (AC) register block.

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
    /// Control B (CTRLB), single-shot start commands.
    Ctrlb: u8
}

impl Ctrlb {
    reg_bit! {
        /// Start a single-shot comparison on comparator 0.
        u8, start0, set_start0, 0
    }
    reg_bit! {
        /// Start a single-shot comparison on comparator 1.
        u8, start1, set_start1, 1
    }
}

register! {
    /// Event control (EVCTRL).
    Evctrl: u16
}

impl Evctrl {
    reg_bit! {
        /// Comparator 0 event output.
        u16, compeo0, set_compeo0, 0
    }
    reg_bit! {
        /// Comparator 1 event output.
        u16, compeo1, set_compeo1, 1
    }
    reg_bit! {
        /// Window 0 event output.
        u16, wineo0, set_wineo0, 4
    }
    reg_bit! {
        /// Comparator 0 event input.
        u16, compei0, set_compei0, 8
    }
    reg_bit! {
        /// Comparator 1 event input.
        u16, compei1, set_compei1, 9
    }
    reg_bit! {
        /// Invert event input 0.
        u16, invei0, set_invei0, 12
    }
    reg_bit! {
        /// Invert event input 1.
        u16, invei1, set_invei1, 13
    }
}

register! {
    /// Interrupt flag layout shared by INTENCLR, INTENSET and INTFLAG.
    IntFlags: u8
}

impl IntFlags {
    reg_bit! {
        /// Comparator 0 interrupt.
        u8, comp0, set_comp0, 0
    }
    reg_bit! {
        /// Comparator 1 interrupt.
        u8, comp1, set_comp1, 1
    }
    reg_bit! {
        /// Window 0 interrupt.
        u8, win0, set_win0, 4
    }
}

register! {
    /// Status A (STATUSA), current comparison results.
    Statusa: u8
}

impl Statusa {
    reg_bit! {
        /// Comparator 0 output state.
        u8, state0, set_state0, 0
    }
    reg_bit! {
        /// Comparator 1 output state.
        u8, state1, set_state1, 1
    }
    reg_field! {
        /// Window 0 state.
        u8, wstate0, set_wstate0, 4, 2
    }
}

register! {
    /// Status B (STATUSB), per-comparator ready flags.
    Statusb: u8
}

impl Statusb {
    reg_bit! {
        /// Comparator 0 result is valid.
        u8, ready0, set_ready0, 0
    }
    reg_bit! {
        /// Comparator 1 result is valid.
        u8, ready1, set_ready1, 1
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
    /// Window control (WINCTRL).
    Winctrl: u8
}

impl Winctrl {
    reg_bit! {
        /// Window 0 mode enable.
        u8, wen0, set_wen0, 0
    }
    reg_field! {
        /// Window 0 interrupt selection.
        u8, wintsel0, set_wintsel0, 1, 2
    }
}

register! {
    /// VDDANA scaler (SCALERx).
    Scaler: u8
}

impl Scaler {
    reg_field! {
        /// Scaler step.
        u8, value, set_value, 0, 6
    }
}

register! {
    /// Comparator control (COMPCTRLx).
    Compctrl: u32
}

impl Compctrl {
    reg_bit! {
        /// Comparator enable.
        u32, enable, set_enable, 1
    }
    reg_bit! {
        /// Single-shot mode.
        u32, single, set_single, 2
    }
    reg_field! {
        /// Interrupt selection.
        u32, intsel, set_intsel, 3, 2
    }
    reg_bit! {
        /// Keep comparing in standby sleep mode.
        u32, runstdby, set_runstdby, 6
    }
    reg_field! {
        /// Negative input mux.
        u32, muxneg, set_muxneg, 8, 3
    }
    reg_field! {
        /// Positive input mux.
        u32, muxpos, set_muxpos, 12, 3
    }
    reg_bit! {
        /// Swap positive and negative inputs.
        u32, swap, set_swap, 15
    }
    reg_field! {
        /// Speed selection.
        u32, speed, set_speed, 16, 2
    }
    reg_bit! {
        /// Hysteresis enable.
        u32, hysten, set_hysten, 19
    }
    reg_field! {
        /// Hysteresis level.
        u32, hyst, set_hyst, 20, 2
    }
    reg_field! {
        /// Digital filter length.
        u32, flen, set_flen, 24, 3
    }
    reg_field! {
        /// Output routing.
        u32, out, set_out, 28, 2
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
    /// WINCTRL synchronization.
    pub const WINCTRL: Self = Self(1 << 2);
    /// COMPCTRL0 synchronization.
    pub const COMPCTRL0: Self = Self(1 << 3);
    /// COMPCTRL1 synchronization.
    pub const COMPCTRL1: Self = Self(1 << 4);
}

register! {
    /// Calibration (CALIB).
    Calib: u16
}

/// AC register block.
#[repr(C)]
pub struct RegisterBlock {
    /// Control A.
    pub ctrla: Reg<Ctrla>,
    /// Control B.
    pub ctrlb: Reg<Ctrlb>,
    /// Event control.
    pub evctrl: Reg<Evctrl>,
    /// Interrupt enable clear.
    pub intenclr: Reg<IntFlags>,
    /// Interrupt enable set.
    pub intenset: Reg<IntFlags>,
    /// Interrupt flag status and clear.
    pub intflag: Reg<IntFlags>,
    /// Status A.
    pub statusa: Reg<Statusa>,
    /// Status B.
    pub statusb: Reg<Statusb>,
    /// Debug control.
    pub dbgctrl: Reg<Dbgctrl>,
    /// Window control.
    pub winctrl: Reg<Winctrl>,
    _reserved0: u8,
    /// Per-comparator VDDANA scaler.
    pub scaler: [Reg<Scaler>; 2],
    _reserved1: [u8; 2],
    /// Per-comparator control.
    pub compctrl: [Reg<Compctrl>; 2],
    _reserved2: [u8; 8],
    /// Synchronization busy.
    pub syncbusy: Reg<Syncbusy>,
    /// Calibration.
    pub calib: Reg<Calib>,
}

impl RegisterBlock {
    /// Creates a register block with every register at its reset value.
    ///
    /// Driver code on hardware obtains the block through [`crate::pac::AC`];
    /// a block in plain memory lets the drivers run without the peripheral,
    /// as the test suite does.
    pub const fn new() -> Self {
        Self {
            ctrla: Reg::new(Ctrla(0)),
            ctrlb: Reg::new(Ctrlb(0)),
            evctrl: Reg::new(Evctrl(0)),
            intenclr: Reg::new(IntFlags(0)),
            intenset: Reg::new(IntFlags(0)),
            intflag: Reg::new(IntFlags(0)),
            statusa: Reg::new(Statusa(0)),
            statusb: Reg::new(Statusb(0)),
            dbgctrl: Reg::new(Dbgctrl(0)),
            winctrl: Reg::new(Winctrl(0)),
            _reserved0: 0,
            scaler: [Reg::new(Scaler(0)), Reg::new(Scaler(0))],
            _reserved1: [0; 2],
            compctrl: [Reg::new(Compctrl(0)), Reg::new(Compctrl(0))],
            _reserved2: [0; 8],
            syncbusy: Reg::new(Syncbusy(0)),
            calib: Reg::new(Calib(0)),
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
