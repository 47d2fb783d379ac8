//! Register-level access to the peripherals driven by this crate.
//!
//! Each peripheral module defines a `#[repr(C)]` register block matching the
//! device memory map, with typed per-register field accessors. The singleton
//! types in this module ([`AC`], [`FREQM`], [`PDEC`]) tie a block to its base
//! address on the device; a block can just as well live in plain memory,
//! which is how the drivers are exercised off-target.

pub mod ac;
pub mod freqm;
pub mod generic;
pub mod pdec;

/// Interrupt lines used by the drivers in this crate.
///
/// The discriminants are the NVIC interrupt numbers of the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Interrupt {
    /// Frequency meter measurement done.
    Freqm = 28,
    /// Position decoder overflow, error, direction and velocity interrupts.
    Pdec0 = 46,
}

unsafe impl cortex_m::interrupt::InterruptNumber for Interrupt {
    #[inline]
    fn number(self) -> u16 {
        self as u16
    }
}

macro_rules! instance {
    ($(#[$meta:meta])* $name:ident, $module:ident, $address:literal) => {
        $(#[$meta])*
        pub struct $name {
            _private: (),
        }

        impl $name {
            /// Base address of the register block.
            pub const ADDRESS: usize = $address;

            /// Creates a new instance token.
            ///
            /// # Safety
            ///
            /// At most one token per peripheral may be live at a time; the
            /// caller is responsible for not aliasing the peripheral.
            #[inline]
            pub const unsafe fn steal() -> Self {
                Self { _private: () }
            }

            /// Returns the memory-mapped register block.
            #[inline]
            pub fn regs(&self) -> &'static $module::RegisterBlock {
                unsafe { &*(Self::ADDRESS as *const $module::RegisterBlock) }
            }
        }
    };
}

instance! {
    /// Analog Comparator peripheral instance.
    AC, ac, 0x4200_2000
}

instance! {
    /// Frequency Meter peripheral instance.
    FREQM, freqm, 0x4000_2C00
}

instance! {
    /// Position Decoder peripheral instance.
    PDEC, pdec, 0x4200_1C00
}
