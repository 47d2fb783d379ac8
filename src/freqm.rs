//! # Frequency Meter (FREQM)
//!
//! ## Overview
//!
//! The FREQM peripheral counts the edges of a measured clock over a window of
//! reference clock cycles. From the raw edge count and the configured window
//! the driver derives either the frequency of the measured clock, in hertz,
//! or its period.
//!
//! Measurements are blocking: [`Freqm::read`] starts a measurement and spins
//! on the hardware busy flag until it completes. The wait is unbounded; a
//! reference clock that never ticks will hang the caller. A measurement-done
//! listener can additionally be subscribed for interrupt-driven use.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use same5x_hal::freqm::{Config, Freqm, Parameter};
//! use same5x_hal::pac;
//!
//! let regs = unsafe { pac::FREQM::steal() }.regs();
//! let mut meter = Freqm::new(regs, Config::default()).unwrap();
//! meter.set_measurement_period(1_000);
//! meter.set_measurement_parameter(Parameter::Frequency);
//! meter.enable();
//!
//! let mut measurements = [0; 4];
//! meter.read(&mut measurements).unwrap();
//! ```

use core::cell::RefCell;

use critical_section::Mutex;

use crate::pac::freqm::{RegisterBlock, Syncbusy};
use crate::pac::generic::Synchronize;

/// FREQM driver errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum Error {
    /// The counter captured no edges, so a period cannot be derived.
    NoPulses,
    /// The configured measurement window rounds to zero microseconds, so a
    /// frequency cannot be derived.
    WindowTooShort,
    /// Another driver instance already owns the peripheral.
    InstanceReserved,
}

/// Quantity reported by [`Freqm::read`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parameter {
    /// Frequency of the measured clock, in hertz.
    #[default]
    Frequency,
    /// Period of the measured clock, in nanoseconds.
    Period,
}

/// Static FREQM configuration.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Frequency of the reference clock feeding the measurement window.
    pub ref_clock_hz: u32,
    /// Window length, in reference cycles, used when a requested period does
    /// not fit the 8-bit window field.
    pub default_ref_count: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ref_clock_hz: 32_768,
            default_ref_count: 255,
        }
    }
}

/// Listener for measurement-done interrupts.
pub trait DoneListener: Sync {
    /// Called from interrupt context with the raw edge count of the
    /// completed measurement.
    fn on_measurement_done(&self, raw: u32);
}

struct Shared {
    regs: &'static RegisterBlock,
    done: Option<&'static dyn DoneListener>,
}

/// FREQM instances on this device family.
const INSTANCE_COUNT: usize = 1;

static INSTANCES: Mutex<RefCell<[Option<Shared>; INSTANCE_COUNT]>> =
    Mutex::new(RefCell::new([None]));

/// Frequency meter driver.
pub struct Freqm {
    regs: &'static RegisterBlock,
    config: Config,
    period_us: u32,
    parameter: Parameter,
}

impl Freqm {
    /// Resets the peripheral and claims its interrupt-dispatch slot.
    ///
    /// The measurement window starts out at its widest: the period is set to
    /// the maximum representable value and quantized down, exactly as if
    /// [`Freqm::set_measurement_period`] had been called with `u32::MAX`.
    pub fn new(regs: &'static RegisterBlock, config: Config) -> Result<Self, Error> {
        critical_section::with(|cs| {
            let mut instances = INSTANCES.borrow_ref_mut(cs);
            if instances[0].is_some() {
                return Err(Error::InstanceReserved);
            }
            instances[0] = Some(Shared { regs, done: None });
            Ok(())
        })?;

        if !regs.is_syncing(Syncbusy::SWRST) {
            if regs.ctrla.read().enable() {
                regs.ctrla.modify(|r| r.set_enable(false));
                regs.wait_for_sync(Syncbusy::ENABLE);
            }
            regs.ctrla.write_with(|w| w.set_swrst(true));
        }
        regs.wait_for_sync(Syncbusy::SWRST);

        regs.cfga
            .write_with(|w| w.set_refnum(u16::from(config.default_ref_count)));

        #[cfg(feature = "rt")]
        {
            use cortex_m::peripheral::NVIC;

            NVIC::mask(crate::pac::Interrupt::Freqm);
            NVIC::unpend(crate::pac::Interrupt::Freqm);
            unsafe { NVIC::unmask(crate::pac::Interrupt::Freqm) };
        }

        let mut meter = Self {
            regs,
            config,
            period_us: 0,
            parameter: Parameter::default(),
        };
        meter.set_measurement_period(u32::MAX);
        Ok(meter)
    }

    /// Enables the frequency meter, waiting out the enable synchronization.
    pub fn enable(&mut self) {
        self.regs.ctrla.modify(|r| r.set_enable(true));
        self.regs.wait_for_sync(Syncbusy::ENABLE);
    }

    /// Disables the frequency meter, waiting out the enable synchronization.
    pub fn disable(&mut self) {
        self.regs.ctrla.modify(|r| r.set_enable(false));
        self.regs.wait_for_sync(Syncbusy::ENABLE);
    }

    /// Sets the measurement period and returns the value actually achieved,
    /// in microseconds.
    ///
    /// The period is quantized to whole reference clock cycles. A period
    /// that does not fit the 8-bit window field falls back to the configured
    /// default window; a period shorter than one reference cycle is widened
    /// to a single cycle, the shortest window the hardware can time.
    ///
    /// An enabled peripheral is disabled, reconfigured and re-enabled, with
    /// the enable synchronization waited out on both transitions.
    pub fn set_measurement_period(&mut self, period_us: u32) -> u32 {
        let ref_hz = self.config.ref_clock_hz;
        let quantized = u64::from(period_us) * u64::from(ref_hz) / 1_000_000;
        let was_enabled = self.regs.ctrla.read().enable();

        self.regs.ctrla.modify(|r| r.set_enable(false));
        self.regs.wait_for_sync(Syncbusy::ENABLE);

        let ref_count = if quantized > 0xFF {
            self.config.default_ref_count
        } else {
            // A zero-cycle window is not a valid hardware setting.
            (quantized as u8).max(1)
        };
        self.regs.cfga.write_with(|w| w.set_refnum(u16::from(ref_count)));

        if was_enabled {
            self.regs.ctrla.modify(|r| r.set_enable(true));
            self.regs.wait_for_sync(Syncbusy::ENABLE);
        }

        self.period_us = u32::from(ref_count) * 1_000_000 / ref_hz;
        self.period_us
    }

    /// Returns the currently configured measurement period, in microseconds,
    /// as achieved after quantization.
    pub fn measurement_period(&self) -> u32 {
        self.period_us
    }

    /// Selects whether [`Freqm::read`] reports frequencies or periods.
    pub fn set_measurement_parameter(&mut self, parameter: Parameter) {
        self.parameter = parameter;
    }

    /// Runs one blocking measurement per buffer entry and returns the number
    /// of entries written.
    ///
    /// Each measurement starts the hardware and spins on its busy flag with
    /// no timeout. In [`Parameter::Period`] mode a raw count of zero (no
    /// edges observed) reports [`Error::NoPulses`] rather than dividing by
    /// zero; entries already measured are left in the buffer.
    pub fn read(&mut self, data: &mut [u32]) -> Result<usize, Error> {
        for slot in data.iter_mut() {
            self.regs.ctrlb.write_with(|w| w.set_start(true));
            while self.regs.status.read().busy() {}

            let raw = self.regs.value.read().value();
            *slot = match self.parameter {
                Parameter::Frequency => {
                    if self.period_us == 0 {
                        return Err(Error::WindowTooShort);
                    }
                    (u64::from(raw) * 1_000_000 / u64::from(self.period_us)) as u32
                }
                Parameter::Period => {
                    if raw == 0 {
                        return Err(Error::NoPulses);
                    }
                    (u64::from(self.period_us) * 1_000 / u64::from(raw)) as u32
                }
            };
        }
        Ok(data.len())
    }

    /// Registers `listener` for measurement-done interrupts and unmasks the
    /// DONE interrupt source.
    ///
    /// A previously registered listener is replaced.
    pub fn subscribe_done(&mut self, listener: &'static dyn DoneListener) {
        critical_section::with(|cs| {
            if let Some(shared) = INSTANCES.borrow_ref_mut(cs)[0].as_mut() {
                shared.done = Some(listener);
            }
        });
        self.regs.intenset.write_with(|w| w.set_done(true));
    }

    /// Removes the measurement-done listener and masks the DONE source.
    pub fn unsubscribe_done(&mut self) {
        self.regs.intenclr.write_with(|w| w.set_done(true));
        critical_section::with(|cs| {
            if let Some(shared) = INSTANCES.borrow_ref_mut(cs)[0].as_mut() {
                shared.done = None;
            }
        });
    }

    /// Disables and resets the peripheral, releasing the register block and
    /// the interrupt-dispatch slot.
    pub fn free(self) -> &'static RegisterBlock {
        #[cfg(feature = "rt")]
        cortex_m::peripheral::NVIC::mask(crate::pac::Interrupt::Freqm);

        self.regs.ctrla.modify(|r| r.set_enable(false));
        self.regs.wait_for_sync(Syncbusy::ENABLE);
        self.regs.ctrla.modify(|r| r.set_swrst(true));

        critical_section::with(|cs| {
            INSTANCES.borrow_ref_mut(cs)[0] = None;
        });
        self.regs
    }
}

/// Services the FREQM interrupt for the given instance.
///
/// Bound to the `FREQM` vector when the `rt` feature is active; off-target
/// tests invoke it directly against a register block in plain memory.
pub fn on_interrupt(instance: usize) {
    let pending = critical_section::with(|cs| {
        let instances = INSTANCES.borrow_ref(cs);
        let shared = instances.get(instance)?.as_ref()?;

        let flags = shared.regs.intflag.read();
        if !flags.done() {
            return None;
        }
        shared.regs.intflag.write_with(|w| w.set_done(true));
        Some((shared.done, shared.regs.value.read().value()))
    });

    if let Some((Some(listener), raw)) = pending {
        listener.on_measurement_done(raw);
    }
}

#[cfg(feature = "rt")]
#[unsafe(no_mangle)]
extern "C" fn FREQM_Handler() {
    on_interrupt(0);
}
