//! # Analog Comparator (AC)
//!
//! ## Overview
//!
//! The AC peripheral compares two analog inputs and reports which one has the
//! higher voltage. The block contains two comparators which can be operated
//! continuously or in single-shot mode, where every comparison is kicked off
//! by an explicit start command.
//!
//! The driver is synchronous: results are polled through [`Ac::result`], no
//! interrupts are handled at this layer.
//!
//! ## Configuration
//!
//! Everything configurable about the block (input muxing, filtering,
//! hysteresis, speed, output and event routing) is fixed when the driver is
//! constructed; see the [config] module. There is no runtime
//! reconfiguration.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use same5x_hal::ac::{Ac, config::Config};
//! use same5x_hal::pac;
//!
//! let regs = unsafe { pac::AC::steal() }.regs();
//! let mut comparator = Ac::new(regs, &Config::default());
//! comparator.enable();
//! comparator.start_comparison(0).unwrap();
//! while comparator.result(0).is_err() {}
//! ```

use crate::pac::ac::{Compctrl, Ctrlb, Evctrl, RegisterBlock, Syncbusy};
use crate::pac::generic::Synchronize;

/// AC driver errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum Error {
    /// No valid comparison result is available for the requested comparator.
    ///
    /// Also reported for comparator indices the hardware does not have.
    NotReady,
    /// The comparator index is out of range.
    InvalidComparator,
}

/// AC configuration types.
///
/// The configuration mirrors the COMPCTRL, SCALER and EVCTRL register fields
/// and is applied once by [`Ac::new`](super::Ac::new).
pub mod config {
    /// Digital filter applied to the comparator output.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub enum FilterLength {
        /// No filtering.
        #[default]
        Off      = 0,
        /// Majority vote over 3 samples.
        Majority3 = 1,
        /// Majority vote over 5 samples.
        Majority5 = 2,
    }

    /// Hysteresis level applied to the comparator inputs.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub enum Hysteresis {
        /// 50 mV.
        #[default]
        Hyst50  = 0,
        /// 100 mV.
        Hyst100 = 1,
        /// 150 mV.
        Hyst150 = 2,
    }

    /// Routing of the comparator output to its I/O pin.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub enum Output {
        /// Not routed to a pin.
        #[default]
        Off          = 0,
        /// Routed asynchronously.
        Asynchronous = 1,
        /// Routed through the clock synchronizer.
        Synchronous  = 2,
    }

    /// Positive input selection.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub enum PositiveInput {
        /// AIN0 pin.
        #[default]
        Pin0   = 0,
        /// AIN1 pin.
        Pin1   = 1,
        /// AIN2 pin.
        Pin2   = 2,
        /// AIN3 pin.
        Pin3   = 3,
        /// VDDANA scaler output.
        VScale = 4,
    }

    /// Negative input selection.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub enum NegativeInput {
        /// AIN0 pin.
        #[default]
        Pin0    = 0,
        /// AIN1 pin.
        Pin1    = 1,
        /// AIN2 pin.
        Pin2    = 2,
        /// AIN3 pin.
        Pin3    = 3,
        /// Ground.
        Ground  = 4,
        /// VDDANA scaler output.
        VScale  = 5,
        /// Internal bandgap reference.
        Bandgap = 6,
        /// DAC output.
        Dac     = 7,
    }

    /// Condition that raises the comparator interrupt flag.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub enum InterruptSelection {
        /// Either output edge.
        #[default]
        Toggle       = 0,
        /// Rising output edge.
        Rising       = 1,
        /// Falling output edge.
        Falling      = 2,
        /// End of a comparison.
        EndOfCompare = 3,
    }

    /// Propagation-delay versus power trade-off.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub enum Speed {
        /// Low speed, low power.
        Low  = 0,
        /// High speed.
        #[default]
        High = 3,
    }

    /// Static configuration of one comparator.
    #[derive(Debug, Clone, Copy)]
    pub struct Comparator {
        /// Output digital filter.
        pub filter: FilterLength,
        /// Input hysteresis, if any.
        pub hysteresis: Option<Hysteresis>,
        /// Output pin routing.
        pub output: Output,
        /// Positive input.
        pub positive: PositiveInput,
        /// Negative input.
        pub negative: NegativeInput,
        /// Interrupt flag condition.
        pub interrupt: InterruptSelection,
        /// Speed selection.
        pub speed: Speed,
        /// Single-shot mode: each comparison needs an explicit start command.
        pub single_shot: bool,
        /// Keep comparing in standby sleep mode.
        pub run_in_standby: bool,
        /// VDDANA scaler step feeding the VSCALE input (0..=63).
        pub scaler: u8,
    }

    impl Default for Comparator {
        fn default() -> Self {
            Self {
                filter: FilterLength::default(),
                hysteresis: None,
                output: Output::default(),
                positive: PositiveInput::default(),
                negative: NegativeInput::default(),
                interrupt: InterruptSelection::default(),
                speed: Speed::default(),
                single_shot: false,
                run_in_standby: false,
                scaler: 0,
            }
        }
    }

    /// Event routing shared by both comparators.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct Events {
        /// Generate an event when comparator 0 toggles.
        pub comparator0_output: bool,
        /// Generate an event when comparator 1 toggles.
        pub comparator1_output: bool,
        /// Start comparator 0 from an incoming event.
        pub comparator0_input: bool,
        /// Start comparator 1 from an incoming event.
        pub comparator1_input: bool,
        /// Invert the incoming event for comparator 0.
        pub invert_input0: bool,
        /// Invert the incoming event for comparator 1.
        pub invert_input1: bool,
        /// Generate an event when the window 0 state changes.
        pub window0_output: bool,
    }

    /// Static AC configuration, applied once at construction.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct Config {
        /// Comparator 0 setup.
        pub comparator0: Comparator,
        /// Comparator 1 setup.
        pub comparator1: Comparator,
        /// Event routing.
        pub events: Events,
    }
}

/// Analog comparator driver.
pub struct Ac {
    regs: &'static RegisterBlock,
}

impl Ac {
    /// Resets the peripheral and applies `config`.
    ///
    /// A pending software reset is honored; an enabled peripheral is disabled
    /// (with the enable synchronization wait) before the reset is issued.
    pub fn new(regs: &'static RegisterBlock, config: &config::Config) -> Self {
        if !regs.is_syncing(Syncbusy::SWRST) {
            if regs.ctrla.read().enable() {
                regs.ctrla.modify(|r| r.set_enable(false));
                regs.wait_for_sync(Syncbusy::ENABLE);
            }
            regs.ctrla.write_with(|w| w.set_swrst(true));
        }
        regs.wait_for_sync(Syncbusy::SWRST);

        regs.compctrl[0].write(compctrl_image(&config.comparator0));
        regs.scaler[0].write_with(|w| w.set_value(config.comparator0.scaler));
        regs.compctrl[1].write(compctrl_image(&config.comparator1));
        regs.scaler[1].write_with(|w| w.set_value(config.comparator1.scaler));
        regs.evctrl.write(evctrl_image(&config.events));

        Self { regs }
    }

    /// Enables the comparator block.
    pub fn enable(&mut self) {
        self.regs.ctrla.modify(|r| r.set_enable(true));
    }

    /// Disables the comparator block.
    pub fn disable(&mut self) {
        self.regs.ctrla.modify(|r| r.set_enable(false));
    }

    /// Returns the latest comparison result of comparator `comp`.
    ///
    /// `Ok(1)` means the positive input is above the negative input, `Ok(0)`
    /// the opposite. A comparator whose result has not settled reports
    /// [`Error::NotReady`], as does any index other than 0 or 1.
    pub fn result(&self, comp: u8) -> Result<u8, Error> {
        let statusb = self.regs.statusb.read();
        let statusa = self.regs.statusa.read();
        match comp {
            0 if statusb.ready0() => Ok(statusa.state0() as u8),
            1 if statusb.ready1() => Ok(statusa.state1() as u8),
            _ => Err(Error::NotReady),
        }
    }

    /// Enables comparator `comp` and, when it is configured for single-shot
    /// mode, issues its one-shot start command.
    pub fn start_comparison(&mut self, comp: u8) -> Result<(), Error> {
        let compctrl = self
            .regs
            .compctrl
            .get(usize::from(comp))
            .ok_or(Error::InvalidComparator)?;
        compctrl.modify(|r| r.set_enable(true));

        if compctrl.read().single() {
            let mut start = Ctrlb::default();
            match comp {
                0 => start.set_start0(true),
                _ => start.set_start1(true),
            }
            self.regs.ctrlb.write(start);
        }
        Ok(())
    }

    /// Stops comparator `comp` by clearing its enable bit.
    pub fn stop_comparison(&mut self, comp: u8) -> Result<(), Error> {
        let compctrl = self
            .regs
            .compctrl
            .get(usize::from(comp))
            .ok_or(Error::InvalidComparator)?;
        compctrl.modify(|r| r.set_enable(false));
        Ok(())
    }

    /// Disables and resets the peripheral, releasing the register block.
    pub fn free(self) -> &'static RegisterBlock {
        self.regs.ctrla.modify(|r| r.set_enable(false));
        self.regs.ctrla.modify(|r| r.set_swrst(true));
        self.regs
    }
}

fn compctrl_image(comparator: &config::Comparator) -> Compctrl {
    let mut image = Compctrl::default();
    image.set_flen(comparator.filter as u32);
    if let Some(level) = comparator.hysteresis {
        image.set_hysten(true);
        image.set_hyst(level as u32);
    }
    image.set_out(comparator.output as u32);
    image.set_muxpos(comparator.positive as u32);
    image.set_muxneg(comparator.negative as u32);
    image.set_intsel(comparator.interrupt as u32);
    image.set_speed(comparator.speed as u32);
    image.set_single(comparator.single_shot);
    image.set_runstdby(comparator.run_in_standby);
    image
}

fn evctrl_image(events: &config::Events) -> Evctrl {
    let mut image = Evctrl::default();
    image.set_compeo0(events.comparator0_output);
    image.set_compeo1(events.comparator1_output);
    image.set_compei0(events.comparator0_input);
    image.set_compei1(events.comparator1_input);
    image.set_invei0(events.invert_input0);
    image.set_invei1(events.invert_input1);
    image.set_wineo0(events.window0_output);
    image
}
