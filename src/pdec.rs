//! # Position Decoder (PDEC)
//!
//! ## Overview
//!
//! The PDEC peripheral decodes quadrature-encoded phase signals into a 16-bit
//! position counter, with hardware detection of direction changes, counter
//! overflow/underflow and quadrature errors.
//!
//! The driver is interrupt-driven: decoded events are delivered to listeners
//! registered through [`Pdec::subscribe_position`] and
//! [`Pdec::subscribe_events`]. Subscribing unmasks the matching hardware
//! interrupt sources; unsubscribing masks them again.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use same5x_hal::pdec::{Config, Event, EventListener, Pdec};
//! use same5x_hal::pac;
//!
//! struct Monitor;
//!
//! impl EventListener for Monitor {
//!     fn on_event(&self, event: Event) {
//!         let _ = event;
//!     }
//! }
//!
//! static MONITOR: Monitor = Monitor;
//!
//! let regs = unsafe { pac::PDEC::steal() }.regs();
//! let mut decoder = Pdec::new(regs, &Config::default()).unwrap();
//! decoder.subscribe_events(&MONITOR);
//! decoder.enable();
//! let position = decoder.read_position(0);
//! ```

use core::cell::RefCell;

use critical_section::Mutex;

use crate::pac::generic::Synchronize;
use crate::pac::pdec::{Cc, Command, Count, Ctrla, Evctrl, IntFlags, RegisterBlock, Syncbusy};

pub use config::Config;

/// PDEC driver errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum Error {
    /// The hardware does not support the requested operation.
    Unsupported,
    /// Another driver instance already owns the peripheral.
    InstanceReserved,
}

/// Events delivered to an [`EventListener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// The position counter wrapped past its maximum.
    Overflow,
    /// The position counter wrapped past zero.
    Underflow,
    /// The counting direction changed.
    DirectionChanged,
    /// A quadrature error was detected.
    Error,
}

/// Listener for position-changed (velocity) interrupts.
pub trait PositionListener: Sync {
    /// Called from interrupt context when the position counter has moved.
    fn on_position_changed(&self);
}

/// Listener for counter events.
pub trait EventListener: Sync {
    /// Called from interrupt context with the decoded event.
    fn on_event(&self, event: Event);
}

/// PDEC configuration types.
pub mod config {
    /// Decoder configuration preset (CTRLA.CONF).
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub enum Decoder {
        /// Count every quadrature edge.
        #[default]
        X4             = 0,
        /// Count every quadrature edge, secure variant.
        X4Secure       = 1,
        /// Count phase A edges only.
        X2             = 2,
        /// Count phase A edges only, secure variant.
        X2Secure       = 3,
        /// Auto-correct the counter against the index pulse.
        AutoCorrection = 4,
        /// Rotary counter mode.
        RotaryCounter  = 5,
    }

    /// Counter clock prescaler (PRESC.PRESC).
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub enum Prescaler {
        /// Divide by 1.
        #[default]
        Div1    = 0,
        /// Divide by 2.
        Div2    = 1,
        /// Divide by 4.
        Div4    = 2,
        /// Divide by 8.
        Div8    = 3,
        /// Divide by 16.
        Div16   = 4,
        /// Divide by 32.
        Div32   = 5,
        /// Divide by 64.
        Div64   = 6,
        /// Divide by 128.
        Div128  = 7,
        /// Divide by 256.
        Div256  = 8,
        /// Divide by 512.
        Div512  = 9,
        /// Divide by 1024.
        Div1024 = 10,
    }

    /// Event outputs routed to the event system.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct Events {
        /// Generate an event on counter overflow or underflow.
        pub overflow: bool,
        /// Generate an event on a quadrature error.
        pub error: bool,
        /// Generate an event on a direction change.
        pub direction: bool,
        /// Generate an event on a velocity (position changed) tick.
        pub velocity: bool,
    }

    /// Interrupt sources armed when an event listener subscribes.
    #[derive(Debug, Clone, Copy)]
    pub struct EventInterrupts {
        /// Deliver overflow and underflow events.
        pub overflow: bool,
        /// Deliver quadrature-error events.
        pub error: bool,
        /// Deliver direction-change events.
        pub direction: bool,
    }

    impl Default for EventInterrupts {
        fn default() -> Self {
            Self {
                overflow: true,
                error: true,
                direction: true,
            }
        }
    }

    /// Static PDEC configuration, applied once at construction.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct Config {
        /// Decoder configuration preset.
        pub decoder: Decoder,
        /// Swap the phase A and phase B inputs.
        pub swap_phases: bool,
        /// Invert the phase A input.
        pub invert_phase_a: bool,
        /// Invert the phase B input.
        pub invert_phase_b: bool,
        /// Invert the index input.
        pub invert_index: bool,
        /// Input glitch filter duration, in counter cycles.
        pub filter_duration: u8,
        /// Maximum consecutive missing index pulses tolerated by the
        /// auto-correction logic (0..=15).
        pub max_missing_pulses: u8,
        /// Counter clock prescaler.
        pub prescaler: Prescaler,
        /// Keep counting in standby sleep mode.
        pub run_in_standby: bool,
        /// Keep counting while halted by a debugger.
        pub debug_run: bool,
        /// Event system outputs.
        pub events: Events,
        /// Interrupt sources armed by [`subscribe_events`].
        ///
        /// [`subscribe_events`]: super::Pdec::subscribe_events
        pub interrupts: EventInterrupts,
    }
}

struct Shared {
    regs: &'static RegisterBlock,
    position: Option<&'static dyn PositionListener>,
    events: Option<&'static dyn EventListener>,
}

/// PDEC instances on this device family.
const INSTANCE_COUNT: usize = 1;

static INSTANCES: Mutex<RefCell<[Option<Shared>; INSTANCE_COUNT]>> =
    Mutex::new(RefCell::new([None]));

/// Quadrature position decoder driver.
pub struct Pdec {
    regs: &'static RegisterBlock,
    event_mask: IntFlags,
}

impl Pdec {
    /// Resets the peripheral, applies `config` and claims the
    /// interrupt-dispatch slot for the instance.
    pub fn new(regs: &'static RegisterBlock, config: &Config) -> Result<Self, Error> {
        critical_section::with(|cs| {
            let mut instances = INSTANCES.borrow_ref_mut(cs);
            if instances[0].is_some() {
                return Err(Error::InstanceReserved);
            }
            instances[0] = Some(Shared {
                regs,
                position: None,
                events: None,
            });
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

        regs.filter
            .write(crate::pac::pdec::Filter::from_bits(config.filter_duration));
        regs.dbgctrl.write_with(|w| w.set_dbgrun(config.debug_run));
        regs.presc
            .write_with(|w| w.set_presc(config.prescaler as u8));
        regs.evctrl.write(evctrl_image(&config.events));
        // The compare channel resets to the full counter range.
        regs.cc[0].write(Cc::from_bits(0xFFFF));
        regs.ctrla.write(ctrla_image(config));

        let mut event_mask = IntFlags::default();
        event_mask.set_ovf(config.interrupts.overflow);
        event_mask.set_err(config.interrupts.error);
        event_mask.set_dir(config.interrupts.direction);

        #[cfg(feature = "rt")]
        {
            use cortex_m::peripheral::NVIC;

            NVIC::mask(crate::pac::Interrupt::Pdec0);
            NVIC::unpend(crate::pac::Interrupt::Pdec0);
            unsafe { NVIC::unmask(crate::pac::Interrupt::Pdec0) };
        }

        Ok(Self { regs, event_mask })
    }

    /// Enables the decoder and starts the counter with a synchronized START
    /// command.
    pub fn enable(&mut self) {
        self.regs.ctrla.modify(|r| r.set_enable(true));
        self.regs.wait_for_sync(Syncbusy::ENABLE);
        self.regs.ctrlbset.write_with(|w| w.set_cmd(Command::Start));
        self.regs.wait_for_sync(Syncbusy::CTRLB);
    }

    /// Stops the counter with a synchronized STOP command and disables the
    /// decoder.
    pub fn disable(&mut self) {
        self.regs.ctrlbset.write_with(|w| w.set_cmd(Command::Stop));
        self.regs.wait_for_sync(Syncbusy::CTRLB);
        self.regs.ctrla.modify(|r| r.set_enable(false));
        self.regs.wait_for_sync(Syncbusy::ENABLE);
    }

    /// Sets the position counter to `value`, modulo the 16-bit counter width.
    ///
    /// The `axis` argument is accepted for call compatibility and ignored:
    /// the hardware exposes a single counter.
    pub fn write_position(&mut self, value: u32, _axis: u8) {
        self.regs.count.write(Count::from_bits(u32::from(value as u16)));
        self.regs.wait_for_sync(Syncbusy::COUNT);
    }

    /// Returns the current position count.
    ///
    /// Issues a READSYNC command so the returned value reflects the counter
    /// at the time of the call. The `axis` argument is ignored.
    pub fn read_position(&mut self, _axis: u8) -> u32 {
        self.regs
            .ctrlbset
            .write_with(|w| w.set_cmd(Command::ReadSync));
        self.regs.wait_for_sync(Syncbusy::COUNT);
        self.regs.count.read().bits()
    }

    /// Sets the upper position threshold, mapped to the hardware compare
    /// channel.
    pub fn set_up_threshold(&mut self, threshold: u32, _axis: u8) -> Result<(), Error> {
        self.regs.cc[0].write(Cc::from_bits(u32::from(threshold as u16)));
        Ok(())
    }

    /// A lower position threshold is not supported by the hardware; always
    /// reports [`Error::Unsupported`].
    pub fn set_low_threshold(&mut self, _threshold: u32, _axis: u8) -> Result<(), Error> {
        Err(Error::Unsupported)
    }

    /// Registers `listener` for position-changed interrupts and unmasks the
    /// velocity interrupt source.
    ///
    /// A previously registered listener is replaced.
    pub fn subscribe_position(&mut self, listener: &'static dyn PositionListener) {
        critical_section::with(|cs| {
            if let Some(shared) = INSTANCES.borrow_ref_mut(cs)[0].as_mut() {
                shared.position = Some(listener);
            }
        });
        self.regs.intenset.write_with(|w| w.set_vlc(true));
    }

    /// Removes the position listener and masks the velocity interrupt
    /// source.
    pub fn unsubscribe_position(&mut self) {
        self.regs.intenclr.write_with(|w| w.set_vlc(true));
        critical_section::with(|cs| {
            if let Some(shared) = INSTANCES.borrow_ref_mut(cs)[0].as_mut() {
                shared.position = None;
            }
        });
    }

    /// Registers `listener` for counter events and unmasks the interrupt
    /// sources selected in the configuration.
    ///
    /// A previously registered listener is replaced.
    pub fn subscribe_events(&mut self, listener: &'static dyn EventListener) {
        critical_section::with(|cs| {
            if let Some(shared) = INSTANCES.borrow_ref_mut(cs)[0].as_mut() {
                shared.events = Some(listener);
            }
        });
        self.regs.intenset.write(self.event_mask);
    }

    /// Removes the event listener and masks its interrupt sources.
    pub fn unsubscribe_events(&mut self) {
        self.regs.intenclr.write(self.event_mask);
        critical_section::with(|cs| {
            if let Some(shared) = INSTANCES.borrow_ref_mut(cs)[0].as_mut() {
                shared.events = None;
            }
        });
    }

    /// Disables and resets the peripheral, releasing the register block and
    /// the interrupt-dispatch slot.
    pub fn free(self) -> &'static RegisterBlock {
        #[cfg(feature = "rt")]
        {
            use cortex_m::peripheral::NVIC;

            NVIC::mask(crate::pac::Interrupt::Pdec0);
            NVIC::unpend(crate::pac::Interrupt::Pdec0);
        }

        self.regs.ctrla.modify(|r| r.set_enable(false));
        self.regs.ctrla.modify(|r| r.set_swrst(true));

        critical_section::with(|cs| {
            INSTANCES.borrow_ref_mut(cs)[0] = None;
        });
        self.regs
    }
}

fn ctrla_image(config: &Config) -> Ctrla {
    let mut image = Ctrla::default();
    // MODE 0: quadrature decoding.
    image.set_mode(0);
    image.set_runstdby(config.run_in_standby);
    image.set_conf(config.decoder as u32);
    image.set_swap(config.swap_phases);
    image.set_peren(true);
    image.set_pinen0(true);
    image.set_pinen1(true);
    image.set_pinen2(true);
    image.set_pinven0(config.invert_phase_a);
    image.set_pinven1(config.invert_phase_b);
    image.set_pinven2(config.invert_index);
    // Full-width angular counter.
    image.set_angular(0x7);
    image.set_maxcmp(u32::from(config.max_missing_pulses));
    image
}

fn evctrl_image(events: &config::Events) -> Evctrl {
    let mut image = Evctrl::default();
    image.set_ovfeo(events.overflow);
    image.set_erreo(events.error);
    image.set_direo(events.direction);
    image.set_vlceo(events.velocity);
    image
}

enum Dispatch {
    Event(&'static dyn EventListener, Event),
    Position(&'static dyn PositionListener),
}

/// Services the PDEC interrupt for the given instance.
///
/// Status flags are checked in fixed priority order: overflow (split into
/// underflow and overflow by the current counting direction), direction
/// change, velocity, then quadrature error. The first pending flag is cleared
/// and dispatched. At most one listener fires per entry; flags left pending
/// keep the interrupt line asserted and are serviced on re-entry.
///
/// Bound to the `PDEC_0` vector when the `rt` feature is active; off-target
/// tests invoke it directly against a register block in plain memory.
pub fn on_interrupt(instance: usize) {
    let dispatch = critical_section::with(|cs| {
        let instances = INSTANCES.borrow_ref(cs);
        let shared = instances.get(instance)?.as_ref()?;
        let regs = shared.regs;

        let flags = regs.intflag.read();
        if flags.ovf() {
            regs.intflag.write_with(|w| w.set_ovf(true));
            let event = if regs.status.read().dir() {
                Event::Underflow
            } else {
                Event::Overflow
            };
            shared.events.map(|listener| Dispatch::Event(listener, event))
        } else if flags.dir() {
            regs.intflag.write_with(|w| w.set_dir(true));
            shared
                .events
                .map(|listener| Dispatch::Event(listener, Event::DirectionChanged))
        } else if flags.vlc() {
            regs.intflag.write_with(|w| w.set_vlc(true));
            shared.position.map(Dispatch::Position)
        } else if flags.err() {
            regs.intflag.write_with(|w| w.set_err(true));
            shared
                .events
                .map(|listener| Dispatch::Event(listener, Event::Error))
        } else {
            None
        }
    });

    match dispatch {
        Some(Dispatch::Event(listener, event)) => listener.on_event(event),
        Some(Dispatch::Position(listener)) => listener.on_position_changed(),
        None => {}
    }
}

#[cfg(feature = "rt")]
#[unsafe(no_mangle)]
extern "C" fn PDEC_0_Handler() {
    on_interrupt(0);
}
