//! FREQM driver tests, run against a register block in plain memory.
//!
//! The driver registers itself in a process-wide interrupt-dispatch slot, so
//! the tests serialize on a lock and release the slot through `free` before
//! returning.

use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use same5x_hal::freqm::{self, Config, DoneListener, Error, Freqm, Parameter};
use same5x_hal::pac::freqm::RegisterBlock;

static LOCK: Mutex<()> = Mutex::new(());

fn lock() -> MutexGuard<'static, ()> {
    LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn register_block() -> &'static RegisterBlock {
    Box::leak(Box::new(RegisterBlock::new()))
}

#[test]
fn new_starts_with_the_widest_window() {
    let _guard = lock();
    let regs = register_block();
    let meter = Freqm::new(regs, Config::default()).unwrap();

    // The maximum period does not fit the 8-bit window field, so the default
    // window applies.
    assert_eq!(regs.cfga.read().refnum(), 255);
    assert_eq!(meter.measurement_period(), 255 * 1_000_000 / 32_768);

    meter.free();
}

#[test]
fn set_measurement_period_quantizes_and_falls_back() {
    let _guard = lock();
    let regs = register_block();
    let mut meter = Freqm::new(
        regs,
        Config {
            ref_clock_hz: 100_000,
            default_ref_count: 40,
        },
    )
    .unwrap();

    assert_eq!(meter.set_measurement_period(1_000), 1_000);
    assert_eq!(regs.cfga.read().refnum(), 100);

    assert_eq!(meter.set_measurement_period(150), 150);
    assert_eq!(regs.cfga.read().refnum(), 15);

    // 10 ms needs 1000 reference cycles: falls back to the default window.
    assert_eq!(meter.set_measurement_period(10_000), 400);
    assert_eq!(regs.cfga.read().refnum(), 40);

    // Shorter than one reference cycle: widened to a single cycle.
    assert_eq!(meter.set_measurement_period(3), 10);
    assert_eq!(regs.cfga.read().refnum(), 1);

    meter.free();
}

#[test]
fn reconfiguring_reenables_only_an_enabled_meter() {
    let _guard = lock();
    let regs = register_block();
    let mut meter = Freqm::new(regs, Config::default()).unwrap();

    meter.enable();
    assert!(regs.ctrla.read().enable());
    meter.set_measurement_period(1_000);
    assert!(regs.ctrla.read().enable());

    meter.disable();
    meter.set_measurement_period(500);
    assert!(!regs.ctrla.read().enable());

    meter.free();
}

#[test]
fn read_reports_frequency() {
    let _guard = lock();
    let regs = register_block();
    let mut meter = Freqm::new(
        regs,
        Config {
            ref_clock_hz: 100_000,
            default_ref_count: 40,
        },
    )
    .unwrap();
    meter.set_measurement_period(1_000);
    meter.set_measurement_parameter(Parameter::Frequency);
    meter.enable();

    regs.value.write_with(|w| w.set_value(48_000));
    let mut measurements = [0u32; 3];
    assert_eq!(meter.read(&mut measurements), Ok(3));
    assert_eq!(measurements, [48_000_000; 3]);

    meter.free();
}

#[test]
fn read_reports_period() {
    let _guard = lock();
    let regs = register_block();
    let mut meter = Freqm::new(
        regs,
        Config {
            ref_clock_hz: 100_000,
            default_ref_count: 40,
        },
    )
    .unwrap();
    meter.set_measurement_period(1_000);
    meter.set_measurement_parameter(Parameter::Period);
    meter.enable();

    regs.value.write_with(|w| w.set_value(4));
    let mut measurements = [0u32; 2];
    assert_eq!(meter.read(&mut measurements), Ok(2));
    assert_eq!(measurements, [250_000; 2]);

    meter.free();
}

#[test]
fn period_read_without_pulses_is_guarded() {
    let _guard = lock();
    let regs = register_block();
    let mut meter = Freqm::new(regs, Config::default()).unwrap();
    meter.set_measurement_parameter(Parameter::Period);
    meter.enable();

    // The counter saw no edges; the period is undefined rather than a
    // division by zero.
    let mut measurements = [0u32; 1];
    assert_eq!(meter.read(&mut measurements), Err(Error::NoPulses));

    meter.free();
}

#[test]
fn empty_read_is_a_no_op() {
    let _guard = lock();
    let regs = register_block();
    let mut meter = Freqm::new(regs, Config::default()).unwrap();
    meter.enable();

    assert_eq!(meter.read(&mut []), Ok(0));

    meter.free();
}

#[test]
fn second_driver_instance_is_rejected() {
    let _guard = lock();
    let regs = register_block();
    let meter = Freqm::new(regs, Config::default()).unwrap();

    let other = register_block();
    assert!(matches!(
        Freqm::new(other, Config::default()),
        Err(Error::InstanceReserved)
    ));

    meter.free();

    // The slot is usable again after free.
    let meter = Freqm::new(other, Config::default()).unwrap();
    meter.free();
}

struct DoneRecorder {
    raw: AtomicU32,
    calls: AtomicUsize,
}

impl DoneListener for DoneRecorder {
    fn on_measurement_done(&self, raw: u32) {
        self.raw.store(raw, Ordering::SeqCst);
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

static DONE: DoneRecorder = DoneRecorder {
    raw: AtomicU32::new(0),
    calls: AtomicUsize::new(0),
};

#[test]
fn done_listener_receives_the_raw_count() {
    let _guard = lock();
    let regs = register_block();
    let mut meter = Freqm::new(regs, Config::default()).unwrap();

    meter.subscribe_done(&DONE);
    assert!(regs.intenset.read().done());

    regs.value.write_with(|w| w.set_value(1_234));
    regs.intflag.write_with(|w| w.set_done(true));
    freqm::on_interrupt(0);
    assert_eq!(DONE.calls.load(Ordering::SeqCst), 1);
    assert_eq!(DONE.raw.load(Ordering::SeqCst), 1_234);

    meter.unsubscribe_done();
    assert!(regs.intenclr.read().done());

    // A pending flag with no listener is still consumed quietly.
    regs.intflag.write_with(|w| w.set_done(true));
    freqm::on_interrupt(0);
    assert_eq!(DONE.calls.load(Ordering::SeqCst), 1);

    meter.free();
}

#[test]
fn dispatch_ignores_unknown_instances() {
    let _guard = lock();
    freqm::on_interrupt(0);
    freqm::on_interrupt(5);
}
