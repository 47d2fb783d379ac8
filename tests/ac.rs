//! AC driver tests, run against a register block in plain memory.

use same5x_hal::ac::{Ac, Error, config};
use same5x_hal::pac::ac::RegisterBlock;

fn register_block() -> &'static RegisterBlock {
    Box::leak(Box::new(RegisterBlock::new()))
}

#[test]
fn init_applies_comparator_configuration() {
    let regs = register_block();
    let config = config::Config {
        comparator0: config::Comparator {
            filter: config::FilterLength::Majority3,
            hysteresis: Some(config::Hysteresis::Hyst100),
            output: config::Output::Asynchronous,
            positive: config::PositiveInput::Pin1,
            negative: config::NegativeInput::Bandgap,
            interrupt: config::InterruptSelection::Rising,
            speed: config::Speed::High,
            single_shot: true,
            run_in_standby: true,
            scaler: 32,
        },
        ..Default::default()
    };
    let _comparator = Ac::new(regs, &config);

    let compctrl = regs.compctrl[0].read();
    assert_eq!(compctrl.flen(), 1);
    assert!(compctrl.hysten());
    assert_eq!(compctrl.hyst(), 1);
    assert_eq!(compctrl.out(), 1);
    assert_eq!(compctrl.muxpos(), 1);
    assert_eq!(compctrl.muxneg(), 6);
    assert_eq!(compctrl.intsel(), 1);
    assert_eq!(compctrl.speed(), 3);
    assert!(compctrl.single());
    assert!(compctrl.runstdby());
    assert!(!compctrl.enable());
    assert_eq!(regs.scaler[0].read().value(), 32);

    // Comparator 1 was left at its defaults.
    assert!(!regs.compctrl[1].read().single());
    assert_eq!(regs.scaler[1].read().value(), 0);
}

#[test]
fn init_applies_event_routing() {
    let regs = register_block();
    let config = config::Config {
        events: config::Events {
            comparator0_output: true,
            comparator1_input: true,
            invert_input1: true,
            window0_output: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let _comparator = Ac::new(regs, &config);

    let evctrl = regs.evctrl.read();
    assert!(evctrl.compeo0());
    assert!(!evctrl.compeo1());
    assert!(evctrl.compei1());
    assert!(!evctrl.compei0());
    assert!(evctrl.invei1());
    assert!(evctrl.wineo0());
}

#[test]
fn enable_and_disable_toggle_the_enable_bit() {
    let regs = register_block();
    let mut comparator = Ac::new(regs, &config::Config::default());

    comparator.enable();
    assert!(regs.ctrla.read().enable());

    comparator.disable();
    assert!(!regs.ctrla.read().enable());
}

#[test]
fn result_reports_ready_state_or_not_ready() {
    let regs = register_block();
    let comparator = Ac::new(regs, &config::Config::default());

    // Nothing is ready after reset.
    assert_eq!(comparator.result(0), Err(Error::NotReady));
    assert_eq!(comparator.result(1), Err(Error::NotReady));

    regs.statusb.write_with(|w| w.set_ready0(true));
    assert_eq!(comparator.result(0), Ok(0));

    regs.statusa.write_with(|w| w.set_state0(true));
    assert_eq!(comparator.result(0), Ok(1));

    // Comparator 1 ready with a low output.
    regs.statusb.modify(|r| r.set_ready1(true));
    assert_eq!(comparator.result(1), Ok(0));

    // Indices the hardware does not have report not-ready.
    assert_eq!(comparator.result(2), Err(Error::NotReady));
    assert_eq!(comparator.result(255), Err(Error::NotReady));
}

#[test]
fn single_shot_start_issues_the_start_command() {
    let regs = register_block();
    let mut config = config::Config::default();
    config.comparator0.single_shot = true;
    config.comparator1.single_shot = true;
    let mut comparator = Ac::new(regs, &config);

    comparator.start_comparison(0).unwrap();
    assert!(regs.compctrl[0].read().enable());
    assert!(regs.ctrlb.read().start0());
    assert!(!regs.ctrlb.read().start1());

    comparator.start_comparison(1).unwrap();
    assert!(regs.compctrl[1].read().enable());
    assert!(regs.ctrlb.read().start1());
}

#[test]
fn continuous_start_needs_no_start_command() {
    let regs = register_block();
    let mut comparator = Ac::new(regs, &config::Config::default());

    comparator.start_comparison(0).unwrap();
    assert!(regs.compctrl[0].read().enable());
    assert_eq!(regs.ctrlb.read().bits(), 0);
}

#[test]
fn stop_comparison_clears_the_comparator_enable() {
    let regs = register_block();
    let mut comparator = Ac::new(regs, &config::Config::default());

    comparator.start_comparison(0).unwrap();
    comparator.stop_comparison(0).unwrap();
    assert!(!regs.compctrl[0].read().enable());
}

#[test]
fn start_and_stop_reject_missing_comparators() {
    let regs = register_block();
    let mut comparator = Ac::new(regs, &config::Config::default());

    assert_eq!(comparator.start_comparison(2), Err(Error::InvalidComparator));
    assert_eq!(comparator.stop_comparison(7), Err(Error::InvalidComparator));
}

#[test]
fn free_resets_the_peripheral() {
    let regs = register_block();
    let mut comparator = Ac::new(regs, &config::Config::default());
    comparator.enable();

    let regs = comparator.free();
    let ctrla = regs.ctrla.read();
    assert!(ctrla.swrst());
    assert!(!ctrla.enable());
}
