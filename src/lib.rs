//! Bare-metal (`no_std`) drivers for the Analog Comparator (AC), Frequency
//! Meter (FREQM) and quadrature Position Decoder (PDEC) peripherals found in
//! SAM E5x devices.
//!
//! ## Overview
//!
//! Each driver wraps the memory-mapped register block of its peripheral,
//! exposed through the [pac] module: construction resets and configures the
//! hardware, and the driver methods map onto one or two register accesses
//! each. The AC and FREQM drivers are synchronous; the PDEC driver delivers
//! decoded counter events to subscribed listeners from interrupt context,
//! through a fixed-size per-instance dispatch registry.
//!
//! Register blocks are addressed through a reference rather than a hardwired
//! base address, so every driver can also run against a block in plain
//! memory. The test suite uses this to exercise the drivers on the host.
//!
//! The listener registries are guarded with [critical-section]; the
//! application must provide an implementation, for example through the
//! `critical-section-single-core` feature of the `cortex-m` crate.
//!
//! [critical-section]: https://docs.rs/critical-section/latest/critical_section/
//!
//! ## Feature Flags
#![doc = document_features::document_features!()]
#![deny(missing_docs)]
#![no_std]

pub mod ac;
pub mod freqm;
pub mod pac;
pub mod pdec;
