//! Hardware-independent core library for climacast
//!
//! This crate contains the platform-agnostic logic of the climacast sensor
//! agent: exponential smoothing of temperature/humidity readings, the
//! `TIMEPLOT` line protocol encoder, and the per-cycle transmission
//! controller that ties them to a sensor and a datagram transport.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets and desktop hosts (for the agent and tests).

#![no_std]

extern crate alloc;

pub mod app_state;
pub mod config;
pub mod cycle;
pub mod filter;
pub mod protocol;
pub mod sensors;
pub mod transport;
