#![cfg_attr(not(test), no_std)]

//! # SleepTemp-rs
//! ## A bedroom temperature monitor with audible alerts in Rust
//!
//! Features:
//! - Temperature and humidity sampling
//! - Four temperature bands (optimal, close, near, idle)
//! - Buzzer alerts with a shared cooldown
//! - Mute button that silences the monitor until restart
//! - Serial dashboard refreshed once per second

pub mod alert;
pub mod error;
pub mod monitor;
pub mod mute;
pub mod preferences;
pub mod rendering;
pub mod scheduler;
pub mod sensors;
pub mod sound;
pub mod timer;
