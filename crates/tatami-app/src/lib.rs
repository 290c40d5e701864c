//! HTTP surface for the Tatami scheduler.

pub mod app;
pub mod error;
pub mod schedule_handler;
