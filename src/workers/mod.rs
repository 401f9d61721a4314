//! Background workers feeding the UI loop

pub mod core;
pub mod fetcher;
pub mod scheduler;
