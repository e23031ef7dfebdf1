//! Background workers

pub mod core;
