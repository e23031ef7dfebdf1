//! Dashboard component modules
//!
//! Contains all individual rendering components

pub mod footer;
pub mod header;
pub mod insights;
pub mod logs;
pub mod modal;
pub mod widget_grid;
