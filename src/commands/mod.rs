// Value formatting
pub mod bps;
pub mod fmt;
pub mod money;

// Environment
pub mod dirs;

// Logger walkthrough
pub mod demo;
