//! Tessera Core
//!
//! Leaf utilities shared by the tessera crates: containers, string/value
//! parsing, logging sinks, configuration and a few small math helpers.

pub mod alloc;
pub mod config;
pub mod container;
pub mod logging;
pub mod math;
pub mod parser;
pub mod string;
pub mod timer;
