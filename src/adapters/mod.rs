//! Adapters layer - concrete implementations of the ports.

pub mod memory;
