//! Domain layer - pure business logic, no I/O.

pub mod conversation;
pub mod foundation;
pub mod queueing;
pub mod scheduling;
