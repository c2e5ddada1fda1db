//! Deskflow - Conversation SLA metrics and queue priority engine
//!
//! This crate tracks service-level metrics for customer conversations
//! arriving from multiple channels and keeps each conversation's queue
//! priority up to date as activities flow in.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
