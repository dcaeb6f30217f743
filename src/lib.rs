//! Dump rendering and dispatch for the acsdump binary.

pub mod dump;
