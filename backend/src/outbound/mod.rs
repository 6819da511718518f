//! Outbound adapters: implementations of the domain's driven ports.

pub mod persistence;
