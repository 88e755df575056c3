//! TEMADESK Common Library
//!
//! Shared modules for the order-intake CLI: the service catalog, the order
//! draft model, the pricing calculator, and the booking wizard state machine.
//! This crate has NO interactive or network dependencies.

pub mod catalog;
pub mod config;
pub mod error;
pub mod intake;
pub mod order;
pub mod pricing;
pub mod session;
pub mod wizard;
