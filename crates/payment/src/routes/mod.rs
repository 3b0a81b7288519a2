//! REST handlers.

pub mod health;
pub mod payments;
