//! Stateless repositories — every method takes `&Connection`.

pub mod presentation;
pub mod session;
