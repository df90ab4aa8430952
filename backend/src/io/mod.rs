//! Interface layer exposing the domain services to clients.

pub mod rest;

pub use rest::*;
