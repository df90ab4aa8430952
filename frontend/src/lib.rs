//! # Pet Shop Client
//!
//! Front-end logic of the pet shop, independent of any UI toolkit:
//!
//! - [`services`]: the [`PetShopApi`] trait and its HTTP client
//! - [`agenda`]: appointment scheduling (slots, calendar, booking)
//! - [`vaccines`], [`clients`], [`dashboard`]: the other screens
//!
//! View-models own their caches and reach the backend only through the trait
//! they are given, so every screen can be driven without a server.

pub mod agenda;
pub mod clients;
pub mod dashboard;
pub mod error;
pub mod services;
pub mod vaccines;

pub use error::FormError;
pub use services::{ApiClient, ApiError, PetShopApi};
