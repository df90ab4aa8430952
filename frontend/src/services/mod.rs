pub mod api;
#[cfg(test)]
pub(crate) mod fake;

pub use api::{ApiClient, ApiError, ApiResult, PetShopApi};
