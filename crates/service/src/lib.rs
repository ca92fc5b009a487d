//! Service layer for the Shopplyn catalog.
//! - Business rules live here; persistence sits behind store traits.
//! - Entities and field validation come from the `models` crate.
//! - Every operation reports failures through [`errors::ServiceError`].

pub mod errors;
pub mod catalog;
pub mod auth;
#[cfg(test)]
pub mod test_support;
