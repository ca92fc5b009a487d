//! SeaORM entities for the catalog tables plus the field validators shared
//! by every store implementation.

pub mod errors;
pub mod db;
pub mod user_admin;
pub mod category;
pub mod image_product;
pub mod product;

/// Current time in the column type used by every `*_at` field.
pub fn now() -> sea_orm::prelude::DateTimeWithTimeZone {
    chrono::Utc::now().into()
}

#[cfg(test)]
mod tests;
