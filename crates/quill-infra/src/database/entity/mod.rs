//! SeaORM entities mirroring the domain model.

pub mod category;
pub mod post;
pub mod user;
