//! Feature surfaces of the admin console.

pub mod auth;
pub mod categories;
pub mod pictures;
pub mod products;
