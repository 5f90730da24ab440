// handlers/public/mod.rs - Public handlers (no session required)
//
// A stale or invalid cookie on these routes is ignored.

pub mod auth;
pub mod catalog;
pub mod system;
