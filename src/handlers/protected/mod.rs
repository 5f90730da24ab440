// handlers/protected/mod.rs - Handlers behind the authentication guard
//
// Every handler here reads the caller through `RequestIdentity`. Which
// roles reach which handler is declared in `crate::routes`.

pub mod account;
pub mod admin;
pub mod cart;
pub mod category;
pub mod course;
pub mod wishlist;
