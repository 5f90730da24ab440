// handlers/mod.rs - Handler tiers
//
// Public (no session) and protected (session required, possibly a role).
// Access levels live in the endpoint table in `crate::routes`, not here.

pub mod protected;
pub mod public;
