// handlers/mod.rs - 3-Tier Handler Architecture
//
// Public (no auth) → Protected (bearer token) → Elevated (bearer token + admin role)
pub mod elevated;
pub mod protected;
pub mod public;
