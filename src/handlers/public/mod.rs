// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Catalogue, booking and rating endpoints plus token acquisition.
// Path ids are checked by the `ValidId` extractor where a handler takes one.

pub mod bookings;
pub mod login;
pub mod products;
pub mod ratings;
pub mod users;
