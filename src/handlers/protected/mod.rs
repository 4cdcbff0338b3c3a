// handlers/protected/mod.rs - Protected handlers (bearer token required)
//
// Every route here sits behind `jwt_auth_middleware`, so handlers can rely
// on an `AuthUser` extension being present.

pub mod bookings;
pub mod users;
