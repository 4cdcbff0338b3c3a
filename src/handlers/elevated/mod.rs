// handlers/elevated/mod.rs - Elevated handlers (admin role required)
//
// Routes here run `jwt_auth_middleware` and then `require_admin_middleware`;
// the caller's own user record must hold the admin role.

pub mod users;
