pub mod admin;
pub mod auth;
pub mod object_id;
pub mod response;

pub use admin::require_admin_middleware;
pub use auth::{jwt_auth_middleware, AuthUser};
pub use object_id::ValidId;
pub use response::ActionResponse;
