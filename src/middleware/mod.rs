pub mod auth;

pub use auth::{AuthenticatedUser, Requester, jwt_auth_middleware, require_authentication};
