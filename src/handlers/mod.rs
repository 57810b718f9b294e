pub mod auth;
pub mod extract;
pub mod health;
pub mod movies;
pub mod users;
pub mod votes;

pub use auth::*;
pub use health::*;
