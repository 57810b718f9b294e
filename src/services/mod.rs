pub mod jwt;
pub mod movies;
pub mod users;
pub mod votes;
