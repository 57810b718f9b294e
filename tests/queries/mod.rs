mod users;
mod votes;
