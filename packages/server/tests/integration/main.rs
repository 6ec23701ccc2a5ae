mod common;

mod playlist;
mod tournament;
mod user;
