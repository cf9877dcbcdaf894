pub mod activity;
pub mod auth;
pub mod missions;
pub mod payments;
pub mod requests;
pub mod staff;
pub mod users;
