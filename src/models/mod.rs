// Models module - Database entity representations

pub mod user;

pub use user::User;
