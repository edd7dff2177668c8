// Services module - Business logic

pub mod password;
