pub mod auth;
pub mod graduates;
pub mod home;
pub mod json_error;
pub mod system;
pub mod users;
