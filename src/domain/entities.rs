pub mod graduate;
pub mod session;
pub mod user;
