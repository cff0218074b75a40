pub mod api;
pub mod teams;
