pub mod assignment;
pub mod auth;
pub mod data;
pub mod system;
