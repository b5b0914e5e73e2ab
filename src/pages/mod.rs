pub mod custom;
pub mod home;
pub mod not_found;
