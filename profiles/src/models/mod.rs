pub mod profile_image;
pub mod user;
