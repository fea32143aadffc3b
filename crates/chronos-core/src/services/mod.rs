pub mod clockify;
pub mod config_loader;
pub mod duration;
pub mod gitlab;
pub mod linear;
pub mod tracker;
