pub mod app;
pub mod event;
pub mod keys;
pub mod table;
pub mod ui;
