pub mod health;
pub mod setup;
pub mod summary;
pub mod ui;
