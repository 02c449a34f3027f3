pub mod app;
pub mod browse;
pub mod list;
pub mod render;
pub mod reset;
pub mod status;
