pub mod core;
pub mod logging;
pub mod maze;
pub mod render;
pub mod settings;
