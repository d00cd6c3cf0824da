pub mod app;
pub mod assets;
pub mod motion;
pub mod theme;
