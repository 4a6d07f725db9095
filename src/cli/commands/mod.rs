pub mod classify;
pub mod config;
pub mod identity;
pub mod render;
pub mod replay;
pub mod styles;
