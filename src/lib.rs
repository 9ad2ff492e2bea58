pub mod app;
pub mod callbacks;
pub mod config;
pub mod engine;
pub mod flow;
pub mod ingredients;
pub mod lens;
pub mod pathway;
pub mod shared;
pub mod tui;
