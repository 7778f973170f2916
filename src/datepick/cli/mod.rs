pub mod commands;
mod render;
mod script;
mod setup;
mod styles;
mod templates;
