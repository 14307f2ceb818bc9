pub mod bootstrap;
pub(crate) mod commands;
pub mod console;
pub mod messages;
pub mod runner;
pub mod settings;
pub mod types;
pub mod workdir;
