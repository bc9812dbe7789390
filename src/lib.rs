pub mod catalog;
pub mod chat;
pub mod config;
pub mod credentials;
pub mod errors;
pub mod flo_config;
pub mod flow;
pub mod generator;
pub mod menu;
pub mod monitor;
pub mod palette;
pub mod project;
pub mod quick;
pub mod runner;
pub mod setup;
pub mod tui;
pub mod ui;
