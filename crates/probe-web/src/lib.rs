mod components;
mod pages;

pub mod server;

pub use server::{build_app, AppState};
