pub mod annotation;
pub mod app;
pub mod command;
pub mod config;
pub mod controller;
pub mod document;
pub mod error;
pub mod event;
pub(crate) mod geometry;
pub mod history;
pub mod input;
pub mod notify;
pub mod pacer;
pub mod reading_bar;
pub mod snapshot;
pub mod transition;
