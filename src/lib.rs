// src/lib.rs
pub mod averager;
pub mod config;
pub mod engine;
pub mod gui;
pub mod stream;
pub mod types;
