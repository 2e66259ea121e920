// app/src/services/mod.rs

pub mod browse;
pub mod cart_service;
pub mod catalog;
