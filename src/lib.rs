pub mod app_config;
pub mod catalog;
mod coordinate_deserializer;
pub mod domain;
pub mod position;
pub mod ranking;
pub mod selection_controller;
pub mod snapshot_listener;
pub mod storage;
