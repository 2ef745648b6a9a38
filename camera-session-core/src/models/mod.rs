pub mod camera_models;
pub mod captured_frame;
pub mod config;
pub mod error;
pub mod state;
