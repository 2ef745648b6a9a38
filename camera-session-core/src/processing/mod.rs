pub mod capture_buffer;
pub mod frame_encoder;
pub mod geometry;
