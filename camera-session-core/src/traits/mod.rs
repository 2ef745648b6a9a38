pub mod control_adapter;
pub mod device_provider;
pub mod preference_store;
pub mod session_delegate;
pub mod video_surface;
