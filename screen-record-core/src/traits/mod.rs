pub mod capture_delegate;
pub mod control_surface;
pub mod display_media;
pub mod media_encoder;
