pub mod chunk_buffer;
pub mod time_format;
