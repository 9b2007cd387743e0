pub mod acquirer;
pub mod resources;
