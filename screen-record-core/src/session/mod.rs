pub mod coordinator;
pub mod event;
pub mod recording_session;
