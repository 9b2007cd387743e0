pub mod repeating_task;
pub mod service;
