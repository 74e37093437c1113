pub mod event_buffer;
pub mod protocol;
