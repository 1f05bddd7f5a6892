pub mod entity;
pub mod log_entry;
pub mod related_entry;
