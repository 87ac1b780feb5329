pub mod chat;
pub mod contact;
pub mod envelope;
pub mod experience;
pub mod json_error;
pub mod projects;
pub mod system;
