pub mod chat;
pub mod contact;
pub mod experience;
pub mod listing;
pub mod option_fields;
pub mod project;
