pub mod chat;
pub mod db;
pub mod mail;
pub mod web;
