//! Business logic services

pub mod alt_text;

pub use alt_text::{AltTextService, SettingsUpdate, SettingsView, split_outcome};
