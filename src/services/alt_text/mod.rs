//! Alt text service
//!
//! Binds attachments to the vision client: resolves stored URLs and keyword
//! hints, persists generated text and serves the bulk enumeration.

mod service;
mod types;


pub use service::{AltTextService, split_outcome};
pub use types::{SettingsUpdate, SettingsView};
