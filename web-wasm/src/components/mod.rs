//! UIコンポーネント

pub mod header;
pub mod settings_panel;
pub mod upload_slot;
pub mod prompt_field;
pub mod generate_button;
pub mod result_panel;
