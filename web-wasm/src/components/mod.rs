pub mod confirm_dialog;
pub mod header;
pub mod image_field;
pub mod notice_banner;
pub mod pagination;
pub mod settings_panel;
