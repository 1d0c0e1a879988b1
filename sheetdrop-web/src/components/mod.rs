pub(crate) mod drop_zone;
pub(crate) mod error_dialog;
pub(crate) mod error_table;
pub(crate) mod header_nav_item;
pub(crate) mod history_list;
pub(crate) mod loading;
pub(crate) mod template_card;
pub(crate) mod user_dropdown;
pub(crate) mod user_form;
