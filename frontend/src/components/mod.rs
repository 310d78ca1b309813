pub mod account_page;
pub mod booking_confirm;
pub mod booking_details;
pub mod booking_page;
pub mod booking_success;
pub mod calendar_view;
pub mod construction_banner;
pub mod header;
pub mod login_page;
pub mod oauth_callback;
pub mod time_slot_grid;
pub mod treatment_selector;
