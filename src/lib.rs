//! # Restaurant Admin Menus
//!
//! Parses the hand-written admin price lists of the campus restaurants into
//! structured menu item records and seeds them into Postgres when a
//! restaurant's menu table is empty.

pub mod config;
pub mod db;
pub mod errors;
pub mod line_builder;
pub mod menu_cache;
pub mod menu_model;
pub mod menu_parser;
pub mod price_parser;
pub mod restaurants;
pub mod seed;
pub mod variant_labels;
pub mod veg_classifier;

pub use menu_cache::{cafe_after_hours_admin_menu, panache_admin_menu, symposium_admin_menu};
pub use menu_model::MenuItemRecord;
pub use restaurants::Restaurant;
