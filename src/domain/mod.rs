pub mod catalog;
pub mod listing;
