pub mod build;
pub mod catalog;
