pub mod catalog;
pub mod common;
pub mod generate;
pub mod shape;
