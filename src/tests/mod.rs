#![warn(clippy::all, clippy::pedantic)]

pub mod bag_tests;
pub mod catalog_tests;
pub mod input_tests;
