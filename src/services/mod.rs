pub mod catalog;
pub mod controller;
pub mod views;
