pub mod health;
pub mod widget;
