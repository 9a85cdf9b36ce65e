pub mod book;
pub mod responses;
pub mod store;
pub mod volumes;
