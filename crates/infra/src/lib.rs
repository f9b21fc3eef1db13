pub mod search;
pub mod static_data;
