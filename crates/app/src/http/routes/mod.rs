pub mod datasets;
pub mod dimensions;
pub mod health;
pub mod taxonomy;
