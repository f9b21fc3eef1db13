pub mod dimensions;
pub mod filters;
pub mod search;
pub mod taxonomy;
