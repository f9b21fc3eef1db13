pub mod page;
pub mod slug;
