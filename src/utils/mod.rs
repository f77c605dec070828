pub mod pagination;
pub mod slug;
pub mod time;
pub mod validation;
