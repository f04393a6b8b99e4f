pub mod paging;
pub mod validate;
