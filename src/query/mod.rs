//! Query engine: pagination and the dynamic filter/sort pipeline

pub mod filter;
pub mod page;

pub use filter::MovieFilter;
pub use page::{paginate, total_pages, PageMeta, PageQuery, DEFAULT_PER_PAGE, MAX_PER_PAGE};
