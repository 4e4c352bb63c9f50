//! Page-windowed query execution

mod error;
mod page;
mod pager;

pub use error::PageError;
pub use page::{PAGE_KEY, Page, PageArgs, SIZE_KEY};
pub use pager::{paginate, paginate_with};
