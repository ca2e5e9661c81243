pub mod page_count;

pub use page_count::{LopdfPageCounter, PageCounter};
