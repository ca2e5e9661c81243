pub mod name;
pub mod similarity;

pub use name::{best_match, select_best, MATCH_THRESHOLD};
pub use similarity::similarity;
