mod types;
mod utils;

pub use types::Filter;
pub use utils::apply_filters;
