mod utils;

pub use utils::get_current_timestamp_str;
pub use utils::init_logger;
