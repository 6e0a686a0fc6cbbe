pub mod error;
pub mod object;
pub mod utils;

pub use error::{DepDocsError, Result, ResultExt};
pub use object::ObjectNode;
pub use utils::{is_single_dir_name, non_blank, normalize_identifier, split_tags};
