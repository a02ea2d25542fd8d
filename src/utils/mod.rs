pub mod paths;
pub mod terminal;

pub use paths::{PathManager, format_path_with_tilde};
pub use terminal::sanitize_text;
