pub mod environment;
pub mod paths;
pub mod terminal;

pub use environment::{APP_DIR_NAME, get_config_dir};
pub use paths::{format_path_with_tilde, validate_file_size};
pub use terminal::strip_ansi_codes;
