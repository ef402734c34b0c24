pub mod lineparser;
pub mod pathresolver;
pub mod relocate;

pub use lineparser::{parse_line, VoiceLine};
pub use pathresolver::{resolve, shared_extension, PathError, MAX_PATH_LEN};
pub use relocate::relocate_all;
