mod loader;

pub use loader::{LoadError, load_history, load_profile, read_response, save_result};
