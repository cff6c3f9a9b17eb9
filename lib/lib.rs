pub mod config;
pub mod error;
pub mod fio;
pub mod logger;
pub mod session;
pub mod sys;
pub mod utils;

pub use error::{FioError, Result};
pub use session::{run_scenario, FileSession, OpenFlags, Whence};
