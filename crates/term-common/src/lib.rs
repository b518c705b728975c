pub mod errors;

pub use errors::TermError;

pub type Result<T> = std::result::Result<T, TermError>;
