pub mod assets;
pub mod commands;
pub mod decryptor;
pub mod error;
pub mod key;
pub mod logger;
pub mod progress;

#[doc(hidden)]
pub use commands::Args;
