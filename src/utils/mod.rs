pub mod codec;
pub mod error;
pub mod logger;
pub mod validation;
