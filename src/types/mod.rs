pub mod constants;
pub mod error;
pub mod message;

pub use error::{ClientError, Result};
pub use message::EventFrame;
