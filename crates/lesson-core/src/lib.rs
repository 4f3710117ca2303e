pub mod error;
pub mod policy;
pub mod progress;
pub mod types;

pub use error::TutorError;
pub use policy::*;
pub use progress::*;
pub use types::*;
