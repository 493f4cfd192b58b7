//! Service-account credentials, scope sets, bearer tokens, and signed assertions.

pub mod assertion;
pub mod credential;
pub mod scope;
pub mod token;

pub use assertion::*;
pub use credential::*;
pub use scope::*;
pub use token::{secret::*, *};
