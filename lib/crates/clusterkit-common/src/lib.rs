pub mod content;
pub mod tfvars;

pub use content::{Content, ContentError, State};
pub use tfvars::{Platform, TfVars, TfVarsError};
