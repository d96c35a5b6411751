//! Embedded schemas and report templates

pub mod registry;
pub mod template;
pub mod validator;

pub use registry::{SchemaKind, SchemaRegistry};
pub use template::ReportRenderer;
pub use validator::{SchemaError, Validator, Violation};
