//! Saved payload parsing and error handling

pub mod diagnostics;
pub mod parser;

pub use diagnostics::{PayloadError, PayloadSyntaxError};
pub use parser::{
    load_simulation_result, load_task_names, parse_document, parse_simulation_result,
    parse_task_names, read_payload, PayloadFormat,
};
