pub mod task_parser;
pub mod task_serializer;

pub use task_parser::parse_task;
pub use task_serializer::serialize_task;

/// Number of header lines (title, tags, separator) before the details block
pub const HEADER_LINES: usize = 3;
