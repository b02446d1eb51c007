use std::path::Path;

use crate::model::task::Task;
use crate::parse::HEADER_LINES;

/// Parse the contents of a task file.
///
/// Line 1 is the title, line 2 the tags, line 3 is a reserved separator and
/// is discarded. Every later line is appended to the details, each with a
/// trailing newline. Missing lines leave their fields empty, and a final line
/// without a newline is still taken. Lines end at `\n` only; a `\r` before it
/// stays in the line.
pub fn parse_task(content: &str, file_path: &Path) -> Task {
    let mut task = Task::new(file_path);
    let mut lines = content.split_terminator('\n');

    if let Some(title) = lines.next() {
        task.title = title.to_string();
    }
    if let Some(tags) = lines.next() {
        task.tags = tags.to_string();
    }

    for line in lines.skip(HEADER_LINES - 2) {
        task.details.push_str(line);
        task.details.push('\n');
    }

    task
}
