use crate::model::task::Task;

/// Serialize a task back into the on-disk line format.
///
/// `parse_task(serialize_task(t))` yields `t` as long as the title and tags
/// hold no newlines and the details are empty or newline-terminated.
pub fn serialize_task(task: &Task) -> String {
    let mut out = String::with_capacity(task.title.len() + task.tags.len() + task.details.len() + 3);
    out.push_str(&task.title);
    out.push('\n');
    out.push_str(&task.tags);
    out.push('\n');
    out.push('\n');
    out.push_str(&task.details);
    if !task.details.is_empty() && !task.details.ends_with('\n') {
        out.push('\n');
    }
    out
}
