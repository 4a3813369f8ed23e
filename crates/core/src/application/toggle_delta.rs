// Toggle Delta Builder

use crate::domain::naming::media_type_of;
use crate::domain::{Queue, ToggleDelta};

/// Build the patch payload for one toggle action.
///
/// Every queue whose media type matches `target_media_type`
/// (case-insensitive) is included with `desired_status`, whatever its current
/// joined flag. Queues outside the naming convention are skipped. Input order
/// is preserved; the result is empty when nothing matches.
pub fn build_toggle_delta(
    queues: &[Queue],
    target_media_type: &str,
    desired_status: bool,
) -> Vec<ToggleDelta> {
    let target = target_media_type.to_lowercase();

    queues
        .iter()
        .filter(|queue| media_type_of(&queue.name).as_deref() == Some(target.as_str()))
        .map(|queue| ToggleDelta::new(queue.id.clone(), desired_status))
        .collect()
}
