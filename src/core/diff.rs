use crate::domain::model::{Advisory, Watermark};

/// Sorts one cycle's advisories and selects the ones published after the
/// stored watermark.
///
/// The threshold is the watermark as loaded at cycle start, frozen for the
/// whole cycle: every entry is compared against it, so two advisories that
/// share a publication timestamp newer than the watermark are both selected.
/// The sort is stable; entries with equal timestamps keep feed order.
///
/// Returns the selected advisories in ascending publication order together
/// with the updated watermark (the newest selected timestamp, or the input
/// watermark unchanged when nothing qualifies).
pub fn select_new(mut entries: Vec<Advisory>, watermark: Watermark) -> (Vec<Advisory>, Watermark) {
    entries.sort_by_key(|entry| entry.published);

    let new: Vec<Advisory> = entries
        .into_iter()
        .filter(|entry| watermark.admits(entry.published))
        .collect();

    let updated = new
        .last()
        .map(|entry| Watermark::new(entry.published))
        .unwrap_or(watermark);

    (new, updated)
}
