/// Exposes the canonical text label stored for enum-like fields.
pub trait Labelled {
    fn label(&self) -> &str;
}

/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Trims `raw` and returns it when something is left.
pub(crate) fn normalize_label(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
