/// Returned when a configuration string names no known mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseModeError {
    /// Not one of `none`, `single`, `multiple`.
    #[error("unknown selection mode `{0}` (expected none, single or multiple)")]
    SelectionMode(String),
    /// Not one of `none`, `first`, `selected`.
    #[error("unknown auto-activate mode `{0}` (expected none, first or selected)")]
    AutoActivate(String),
}
