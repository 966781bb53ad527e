/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub completed: usize,
    /// Rounded percentage of completed exercises; 0 when the session has no
    /// exercises at all.
    pub percent: u8,
    pub is_complete: bool,
}
