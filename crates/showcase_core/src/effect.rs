#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedEffect {
    CancelLoadTimer,
    HideLoading,
    HideError,
    ShowError,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavEffect {
    /// Pin the nav and reveal the spacer at the given height.
    Stick { spacer_height: f64 },
    Unstick,
    /// Mark the link at this index active and clear the others.
    Highlight(usize),
}
