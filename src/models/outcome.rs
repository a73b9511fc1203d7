/// Why a render or widget init did nothing. Missing page pieces are
/// tolerated, this just makes the no-op visible to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingElement(&'static str),
    LibraryUnavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderStatus {
    Rendered { authenticated: bool },
    Skipped(SkipReason),
}

#[derive(Debug, Clone, PartialEq)]
pub enum WidgetOutcome<T> {
    Rendered(T),
    Skipped(SkipReason),
}

impl<T> WidgetOutcome<T> {
    pub fn rendered(self) -> Option<T> {
        match self {
            WidgetOutcome::Rendered(view) => Some(view),
            WidgetOutcome::Skipped(_) => None,
        }
    }
}
