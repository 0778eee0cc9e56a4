#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    Render,

    // Focus
    FocusNext,
    FocusPrev,
    FocusFirst,
    FocusLast,
    Activate,

    // Lifecycle
    Back,
    SaveState,

    // Feed callbacks
    DrawerRequested,
    PostSelected { id: String, title: String },
}
