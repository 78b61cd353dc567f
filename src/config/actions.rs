#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalAction {
    Quit,
    Configure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawerAction {
    Ok,
    Cancel,
    Dismiss,
}
