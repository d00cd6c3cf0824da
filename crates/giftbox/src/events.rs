/// Requests arriving from background services (socket, config watcher).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    Activate,
    Reset,
    ConfigReload,
}
