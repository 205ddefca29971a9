/// Studio-specific result type
pub type Result<T> = std::result::Result<T, StudioError>;

#[derive(Debug, thiserror::Error)]
pub enum StudioError {
    /// The runtime task has exited and no longer accepts commands
    #[error("the studio runtime has stopped")]
    Stopped,
}
