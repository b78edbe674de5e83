use thiserror::Error;

/// Why a cycle could not schedule a playlist entry.
///
/// Neither is fatal: the driver shows the fallback item instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    /// The shared configuration source returned nothing.
    #[error("no shared config")]
    NoConfig,

    /// A configuration is present but no entry is active right now.
    #[error("nothing scheduled among {entries} playlist entries")]
    NothingScheduled { entries: usize },
}

pub type Result<T> = std::result::Result<T, SchedulerError>;
