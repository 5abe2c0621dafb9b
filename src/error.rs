use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("no monitor found")]
    NoMonitor,
    #[error("captured frame could not be converted to RGBA")]
    FrameConversion,
    #[error("selection is empty")]
    EmptySelection,
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),
    #[error("transfer command failed with {status}")]
    TransferFailed { status: std::process::ExitStatus },
}
