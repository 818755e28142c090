use thiserror::Error;

use crate::channels::ChannelError;

pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("the kitchen is no longer taking shutdown requests")]
    GeneratorGone,

    #[error("the kitchen thread panicked")]
    GeneratorPanicked,

    #[error("failed to start the kitchen thread: {0}")]
    SpawnFailed(#[from] std::io::Error),

    #[error("pipeline channel failed: {0}")]
    Channel(#[from] ChannelError),
}
