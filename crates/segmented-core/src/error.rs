use thiserror::Error;

#[derive(Debug, Error)]
pub enum UiError {
    #[error("layout failed: {0}")]
    Layout(#[from] taffy::TaffyError),

    #[error("index {index} out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },
}

pub type UiResult<T> = Result<T, UiError>;
