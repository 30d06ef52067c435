use enc_core::EncError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Actor(#[from] EncError),
}

pub type SimResult<T> = Result<T, SimError>;
