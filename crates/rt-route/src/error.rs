use rt_core::RouteId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("duplicate route {0}")]
    Duplicate(RouteId),

    #[error("no route ids left for {0:?} and its reverse")]
    IdsExhausted(String),

    #[error("route parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type RouteResult<T> = Result<T, RouteError>;
