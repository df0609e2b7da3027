use std::fmt::Display;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Wrong number of indices, or a size/rank that does not line up.
    #[error("{context}: expected {expected}, got {got}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("Index {index} is out of bound for dimension {dim} with size {size}")]
    IndexOutOfRange {
        index: usize,
        dim: usize,
        size: usize,
    },

    #[error("Dimension out of range (expected to be in range of [0, {n_dim}), but got {dim})")]
    DimensionOutOfRange { dim: usize, n_dim: usize },

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Iterator out of range: {0}")]
    IteratorOutOfRange(&'static str),

    #[error("Iterators belong to different tensors")]
    OwnerMismatch,

    /// A broken internal invariant.
    #[error("Message: {0}")]
    Msg(String),

    #[error("{inner}\n{backtrace}")]
    WithBacktrace {
        inner: Box<Self>,
        backtrace: Box<std::backtrace::Backtrace>,
    },

    /// An error annotated with what was being attempted.
    #[error("{context}: {wrapped}")]
    WrappedContext {
        wrapped: Box<dyn std::error::Error + Send + Sync>,
        context: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid<M: Display>(msg: M) -> Self {
        Self::InvalidOperation(msg.to_string())
    }

    pub fn bt(self) -> Self {
        let backtrace = std::backtrace::Backtrace::capture();
        match backtrace.status() {
            std::backtrace::BacktraceStatus::Disabled
            | std::backtrace::BacktraceStatus::Unsupported => self,
            _ => Self::WithBacktrace {
                inner: Box::new(self),
                backtrace: Box::new(backtrace),
            },
        }
    }

    /// The underlying error with any captured backtrace or context peeled off.
    pub fn inner(&self) -> &Self {
        match self {
            Self::WithBacktrace { inner, .. } => inner.inner(),
            Self::WrappedContext { wrapped, .. } => match wrapped.downcast_ref::<Self>() {
                Some(err) => err.inner(),
                None => self,
            },
            other => other,
        }
    }
}

#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::Msg(format!($msg).into()).bt())
    };
    ($err:expr $(,)?) => {
        return Err($crate::Error::Msg(format!($err).into()).bt())
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::Msg(format!($fmt, $($arg)*).into()).bt())
    };
}

pub(crate) mod private {
    pub trait Sealed {}

    impl<T, E> Sealed for std::result::Result<T, E> where E: std::error::Error {}
}

/// Attach more context to an error.
pub trait Context<T, E>: private::Sealed {
    /// Wrap the error value with additional context.
    fn context<C>(self, context: C) -> std::result::Result<T, Error>
    where
        C: Display + Send + Sync + 'static;

    /// Wrap the error value with additional context that is evaluated lazily
    /// only once an error does occur.
    fn with_context<C, F>(self, f: F) -> std::result::Result<T, Error>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E> Context<T, E> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> std::result::Result<T, Error>
    where
        C: Display + Send + Sync + 'static,
    {
        match self {
            Ok(ok) => Ok(ok),
            Err(error) => Err(Error::WrappedContext {
                wrapped: Box::new(error),
                context: context.to_string(),
            }),
        }
    }

    fn with_context<C, F>(self, context: F) -> std::result::Result<T, Error>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        match self {
            Ok(ok) => Ok(ok),
            Err(error) => Err(Error::WrappedContext {
                wrapped: Box::new(error),
                context: context().to_string(),
            }),
        }
    }
}
