use crate::error::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Returns an `InvalidArgument` error naming `$name` from the enclosing function
/// unless `$cond` holds.
///
/// The condition text becomes the error message, so it should read as the
/// requirement (`from < to`), not its violation.
#[macro_export]
macro_rules! verify_arg {
    ($name:ident, $cond:expr $(,)?) => {
        if !$cond {
            return Err(
                $crate::error::Error::invalid_arg(stringify!($name), stringify!($cond)).into(),
            );
        }
    };
}

/// Same as [`verify_arg!`], for externally supplied data: the error is
/// `InvalidFormat` and `$name` names the offending element.
#[macro_export]
macro_rules! verify_data {
    ($name:ident, $cond:expr $(,)?) => {
        if !$cond {
            return Err(
                $crate::error::Error::invalid_format(stringify!($name), stringify!($cond)).into(),
            );
        }
    };
}
