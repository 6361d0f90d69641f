use crate::error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns an invalid argument error from the enclosing function unless `$cond`
/// holds. The error names the argument and quotes the violated condition.
#[macro_export]
macro_rules! verify_arg {
    ($name:ident, $cond:expr) => {
        if !($cond) {
            return Err($crate::error::Error::invalid_arg(
                stringify!($name),
                stringify!($cond),
            )
            .into());
        }
    };
}

/// Returns an invalid format error from the enclosing function unless `$cond`
/// holds. Used while decoding persisted text.
#[macro_export]
macro_rules! verify_data {
    ($name:ident, $cond:expr) => {
        if !($cond) {
            return Err($crate::error::Error::invalid_format(
                stringify!($name),
                format!("check failed: {}", stringify!($cond)),
            )
            .into());
        }
    };
}
