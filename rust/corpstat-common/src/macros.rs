/// Unwraps an `Ok` value, or returns `Some(Err(..))` from the enclosing function.
///
/// Meant for `Iterator::next` implementations that yield `Result` items, such as
/// line-by-line record readers.
#[macro_export]
macro_rules! try_or_ret_some_err {
    ($expr:expr $(,)?) => {
        match $expr {
            Ok(value) => value,
            Err(err) => return Some(Err(::core::convert::From::from(err))),
        }
    };
}
