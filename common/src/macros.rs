//! Small helper macros.
//!

/// Build a `PathBuf` out of a list of components.
///
/// ```
/// use std::path::PathBuf;
/// use navplot_common::makepath;
///
/// let p: PathBuf = makepath!("/home", ".config", "navplot");
/// assert_eq!(PathBuf::from("/home/.config/navplot"), p);
/// ```
///
#[macro_export]
macro_rules! makepath {
    ($($item:expr),+) => {
        [
        $(::std::path::PathBuf::from($item),)+
        ]
        .iter()
        .collect::<::std::path::PathBuf>()
    };
}
