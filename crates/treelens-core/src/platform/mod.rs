/// Platform-specific helpers: default filesystem roots and the hidden
/// attribute.
pub mod hidden;
pub mod roots;

pub use hidden::is_hidden;
pub use roots::default_roots;
