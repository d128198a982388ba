//! Map-binding layer: capability traits for the foreign widget and overlay
//! scene libraries, plus the glue that mounts, fits, and tears them down.

pub mod binding;
pub mod error;
pub mod mock;
pub mod types;
pub mod widget;

pub use binding::*;
pub use error::*;
pub use types::*;
pub use widget::*;
