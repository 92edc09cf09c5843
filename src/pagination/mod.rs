//! URL-driven pagination: page window computation, canonical page links,
//! and the binding between page-change requests and the host location.

mod link;
mod navigate;
mod view;

pub use link::*;
pub use navigate::*;
pub use view::*;
