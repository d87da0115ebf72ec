mod compose;
mod listing;
mod reader;
mod statusbar;

pub use compose::*;
pub use listing::*;
pub use reader::*;
pub use statusbar::*;
