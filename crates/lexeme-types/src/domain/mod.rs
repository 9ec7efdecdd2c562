pub mod category;
pub mod entry;
pub mod poem;

pub use category::*;
pub use entry::*;
pub use poem::*;
