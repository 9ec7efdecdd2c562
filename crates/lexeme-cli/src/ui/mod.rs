pub mod line;
pub mod terminal;
pub mod traits;

pub use line::LineSurface;
pub use terminal::TerminalSurface;
pub use traits::{Cancelled, EndOfInput, Surface, is_cancelled, is_end_of_input};
