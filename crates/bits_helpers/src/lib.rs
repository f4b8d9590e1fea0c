mod bit;
pub use bit::*;

pub mod buttons;
pub mod floating_text;
pub mod input;
pub mod play_area;

mod ribbit_communication;
pub use ribbit_communication::*;
