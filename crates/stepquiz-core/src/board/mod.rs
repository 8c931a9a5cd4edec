mod drag;
mod surface;

pub use drag::DragState;
pub use surface::{Board, Item, Location, Slot};
