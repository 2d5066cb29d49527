pub mod axis_index;
pub mod export;
pub mod grid;
pub mod observation;
pub mod selection;
pub mod severity;
