pub mod simple;

pub use simple::{choose_first, choose_highest_power, MoveChooser};
