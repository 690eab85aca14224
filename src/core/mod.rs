pub mod battle;
pub mod damage;
pub mod factory;
pub mod replay;
pub mod state;
pub mod utils;
