pub mod commands;
pub mod interrupt;
pub mod session;

pub use commands::{Cli, run};
pub use interrupt::Interrupt;
