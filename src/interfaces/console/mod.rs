//! Line-oriented console for operating the client from a terminal.

pub mod command;
pub mod session;
