//! Domain types for the banking client: money amounts, input slots and how
//! they parse, the merchant catalogue, request and response schemas, and the
//! backend port.

pub mod amount;
pub mod field;
pub mod merchant;
pub mod operation;
pub mod ports;
