//! Screen placement helpers shared by the application windows.

pub mod position;
