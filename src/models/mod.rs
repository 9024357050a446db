pub mod action;
pub mod transfer;
