pub mod negotiation;
pub mod prepare_tip;
pub mod responses;
pub mod tip;
pub mod tip_amount;
