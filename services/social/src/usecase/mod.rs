pub mod deletion;
pub mod membership;
pub mod read;
pub mod relation;
pub mod toggle;
