//! Request and response bodies

pub mod claims;
pub mod customers;
pub mod pool;
pub mod repairs;
