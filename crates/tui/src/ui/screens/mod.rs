pub mod add_method;
pub mod add_transaction;
pub mod summary;
pub mod transactions;
