//! Unit of work module for transactional write scopes.

mod r#trait;
pub use r#trait::{TxScope, UnitOfWork};

#[cfg(test)]
pub mod mock;
#[cfg(test)]
pub use mock::{MockStores, MockTxFailure, MockTxScope, MockUnitOfWork};
