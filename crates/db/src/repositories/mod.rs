//! Repository layer for data access.

pub mod sequence;
pub mod transaction;

pub use sequence::{SequenceAllocator, SequenceError};
pub use transaction::{
    CreateTransactionInput, TransactionError, TransactionRepository, UpdateTransactionInput,
};
