//! # Table Error Types
//!
//! Errors raised while decoding or publishing host frames.
//! Reading a published table never fails.

use thiserror::Error;

/// Errors that can occur when loading host tables.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// Frame byte length is not a whole number of records.
    #[error("frame length {len} is not a multiple of the record size {record_size}")]
    LengthMismatch {
        /// Byte length received.
        len: usize,
        /// Size of one record.
        record_size: usize,
    },

    /// Frame has a different slot count than the table it replaces.
    #[error("capacity mismatch: table has {expected} slots, frame has {actual}")]
    CapacityMismatch {
        /// Slots in the existing table.
        expected: usize,
        /// Slots in the incoming frame.
        actual: usize,
    },

    /// Frame contains no records.
    #[error("frame contains no records")]
    Empty,
}

/// Result type for table operations.
pub type TableResult<T> = Result<T, TableError>;
