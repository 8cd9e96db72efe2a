//! Error type shared by the clinic repository ports.

use super::define_port_error;

define_port_error! {
    /// Errors raised by repository adapters.
    pub enum RepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "repository query failed: {message}",
        /// A unique constraint rejected the write.
        Duplicate { message: String } => "duplicate value: {message}",
        /// The record cannot be deleted while other records reference it.
        StillReferenced { message: String } => "record is still referenced: {message}",
        /// The write points at a record that does not exist.
        MissingReference { message: String } => "referenced record does not exist: {message}",
    }
}
