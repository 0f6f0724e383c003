use crate::domain::operation::Operation;
use crate::error::{RegistryError, Result};
use std::io::Read;

/// Reads registry operations from a CSV source.
///
/// Wraps `csv::Reader` and provides an iterator over `Result<Operation>`.
/// Whitespace is trimmed and record lengths are flexible, so trailing
/// empty columns may be omitted.
pub struct OperationReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> OperationReader<R> {
    /// Creates a new `OperationReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes operations,
    /// so large batches stream without being loaded into memory.
    pub fn operations(self) -> impl Iterator<Item = Result<Operation>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(RegistryError::from))
    }
}
