use crate::core::models::soup::Soup;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Defines the interface for reading structure file formats into a [`Soup`].
///
/// Implementors handle format-specific parsing; the path and string entry
/// points are provided on top of [`StructureFile::read_from`].
pub trait StructureFile {
    /// The type of metadata associated with the file format.
    type Metadata;

    /// The error type for read operations.
    type Error: Error + From<io::Error>;

    /// Reads a structure from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if the reader fails or the input holds no usable
    /// structure.
    fn read_from(reader: &mut impl BufRead) -> Result<(Soup, Self::Metadata), Self::Error>;

    /// Reads a structure from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<(Soup, Self::Metadata), Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Reads a structure from in-memory text.
    fn read_from_str(text: &str) -> Result<(Soup, Self::Metadata), Self::Error> {
        let mut reader = text.as_bytes();
        Self::read_from(&mut reader)
    }
}
