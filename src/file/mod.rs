//! PE container access for managed assemblies.
//!
//! [`File`] owns the bytes of a PE image (memory-mapped from disk or held in a buffer),
//! parses the PE headers with `goblin`, and locates the CLI metadata root through the CLI
//! header's data directory. Everything above this layer works on the metadata slice only.
//!
//! # Key Components
//!
//! - [`File`] - Loaded PE image with address translation and metadata lookup
//! - [`Backend`] - Source of the image bytes ([`physical::Physical`], [`memory::Memory`])
//! - [`parser::Parser`] - The byte cursor used by every metadata decoder
//! - [`io`] - Little-endian primitive reads
//!
//! # Examples
//!
//! ```rust,no_run
//! use rdschema::File;
//! use std::path::Path;
//!
//! let file = File::from_file(Path::new("Assembly-CSharp.dll"))?;
//! let metadata = file.metadata()?;
//! println!("metadata root is {} bytes", metadata.len());
//! # Ok::<(), rdschema::Error>(())
//! ```

pub mod io;
pub mod parser;

mod memory;
mod physical;

use std::path::Path;

use crate::{
    metadata::cor20header::Cor20Header,
    Error::{Empty, GoblinErr},
    Result,
};
use goblin::pe::PE;
use memory::Memory;
use ouroboros::self_referencing;
use physical::Physical;

/// Source of the raw image bytes.
pub trait Backend: Send + Sync {
    /// Returns `len` bytes starting at `offset`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the range exceeds the data.
    fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]>;

    /// Returns the entire data buffer.
    fn data(&self) -> &[u8];

    /// Returns the total length of the data buffer.
    fn len(&self) -> usize;
}

/// Bounds-checked slice shared by both backends.
fn checked_slice(data: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    match offset.checked_add(len) {
        Some(end) if end <= data.len() => Ok(&data[offset..end]),
        _ => Err(crate::Error::OutOfBounds {
            offset,
            needed: len,
            len: data.len(),
        }),
    }
}

#[self_referencing]
/// A loaded PE image that carries a CLI header.
///
/// Loading fails early when the image has no optional header or no CLI runtime header
/// directory, so a constructed `File` always points at a managed assembly.
pub struct File {
    /// The underlying data source (memory or file).
    data: Box<dyn Backend>,
    /// The parsed PE structure, referencing the data.
    #[borrows(data)]
    #[not_covariant]
    pe: PE<'this>,
}

impl File {
    /// Memory-maps and loads the PE file at `file`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened, is empty, is not a PE image, or has
    /// no CLI runtime header.
    pub fn from_file(file: &Path) -> Result<File> {
        let input = Physical::new(file)?;

        Self::load(input)
    }

    /// Loads a PE image that is already in memory.
    ///
    /// # Errors
    /// Same conditions as [`File::from_file`], minus the I/O.
    pub fn from_mem(data: Vec<u8>) -> Result<File> {
        let input = Memory::new(data);

        Self::load(input)
    }

    fn load<T: Backend + 'static>(data: T) -> Result<File> {
        if data.len() == 0 {
            return Err(Empty);
        }

        let data = Box::new(data);

        File::try_new(data, |data| {
            let data = data.as_ref();
            match PE::parse(data.data()) {
                Ok(pe) => match pe.header.optional_header {
                    Some(optional_header) => {
                        if optional_header
                            .data_directories
                            .get_clr_runtime_header()
                            .is_none()
                        {
                            Err(malformed_error!(
                                "File does not have a CLR runtime header directory"
                            ))
                        } else {
                            Ok(pe)
                        }
                    }
                    None => Err(malformed_error!("File does not have an OptionalHeader")),
                },
                Err(error) => Err(GoblinErr(error)),
            }
        })
    }

    /// Returns the total size of the loaded file in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data().len()
    }

    /// Returns true if the loaded file is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the RVA and size of the CLI header directory.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the directory is missing.
    pub fn clr(&self) -> Result<(usize, usize)> {
        self.with_pe(|pe| {
            let Some(optional_header) = pe.header.optional_header else {
                return Err(malformed_error!("File does not have an OptionalHeader"));
            };

            let clr_dir = optional_header
                .data_directories
                .get_clr_runtime_header()
                .ok_or_else(|| {
                    malformed_error!("File does not have a CLR runtime header directory")
                })?;

            Ok((clr_dir.virtual_address as usize, clr_dir.size as usize))
        })
    }

    /// Returns the raw file bytes.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.with_data(|data| data.data())
    }

    /// Returns `len` bytes of the file starting at `offset`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the range exceeds the file.
    pub fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        self.with_data(|data| data.data_slice(offset, len))
    }

    /// Translates a relative virtual address into a file offset using the section table.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if no section contains the address.
    pub fn rva_to_offset(&self, rva: usize) -> Result<usize> {
        let rva_u32 = u32::try_from(rva)
            .map_err(|_| malformed_error!("RVA too large to fit in u32: {}", rva))?;

        self.with_pe(|pe| {
            for section in &pe.sections {
                let Some(section_max) = section.virtual_address.checked_add(section.virtual_size)
                else {
                    return Err(malformed_error!(
                        "Section malformed, causing integer overflow - {} + {}",
                        section.virtual_address,
                        section.virtual_size
                    ));
                };

                if section.virtual_address <= rva_u32 && section_max > rva_u32 {
                    return Ok((rva - section.virtual_address as usize)
                        + section.pointer_to_raw_data as usize);
                }
            }

            Err(malformed_error!(
                "RVA could not be converted to offset - {}",
                rva
            ))
        })
    }

    /// Returns the CLI metadata root (the region starting with the `BSJB` signature).
    ///
    /// # Errors
    /// Returns an error if the CLI header or the metadata directory it names does not fit
    /// inside the file.
    pub fn metadata(&self) -> Result<&[u8]> {
        let (clr_rva, clr_size) = self.clr()?;
        let clr_offset = self.rva_to_offset(clr_rva)?;
        let clr_slice = self.data_slice(clr_offset, clr_size)?;
        let header = Cor20Header::read(clr_slice)?;

        log::debug!(
            "CLI header v{}.{}: metadata at RVA {:#x}, {} bytes",
            header.major_runtime_version,
            header.minor_runtime_version,
            header.meta_data_rva,
            header.meta_data_size
        );

        let metadata_offset = self.rva_to_offset(header.meta_data_rva as usize)?;
        self.data_slice(metadata_offset, header.meta_data_size as usize)
    }
}
