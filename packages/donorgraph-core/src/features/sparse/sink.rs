//! Coordinate sinks: where projected entries go while pairs are scored
//!
//! [`MemorySink`] keeps the triplets in memory. [`SpillSink`] streams them to
//! an anonymous temp file as fixed-width records:
//!
//! ```text
//! [u32_le row][u32_le col][f64_le weight]   16 bytes per entry
//! ```
//!
//! Both yield the same [`CooMatrix`], entries in push order.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

use super::matrix::CooMatrix;
use super::SparseError;

pub const SPILL_RECORD_BYTES: usize = 16;

pub trait CooSink {
    fn push(&mut self, row: u32, col: u32, weight: f64) -> io::Result<()>;

    /// Entries pushed so far
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consume the sink into an N×N matrix
    fn into_matrix(self, n: u32) -> Result<CooMatrix, SparseError>;
}

#[derive(Debug, Default)]
pub struct MemorySink {
    rows: Vec<u32>,
    cols: Vec<u32>,
    weights: Vec<f64>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CooSink for MemorySink {
    fn push(&mut self, row: u32, col: u32, weight: f64) -> io::Result<()> {
        self.rows.push(row);
        self.cols.push(col);
        self.weights.push(weight);
        Ok(())
    }

    fn len(&self) -> usize {
        self.weights.len()
    }

    fn into_matrix(self, n: u32) -> Result<CooMatrix, SparseError> {
        CooMatrix::from_triplets(n, self.rows, self.cols, self.weights)
    }
}

/// Disk-backed sink; the spill file is removed when the sink is dropped
#[derive(Debug)]
pub struct SpillSink {
    writer: BufWriter<File>,
    len: usize,
}

impl SpillSink {
    /// Create a spill file inside `dir`
    pub fn new_in(dir: impl AsRef<Path>) -> io::Result<Self> {
        let file = tempfile::tempfile_in(dir)?;
        Ok(Self {
            writer: BufWriter::new(file),
            len: 0,
        })
    }

    /// Create a spill file in the system temp directory
    pub fn new() -> io::Result<Self> {
        let file = tempfile::tempfile()?;
        Ok(Self {
            writer: BufWriter::new(file),
            len: 0,
        })
    }

    /// Bytes written so far
    pub fn spilled_bytes(&self) -> usize {
        self.len * SPILL_RECORD_BYTES
    }
}

impl CooSink for SpillSink {
    fn push(&mut self, row: u32, col: u32, weight: f64) -> io::Result<()> {
        self.writer.write_u32::<LittleEndian>(row)?;
        self.writer.write_u32::<LittleEndian>(col)?;
        self.writer.write_f64::<LittleEndian>(weight)?;
        self.len += 1;
        Ok(())
    }

    fn len(&self) -> usize {
        self.len
    }

    fn into_matrix(mut self, n: u32) -> Result<CooMatrix, SparseError> {
        self.writer.flush()?;
        let mut file = self.writer.into_inner().map_err(|e| e.into_error())?;
        file.seek(SeekFrom::Start(0))?;

        let mut reader = BufReader::new(file);
        let mut rows = Vec::with_capacity(self.len);
        let mut cols = Vec::with_capacity(self.len);
        let mut weights = Vec::with_capacity(self.len);
        for _ in 0..self.len {
            rows.push(reader.read_u32::<LittleEndian>()?);
            cols.push(reader.read_u32::<LittleEndian>()?);
            weights.push(reader.read_f64::<LittleEndian>()?);
        }

        CooMatrix::from_triplets(n, rows, cols, weights)
    }
}
