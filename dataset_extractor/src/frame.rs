use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use log::info;
use ndarray::{Array2, ArrayView1, ArrayView2};

use crate::{ExtractErr, Result};

/// The first bytes of every `.sia` file.
pub const MAGIC: &[u8; 4] = b"SIA1";

/// A table of samples: one row of `x_size` features and one row of `y_size` labels per sample.
#[derive(Debug, Clone, PartialEq)]
pub struct TensorFrame {
    x: Array2<f32>,
    y: Array2<f32>,
}

impl TensorFrame {
    pub fn new(x_size: usize, y_size: usize) -> Self {
        Self {
            x: Array2::zeros((0, x_size)),
            y: Array2::zeros((0, y_size)),
        }
    }

    pub fn rows(&self) -> usize {
        self.x.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.rows() == 0
    }

    pub fn x_size(&self) -> usize {
        self.x.ncols()
    }

    pub fn y_size(&self) -> usize {
        self.y.ncols()
    }

    pub fn x(&self) -> ArrayView2<'_, f32> {
        self.x.view()
    }

    pub fn y(&self) -> ArrayView2<'_, f32> {
        self.y.view()
    }

    fn check_widths(&self, x: usize, y: usize) -> Result<()> {
        if x != self.x_size() || y != self.y_size() {
            return Err(ExtractErr::Format(format!(
                "sample of widths ({x}, {y}) doesn't fit a frame of widths ({}, {})",
                self.x_size(),
                self.y_size()
            )));
        }

        Ok(())
    }

    fn push_rows(&mut self, x: ArrayView1<f32>, y: ArrayView1<f32>) -> Result<()> {
        let shape_err = |e: ndarray::ShapeError| ExtractErr::Format(e.to_string());

        self.x.push_row(x).map_err(shape_err)?;
        self.y.push_row(y).map_err(shape_err)?;
        Ok(())
    }

    /// Appends a sample.
    ///
    /// # Returns
    /// An error if `x` or `y` don't match the frame's widths, in which case nothing is appended.
    pub fn push(&mut self, x: &[f32], y: &[f32]) -> Result<()> {
        self.check_widths(x.len(), y.len())?;
        self.push_rows(ArrayView1::from(x), ArrayView1::from(y))
    }

    /// Appends a sample of raw bytes, each byte becomes one `f32`.
    pub fn push_bytes(&mut self, x: &[u8], y: &[u8]) -> Result<()> {
        self.check_widths(x.len(), y.len())?;

        let x: Vec<f32> = x.iter().copied().map(f32::from).collect();
        let y: Vec<f32> = y.iter().copied().map(f32::from).collect();
        self.push_rows(ArrayView1::from(&x), ArrayView1::from(&y))
    }

    /// Writes the frame to `path` in the `.sia` format.
    ///
    /// The header is the magic followed by the row count and both widths as big endian `u64`,
    /// then every feature and every label as little endian `f32`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);

        writer.write_all(MAGIC)?;
        for n in [self.rows(), self.x_size(), self.y_size()] {
            writer.write_all(&(n as u64).to_be_bytes())?;
        }

        write_values(&mut writer, self.x.iter().copied())?;
        write_values(&mut writer, self.y.iter().copied())?;
        writer.flush()?;

        info!(path:? = path, rows = self.rows(); "saved frame");
        Ok(())
    }

    /// Reads a frame written by `save`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut reader = BufReader::new(File::open(path)?);

        let mut magic = [0; 4];
        reader.read_exact(&mut magic)?;
        if &magic != MAGIC {
            return Err(ExtractErr::Format(format!("bad frame magic {magic:?}")));
        }

        let rows = read_len(&mut reader)?;
        let x_size = read_len(&mut reader)?;
        let y_size = read_len(&mut reader)?;

        let x = read_values(&mut reader, rows, x_size)?;
        let y = read_values(&mut reader, rows, y_size)?;

        Ok(Self { x, y })
    }
}

fn write_values<W, I>(writer: &mut W, values: I) -> Result<()>
where
    W: Write,
    I: Iterator<Item = f32>,
{
    let words: Vec<u32> = values.map(|v| v.to_bits().to_le()).collect();
    writer.write_all(bytemuck::cast_slice(&words))?;
    Ok(())
}

fn read_len<R: Read>(reader: &mut R) -> Result<usize> {
    let mut buf = [0; 8];
    reader.read_exact(&mut buf)?;

    usize::try_from(u64::from_be_bytes(buf))
        .map_err(|_| ExtractErr::Format("frame dimension overflows usize".into()))
}

/// Reads exactly `len` bytes, growing the buffer only as bytes arrive so a header claiming more
/// than the stream holds can't allocate it up front.
///
/// # Returns
/// `ExtractErr::Format` if the stream ends before `len` bytes.
pub(crate) fn read_counted<R: Read>(reader: &mut R, len: usize, what: &str) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    reader.by_ref().take(len as u64).read_to_end(&mut bytes)?;

    if bytes.len() < len {
        return Err(ExtractErr::Format(format!(
            "{what} truncated: {} of {len} bytes",
            bytes.len()
        )));
    }

    Ok(bytes)
}

fn read_values<R: Read>(reader: &mut R, rows: usize, cols: usize) -> Result<Array2<f32>> {
    let len = rows
        .checked_mul(cols)
        .and_then(|n| n.checked_mul(size_of::<f32>()))
        .ok_or_else(|| ExtractErr::Format("frame too large".into()))?;

    let values = read_counted(reader, len, "frame")?
        .chunks_exact(size_of::<f32>())
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();

    Array2::from_shape_vec((rows, cols), values).map_err(|e| ExtractErr::Format(e.to_string()))
}
