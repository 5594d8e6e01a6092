//! Convert xyz trajectories from nanometers to Angstroms.
//!
//! A trajectory is a sequence of frames. Each frame consists of a header line with the number of
//! atoms, a line with the three box edge lengths, and one line per atom holding a label and
//! three coordinates:
//!
//! ```text
//! 2
//! 1.0 2.0 3.0
//! OW 0.123 0.456 0.789
//! HW 0.2 0.5 0.8
//! ```
//!
//! Lengths are kept as decimals ([`Coordinate`]), so converting to Angstroms is exact.
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use glam::DVec3;
use log::{debug, info, trace};

pub use crate::coordinate::{Coordinate, ParseCoordinateError, NM_TO_ANGSTROM};
pub use crate::error::{ConvertError, MalformedKind, Record, Result};
use crate::reader::{parse_atom, parse_boxdim, parse_header, read_line};

pub mod coordinate;
pub mod error;
mod reader;

/// The number of frames in the alanine dipeptide trajectory.
pub const NFRAMES: usize = 546;

/// The trajectory that is converted when no other path is given.
pub const DEFAULT_INPUT: &str = "diala_traj_nm.xyz";

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Atom {
    pub label: String,
    pub position: [Coordinate; 3],
}

impl Atom {
    pub fn coord(&self) -> DVec3 {
        let [x, y, z] = &self.position;
        DVec3::new(x.to_f64(), y.to_f64(), z.to_f64())
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Frame {
    /// Box edge lengths.
    pub boxdim: [Coordinate; 3],
    pub atoms: Vec<Atom>,
}

impl Frame {
    pub fn natoms(&self) -> usize {
        self.atoms.len()
    }

    pub fn boxvec(&self) -> DVec3 {
        let [x, y, z] = &self.boxdim;
        DVec3::new(x.to_f64(), y.to_f64(), z.to_f64())
    }

    pub fn coords<'f>(&'f self) -> impl Iterator<Item = DVec3> + 'f {
        self.atoms.iter().map(Atom::coord)
    }

    /// Convert all lengths in this [`Frame`] from nanometers to Angstroms.
    ///
    /// Atom labels are left untouched.
    pub fn to_angstrom(&mut self) {
        let positions = self.atoms.iter_mut().flat_map(|atom| atom.position.iter_mut());
        for value in self.boxdim.iter_mut().chain(positions) {
            value.to_angstrom();
        }
    }
}

#[derive(Debug)]
pub struct XYZReader<R> {
    pub file: R,
    /// The number of lines read so far.
    line: usize,
    step: usize,
    buf: String,
}

impl XYZReader<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> XYZReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            file: reader,
            line: 0,
            step: 0,
            buf: String::new(),
        }
    }

    /// The number of lines that have been consumed.
    pub fn line(&self) -> usize {
        self.line
    }

    /// The number of frames that have been read.
    pub fn step(&self) -> usize {
        self.step
    }

    fn next_line(&mut self) -> Result<&str> {
        if !read_line(&mut self.file, &mut self.buf)? {
            return Err(ConvertError::Truncated {
                frame: self.step,
                line: self.line + 1,
            });
        }
        self.line += 1;
        Ok(&self.buf)
    }

    fn malformed(&self, kind: MalformedKind) -> ConvertError {
        ConvertError::Malformed {
            line: self.line,
            kind,
        }
    }

    /// Reads the next [`Frame`] into `frame` and advances one step.
    ///
    /// The allocations in `frame` are reused. If an error is returned, the contents of `frame`
    /// should not be depended upon.
    pub fn read_frame(&mut self, frame: &mut Frame) -> Result<()> {
        let header = self.next_line()?;
        let natoms = parse_header(header).map_err(|kind| self.malformed(kind))?;

        let boxdim = self.next_line()?;
        parse_boxdim(boxdim, &mut frame.boxdim).map_err(|kind| self.malformed(kind))?;

        frame.atoms.resize_with(natoms, Atom::default);
        for atom in &mut frame.atoms {
            let line = self.next_line()?;
            parse_atom(line, atom).map_err(|kind| self.malformed(kind))?;
        }

        self.step += 1;

        Ok(())
    }

    /// A convenience function to read `nframes` frames at once.
    ///
    /// It is likely more efficient to use [`XYZReader::read_frame`] if you are only interested in
    /// the values of a single frame at a time.
    pub fn read_frames(&mut self, nframes: usize) -> Result<Box<[Frame]>> {
        let mut frames = Vec::with_capacity(nframes);
        for _ in 0..nframes {
            let mut frame = Frame::default();
            self.read_frame(&mut frame)?;
            frames.push(frame);
        }
        Ok(frames.into_boxed_slice())
    }
}

#[derive(Debug)]
pub struct XYZWriter<W> {
    pub file: W,
}

impl<W: Write> XYZWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { file: writer }
    }

    /// Write a [`Frame`] with single spaces between fields.
    pub fn write_frame(&mut self, frame: &Frame) -> std::io::Result<()> {
        let file = &mut self.file;
        writeln!(file, "{}", frame.natoms())?;
        let [x, y, z] = &frame.boxdim;
        writeln!(file, "{x} {y} {z}")?;
        for atom in &frame.atoms {
            let [x, y, z] = &atom.position;
            writeln!(file, "{} {x} {y} {z}", atom.label)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.file.flush()
    }

    pub fn into_inner(self) -> W {
        self.file
    }
}

/// Read `nframes` frames in nanometers from `reader` and write them in Angstroms to `writer`.
///
/// Returns the number of frames that were written. Anything after the last frame is left unread.
///
/// # Errors
///
/// Stops at the first frame that is malformed or cut short. Nothing of that frame is written, but
/// the frames before it are flushed to `writer`.
pub fn convert<R: BufRead, W: Write>(
    reader: &mut XYZReader<R>,
    writer: &mut XYZWriter<W>,
    nframes: usize,
) -> Result<usize> {
    let mut frame = Frame::default();
    for idx in 0..nframes {
        if let Err(err) = reader.read_frame(&mut frame) {
            writer.flush()?;
            return Err(err);
        }
        frame.to_angstrom();
        debug!(
            "frame {idx}: {} atoms, box {} Å",
            frame.natoms(),
            frame.boxvec()
        );
        trace!("frame {idx} ends at line {}", reader.line());
        writer.write_frame(&frame)?;
    }
    writer.flush()?;
    info!("converted {nframes} frames ({} lines)", reader.line());

    Ok(nframes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WATER: &str = "\
3
1.0 2.0 3.0
OW 0.123 0.456 0.789
HW1 0.2 0.5 0.8
HW2 -0.05 0.41 0.77
";

    #[test]
    fn read_water() -> Result<()> {
        let mut reader = XYZReader::new(WATER.as_bytes());
        let mut frame = Frame::default();
        reader.read_frame(&mut frame)?;

        assert_eq!(frame.natoms(), 3);
        assert_eq!(frame.boxvec(), DVec3::new(1.0, 2.0, 3.0));
        let labels: Vec<_> = frame.atoms.iter().map(|a| a.label.as_str()).collect();
        assert_eq!(labels, ["OW", "HW1", "HW2"]);
        assert_eq!(frame.coords().nth(2), Some(DVec3::new(-0.05, 0.41, 0.77)));
        assert_eq!(reader.line(), 5);
        assert_eq!(reader.step(), 1);
        Ok(())
    }

    #[test]
    fn frame_to_angstrom() -> Result<()> {
        let mut reader = XYZReader::new(WATER.as_bytes());
        let mut frame = Frame::default();
        reader.read_frame(&mut frame)?;
        let nm = frame.clone();
        frame.to_angstrom();

        assert_eq!(frame.boxvec(), DVec3::new(10.0, 20.0, 30.0));
        for (a, b) in frame.atoms.iter().zip(&nm.atoms) {
            assert_eq!(a.label, b.label);
            assert!(a.coord().abs_diff_eq(b.coord() * 10.0, 1e-12));
        }
        Ok(())
    }

    #[test]
    fn write_water() -> Result<()> {
        let mut reader = XYZReader::new(WATER.as_bytes());
        let mut writer = XYZWriter::new(Vec::new());
        let n = convert(&mut reader, &mut writer, 1)?;
        assert_eq!(n, 1);

        let output = String::from_utf8(writer.into_inner()).unwrap();
        let expected = "\
3
10.0 20.0 30.0
OW 1.23 4.56 7.89
HW1 2.0 5.0 8.0
HW2 -0.5 4.1 7.7
";
        assert_eq!(output, expected);
        Ok(())
    }

    #[test]
    fn frame_buffer_shrinks() -> Result<()> {
        let data = "2\n1 1 1\nA 0 0 0\nB 0 0 0\n1\n1 1 1\nC 0.1 0.1 0.1\n";
        let mut reader = XYZReader::new(data.as_bytes());
        let mut frame = Frame::default();
        reader.read_frame(&mut frame)?;
        assert_eq!(frame.natoms(), 2);
        reader.read_frame(&mut frame)?;
        assert_eq!(frame.natoms(), 1);
        assert_eq!(frame.atoms[0].label, "C");
        Ok(())
    }

    #[test]
    fn empty_frame() -> Result<()> {
        let mut reader = XYZReader::new("0\n1.0 1.0 1.0\n".as_bytes());
        let mut writer = XYZWriter::new(Vec::new());
        convert(&mut reader, &mut writer, 1)?;
        assert_eq!(writer.into_inner(), b"0\n10.0 10.0 10.0\n");
        Ok(())
    }

    #[test]
    fn truncated_in_atoms() {
        let data = "3\n1.0 2.0 3.0\nOW 0.1 0.2 0.3\n";
        let mut reader = XYZReader::new(data.as_bytes());
        let mut frame = Frame::default();
        let err = reader.read_frame(&mut frame).unwrap_err();
        assert!(matches!(err, ConvertError::Truncated { frame: 0, line: 4 }));
    }

    #[test]
    fn malformed_box_reports_line() {
        let data = format!("{WATER}3\n1.0 2.0\n");
        let mut reader = XYZReader::new(data.as_bytes());
        let mut writer = XYZWriter::new(Vec::new());
        let err = convert(&mut reader, &mut writer, 2).unwrap_err();
        assert_eq!(err.line(), Some(7));
        assert!(matches!(
            err,
            ConvertError::Malformed {
                kind: MalformedKind::TokenCount {
                    record: Record::Box,
                    expected: 3,
                    found: 2
                },
                ..
            }
        ));
        // Only the first frame made it out.
        let output = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(output.lines().count(), 5);
        assert!(output.ends_with("HW2 -0.5 4.1 7.7\n"));
    }
}
