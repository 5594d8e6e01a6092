use std::io::{self, BufRead};

use crate::coordinate::Coordinate;
use crate::error::{MalformedKind, Record};
use crate::Atom;

/// Read the next line into `buf`, including its line ending.
///
/// Returns `false` once the reader is exhausted.
#[inline]
pub(crate) fn read_line<R: BufRead>(file: &mut R, buf: &mut String) -> io::Result<bool> {
    buf.clear();
    let nbytes = file.read_line(buf)?;
    Ok(nbytes > 0)
}

/// Parse a frame header, which holds the number of atoms in the frame.
pub(crate) fn parse_header(line: &str) -> Result<usize, MalformedKind> {
    let value = line.trim();
    value.parse().map_err(|_| MalformedKind::InvalidHeader {
        value: value.to_string(),
    })
}

/// Split a line into exactly `N` whitespace-separated fields.
pub(crate) fn split_fields<const N: usize>(
    line: &str,
    record: Record,
) -> Result<[&str; N], MalformedKind> {
    let mut fields = [""; N];
    let mut found = 0;
    for field in line.split_whitespace() {
        if let Some(slot) = fields.get_mut(found) {
            *slot = field;
        }
        found += 1;
    }

    if found != N {
        return Err(MalformedKind::TokenCount {
            record,
            expected: N,
            found,
        });
    }
    Ok(fields)
}

fn parse_coordinates(fields: [&str; 3], out: &mut [Coordinate; 3]) -> Result<(), MalformedKind> {
    for (value, field) in out.iter_mut().zip(fields) {
        *value = field.parse().map_err(|_| MalformedKind::InvalidNumber {
            value: field.to_string(),
        })?;
    }
    Ok(())
}

/// Parse the three box edge lengths.
#[inline]
pub(crate) fn parse_boxdim(line: &str, boxdim: &mut [Coordinate; 3]) -> Result<(), MalformedKind> {
    let fields = split_fields::<3>(line, Record::Box)?;
    parse_coordinates(fields, boxdim)
}

/// Parse an atom record into `atom`, reusing its label allocation.
#[inline]
pub(crate) fn parse_atom(line: &str, atom: &mut Atom) -> Result<(), MalformedKind> {
    let [label, x, y, z] = split_fields::<4>(line, Record::Atom)?;
    parse_coordinates([x, y, z], &mut atom.position)?;
    atom.label.clear();
    atom.label.push_str(label);
    Ok(())
}
