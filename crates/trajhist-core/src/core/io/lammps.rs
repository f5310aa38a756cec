use super::error::{DumpParseErrorKind, TrajectoryError};
use super::source::FrameSource;
use crate::core::models::cell::SimulationCell;
use crate::core::models::frame::Frame;
use nalgebra::Point3;
use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::Path;
use tracing::{debug, trace};

const ITEM_PREFIX: &str = "ITEM:";
const TIMESTEP_HEADER: &str = "ITEM: TIMESTEP";

#[derive(Debug, Clone, Copy)]
struct SnapshotOffset {
    byte: u64,
    line: usize,
}

/// Random-access reader for LAMMPS text dump files (`dump atom` / `dump custom`).
///
/// Snapshot offsets are indexed once on construction; each frame read seeks straight to
/// its `ITEM: TIMESTEP` header.
pub struct LammpsDumpReader<R> {
    reader: R,
    offsets: Vec<SnapshotOffset>,
}

impl LammpsDumpReader<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, TrajectoryError> {
        let path = path.as_ref();
        debug!("Opening LAMMPS dump {:?}", path);
        let file = File::open(path)?;
        Self::new(BufReader::new(file))
    }
}

impl<R: BufRead + Seek> LammpsDumpReader<R> {
    pub fn new(mut reader: R) -> Result<Self, TrajectoryError> {
        let offsets = index_snapshots(&mut reader)?;
        if offsets.is_empty() {
            return Err(TrajectoryError::Empty);
        }
        debug!("Indexed {} snapshot(s)", offsets.len());
        Ok(Self { reader, offsets })
    }
}

impl<R: BufRead + Seek> FrameSource for LammpsDumpReader<R> {
    fn num_frames(&self) -> usize {
        self.offsets.len()
    }

    fn read_frame(&mut self, index: usize) -> Result<Frame, TrajectoryError> {
        let offset = *self
            .offsets
            .get(index)
            .ok_or(TrajectoryError::FrameOutOfRange {
                index,
                available: self.offsets.len(),
            })?;
        trace!("Reading snapshot {} at byte {}", index, offset.byte);
        self.reader.seek(SeekFrom::Start(offset.byte))?;
        let mut cursor = LineCursor {
            reader: &mut self.reader,
            line: offset.line - 1,
            buf: String::new(),
        };
        parse_snapshot(&mut cursor, index)
    }
}

fn index_snapshots<R: BufRead + Seek>(
    reader: &mut R,
) -> Result<Vec<SnapshotOffset>, TrajectoryError> {
    reader.seek(SeekFrom::Start(0))?;
    let mut offsets = Vec::new();
    let mut buf = String::new();
    let mut byte = 0u64;
    let mut line = 0usize;
    loop {
        buf.clear();
        let read = reader.read_line(&mut buf)?;
        if read == 0 {
            break;
        }
        line += 1;
        if buf.trim_end() == TIMESTEP_HEADER {
            offsets.push(SnapshotOffset { byte, line });
        }
        byte += read as u64;
    }
    Ok(offsets)
}

struct LineCursor<'a, R> {
    reader: &'a mut R,
    line: usize,
    buf: String,
}

impl<R: BufRead> LineCursor<'_, R> {
    fn next_line(&mut self) -> Result<(usize, &str), TrajectoryError> {
        self.buf.clear();
        let read = self.reader.read_line(&mut self.buf)?;
        self.line += 1;
        if read == 0 {
            return Err(TrajectoryError::Parse {
                line: self.line,
                kind: DumpParseErrorKind::UnexpectedEof,
            });
        }
        Ok((self.line, self.buf.trim()))
    }
}

fn parse_value<T: std::str::FromStr>(
    token: &str,
    line: usize,
    kind: fn(String) -> DumpParseErrorKind,
) -> Result<T, TrajectoryError> {
    token.parse().map_err(|_| TrajectoryError::Parse {
        line,
        kind: kind(token.to_string()),
    })
}

#[derive(Debug, Clone, Copy)]
enum CoordinateKind {
    Cartesian(usize),
    Scaled(usize),
}

#[derive(Debug)]
struct AtomColumns {
    count: usize,
    coordinates: [CoordinateKind; 3],
    species: Option<usize>,
}

impl AtomColumns {
    fn from_header(header: &str, line: usize) -> Result<Self, TrajectoryError> {
        let names: Vec<&str> = header.split_whitespace().skip(2).collect();
        let find = |candidates: &[&str]| {
            candidates
                .iter()
                .find_map(|c| names.iter().position(|n| n == c))
        };

        let mut coordinates = [CoordinateKind::Cartesian(0); 3];
        for (slot, axis) in coordinates.iter_mut().zip(['x', 'y', 'z']) {
            let cartesian = [axis.to_string(), format!("{}u", axis)];
            let scaled = [format!("{}s", axis), format!("{}su", axis)];
            let cartesian: Vec<&str> = cartesian.iter().map(String::as_str).collect();
            let scaled: Vec<&str> = scaled.iter().map(String::as_str).collect();
            *slot = if let Some(i) = find(&cartesian) {
                CoordinateKind::Cartesian(i)
            } else if let Some(i) = find(&scaled) {
                CoordinateKind::Scaled(i)
            } else {
                return Err(TrajectoryError::Parse {
                    line,
                    kind: DumpParseErrorKind::MissingCoordinates(axis),
                });
            };
        }

        Ok(Self {
            count: names.len(),
            coordinates,
            species: find(&["element", "type"]),
        })
    }
}

fn expect_item<'a>(
    line: usize,
    content: &'a str,
    expected: &'static str,
) -> Result<&'a str, TrajectoryError> {
    content
        .strip_prefix(ITEM_PREFIX)
        .map(str::trim)
        .filter(|rest| rest.starts_with(expected))
        .ok_or_else(|| TrajectoryError::Parse {
            line,
            kind: DumpParseErrorKind::UnexpectedItem {
                expected,
                found: content.to_string(),
            },
        })
}

fn parse_snapshot<R: BufRead>(
    cursor: &mut LineCursor<'_, R>,
    index: usize,
) -> Result<Frame, TrajectoryError> {
    let (line, content) = cursor.next_line()?;
    expect_item(line, content, "TIMESTEP")?;
    let (line, content) = cursor.next_line()?;
    let timestep: u64 = parse_value(content, line, DumpParseErrorKind::InvalidInt)?;

    let mut natoms: Option<usize> = None;
    let mut cell: Option<SimulationCell> = None;

    loop {
        let (line, content) = cursor.next_line()?;
        let header = content.to_string();
        if expect_item(line, &header, "NUMBER OF ATOMS").is_ok() {
            let (line, content) = cursor.next_line()?;
            natoms = Some(parse_value(content, line, DumpParseErrorKind::InvalidInt)?);
        } else if let Ok(rest) = expect_item(line, &header, "BOX BOUNDS") {
            let triclinic = rest.split_whitespace().any(|t| t == "xy");
            cell = Some(parse_box(cursor, triclinic)?);
        } else if expect_item(line, &header, "ATOMS").is_ok() {
            let natoms = natoms.ok_or_else(|| TrajectoryError::Parse {
                line,
                kind: DumpParseErrorKind::UnexpectedItem {
                    expected: "ITEM: NUMBER OF ATOMS",
                    found: header.clone(),
                },
            })?;
            let cell = cell.ok_or_else(|| TrajectoryError::Parse {
                line,
                kind: DumpParseErrorKind::UnexpectedItem {
                    expected: "ITEM: BOX BOUNDS",
                    found: header.clone(),
                },
            })?;
            let columns = AtomColumns::from_header(&header, line)?;
            let (positions, species) = parse_atoms(cursor, natoms, &columns, &cell)?;

            let mut frame = Frame::new(index, cell, positions);
            frame.timestep = Some(timestep);
            frame.species = species;
            return Ok(frame);
        } else if header.starts_with(ITEM_PREFIX) {
            // UNITS, TIME and similar items carry a single value line.
            cursor.next_line()?;
        } else {
            return Err(TrajectoryError::Parse {
                line,
                kind: DumpParseErrorKind::UnexpectedItem {
                    expected: "ITEM:",
                    found: header,
                },
            });
        }
    }
}

fn parse_box<R: BufRead>(
    cursor: &mut LineCursor<'_, R>,
    triclinic: bool,
) -> Result<SimulationCell, TrajectoryError> {
    let expected = if triclinic { 3 } else { 2 };
    let mut bounds = [(0.0, 0.0); 3];
    let mut tilts = [0.0; 3];

    for (axis, (bound, tilt)) in bounds.iter_mut().zip(tilts.iter_mut()).enumerate() {
        let (line, content) = cursor.next_line()?;
        let tokens: Vec<&str> = content.split_whitespace().collect();
        if tokens.len() < expected {
            return Err(TrajectoryError::Parse {
                line,
                kind: DumpParseErrorKind::InvalidBounds {
                    expected,
                    found: tokens.len(),
                },
            });
        }
        let lo: f64 = parse_value(tokens[0], line, DumpParseErrorKind::InvalidFloat)?;
        let hi: f64 = parse_value(tokens[1], line, DumpParseErrorKind::InvalidFloat)?;
        *bound = (lo, hi);
        if triclinic {
            *tilt = parse_value(tokens[2], line, DumpParseErrorKind::InvalidFloat)?;
        }
        trace!("Box bounds along axis {}: {} {}", axis, lo, hi);
    }

    if triclinic {
        // Dump bounds enclose the tilted box; recover the parallelepiped's own bounds.
        let [xy, xz, yz] = tilts;
        let x_min = 0.0f64.min(xy).min(xz).min(xy + xz);
        let x_max = 0.0f64.max(xy).max(xz).max(xy + xz);
        bounds[0] = (bounds[0].0 - x_min, bounds[0].1 - x_max);
        bounds[1] = (bounds[1].0 - 0.0f64.min(yz), bounds[1].1 - 0.0f64.max(yz));
    }

    Ok(SimulationCell::from_bounds(bounds))
}

type ParsedAtoms = (Vec<Point3<f64>>, Option<Vec<String>>);

fn parse_atoms<R: BufRead>(
    cursor: &mut LineCursor<'_, R>,
    natoms: usize,
    columns: &AtomColumns,
    cell: &SimulationCell,
) -> Result<ParsedAtoms, TrajectoryError> {
    let mut positions = Vec::with_capacity(natoms);
    let mut species = columns.species.map(|_| Vec::with_capacity(natoms));
    let origin = *cell.origins();
    let lengths = *cell.lengths();

    for _ in 0..natoms {
        let (line, content) = cursor.next_line()?;
        let tokens: Vec<&str> = content.split_whitespace().collect();
        if tokens.len() < columns.count {
            return Err(TrajectoryError::Parse {
                line,
                kind: DumpParseErrorKind::ColumnCount {
                    expected: columns.count,
                    found: tokens.len(),
                },
            });
        }

        let mut point = Point3::origin();
        for (axis, kind) in columns.coordinates.iter().enumerate() {
            point[axis] = match *kind {
                CoordinateKind::Cartesian(i) => {
                    parse_value(tokens[i], line, DumpParseErrorKind::InvalidFloat)?
                }
                CoordinateKind::Scaled(i) => {
                    let s: f64 = parse_value(tokens[i], line, DumpParseErrorKind::InvalidFloat)?;
                    origin[axis] + s * lengths[axis]
                }
            };
        }
        positions.push(point);

        if let (Some(names), Some(col)) = (species.as_mut(), columns.species) {
            names.push(tokens[col].to_string());
        }
    }

    Ok((positions, species))
}
