use crate::core::io::traits::MolecularFile;
use crate::core::models::atom::Atom;
use crate::core::models::system::MolecularSystem;
use nalgebra::Point3;
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XyzMetadata {
    /// The free-form second line of an XYZ frame.
    pub comment: String,
}

impl XyzMetadata {
    pub fn with_comment(comment: impl Into<String>) -> Self {
        Self {
            comment: comment.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum XyzError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: XyzParseErrorKind },
    #[error("Inconsistent data: {0}")]
    Inconsistency(String),
    #[error("Missing required record: {0}")]
    MissingRecord(String),
    #[error("Comment line must be a single line (got {0:?})")]
    MultiLineComment(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum XyzParseErrorKind {
    #[error("Invalid atom count (value: '{value}')")]
    InvalidCount { value: String },
    #[error("Invalid float format in {column} coordinate (value: '{value}')")]
    InvalidFloat { column: &'static str, value: String },
    #[error("Expected 'element x y z', got '{content}'")]
    TooFewFields { content: String },
    #[error("Unknown element symbol '{symbol}'")]
    UnknownElement { symbol: String },
}

const COORDINATE_COLUMNS: [&str; 3] = ["x", "y", "z"];

pub struct XyzFile;

impl XyzFile {
    /// Reads every frame of a (possibly multi-frame) XYZ stream in order.
    ///
    /// Frames follow each other directly; blank lines between or after frames are
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns an error on the first malformed frame, or
    /// [`XyzError::MissingRecord`] if the stream contains no frame at all.
    pub fn read_frames(
        reader: &mut impl BufRead,
    ) -> Result<Vec<(MolecularSystem, XyzMetadata)>, XyzError> {
        let mut lines = reader.lines().enumerate().map(|(i, l)| (i + 1, l));
        let mut frames = Vec::new();

        loop {
            let Some((count_line_num, count_line)) = next_non_blank(&mut lines)? else {
                break;
            };
            let count_str = count_line.trim();
            let count: usize = count_str.parse().map_err(|_| XyzError::Parse {
                line: count_line_num,
                kind: XyzParseErrorKind::InvalidCount {
                    value: count_str.to_string(),
                },
            })?;

            let comment = match lines.next() {
                Some((_, line)) => line?,
                None => {
                    return Err(XyzError::MissingRecord(format!(
                        "comment line after atom count on line {}",
                        count_line_num
                    )));
                }
            };

            let mut system = MolecularSystem::new();
            for found in 0..count {
                let (line_num, line) = match lines.next() {
                    Some((n, l)) => (n, l?),
                    None => {
                        return Err(XyzError::Inconsistency(format!(
                            "Header on line {} declares {} atoms but found {}",
                            count_line_num, count, found
                        )));
                    }
                };
                if line.trim().is_empty() {
                    return Err(XyzError::Inconsistency(format!(
                        "Header on line {} declares {} atoms but found {} before blank line {}",
                        count_line_num, count, found, line_num
                    )));
                }
                system.add_atom(parse_atom_line(&line, line_num)?);
            }

            frames.push((system, XyzMetadata { comment }));
        }

        if frames.is_empty() {
            return Err(XyzError::MissingRecord("atom count line".into()));
        }
        Ok(frames)
    }
}

fn next_non_blank(
    lines: &mut impl Iterator<Item = (usize, io::Result<String>)>,
) -> Result<Option<(usize, String)>, XyzError> {
    for (line_num, line) in lines {
        let line = line?;
        if !line.trim().is_empty() {
            return Ok(Some((line_num, line)));
        }
    }
    Ok(None)
}

fn parse_atom_line(line: &str, line_num: usize) -> Result<Atom, XyzError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 4 {
        return Err(XyzError::Parse {
            line: line_num,
            kind: XyzParseErrorKind::TooFewFields {
                content: line.trim().to_string(),
            },
        });
    }

    let mut coords = [0.0; 3];
    for (i, column) in COORDINATE_COLUMNS.iter().enumerate() {
        let value_str = parts[i + 1];
        coords[i] = value_str.parse().map_err(|_| XyzError::Parse {
            line: line_num,
            kind: XyzParseErrorKind::InvalidFloat {
                column: *column,
                value: value_str.to_string(),
            },
        })?;
    }

    Atom::new(parts[0], Point3::new(coords[0], coords[1], coords[2])).ok_or_else(|| {
        XyzError::Parse {
            line: line_num,
            kind: XyzParseErrorKind::UnknownElement {
                symbol: parts[0].to_string(),
            },
        }
    })
}

// `+ 0.0` folds negative zero into positive zero so it never prints as "-0.00000000".
fn write_atom_line(writer: &mut impl Write, atom: &Atom) -> io::Result<()> {
    writeln!(
        writer,
        "{:<2} {:>16.8} {:>16.8} {:>16.8}",
        atom.element,
        atom.position.x + 0.0,
        atom.position.y + 0.0,
        atom.position.z + 0.0
    )
}

impl MolecularFile for XyzFile {
    type Metadata = XyzMetadata;
    type Error = XyzError;

    /// Reads an XYZ stream and returns its last frame, which is the frame a
    /// trajectory-style file ends on.
    fn read_from(
        reader: &mut impl BufRead,
    ) -> Result<(MolecularSystem, Self::Metadata), Self::Error> {
        let mut frames = Self::read_frames(reader)?;
        frames
            .pop()
            .ok_or_else(|| XyzError::MissingRecord("atom count line".into()))
    }

    fn write_to(
        system: &MolecularSystem,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        if metadata.comment.contains(['\n', '\r']) {
            return Err(XyzError::MultiLineComment(metadata.comment.clone()));
        }
        writeln!(writer, "{}", system.len())?;
        writeln!(writer, "{}", metadata.comment)?;
        for atom in system.atoms() {
            write_atom_line(writer, atom)?;
        }
        Ok(())
    }

    fn write_system_to(
        system: &MolecularSystem,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        Self::write_to(system, &XyzMetadata::default(), writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const WATER: &str = "3\nwater\nO 0.0 0.0 0.1173\nH 0.0 0.7572 -0.4692\nH 0.0 -0.7572 -0.4692\n";

    fn read_str(content: &str) -> Result<(MolecularSystem, XyzMetadata), XyzError> {
        XyzFile::read_from(&mut Cursor::new(content))
    }

    #[test]
    fn reads_simple_structure() {
        let (system, metadata) = read_str(WATER).unwrap();
        assert_eq!(system.len(), 3);
        assert_eq!(metadata.comment, "water");
        assert_eq!(system.atoms()[0].element, "O");
        assert_eq!(system.atoms()[1].position, Point3::new(0.0, 0.7572, -0.4692));
    }

    #[test]
    fn extra_columns_are_ignored() {
        let content = "1\nwith charges\nNa 1.0 2.0 3.0 0.98 extra\n";
        let (system, _) = read_str(content).unwrap();
        assert_eq!(system.atoms()[0].position, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn element_symbols_are_canonicalized() {
        let (system, _) = read_str("2\n\nCL 0 0 0\nar 1 0 0\n").unwrap();
        assert_eq!(system.atoms()[0].element, "Cl");
        assert_eq!(system.atoms()[1].element, "Ar");
    }

    #[test]
    fn trailing_blank_lines_are_ignored() {
        let content = format!("{}\n\n   \n", WATER);
        let (system, _) = read_str(&content).unwrap();
        assert_eq!(system.len(), 3);
    }

    #[test]
    fn multi_frame_stream_yields_last_frame() {
        let content = "1\nfirst\nAr 0 0 0\n2\nsecond\nAr 0 0 0\nAr 0 0 3.8\n";
        let frames = XyzFile::read_frames(&mut Cursor::new(content)).unwrap();
        assert_eq!(frames.len(), 2);
        let (system, metadata) = read_str(content).unwrap();
        assert_eq!(metadata.comment, "second");
        assert_eq!(system.len(), 2);
    }

    #[test]
    fn invalid_count_is_a_parse_error() {
        let result = read_str("three\nwater\nO 0 0 0\n");
        assert!(matches!(
            result,
            Err(XyzError::Parse {
                line: 1,
                kind: XyzParseErrorKind::InvalidCount { .. }
            })
        ));
    }

    #[test]
    fn count_mismatch_is_reported() {
        let result = read_str("5\nshort\nAr 0 0 0\nAr 1 0 0\n");
        let err = result.unwrap_err();
        assert!(matches!(err, XyzError::Inconsistency(_)));
        let message = err.to_string();
        assert!(message.contains('5') && message.contains('2'), "{}", message);
    }

    #[test]
    fn bad_coordinate_reports_line_and_column() {
        let result = read_str("2\nbad\nAr 0 0 0\nAr 1.0 abc 0\n");
        match result {
            Err(XyzError::Parse { line, kind }) => {
                assert_eq!(line, 4);
                assert_eq!(
                    kind,
                    XyzParseErrorKind::InvalidFloat {
                        column: "y",
                        value: "abc".into()
                    }
                );
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn too_few_fields_is_a_parse_error() {
        let result = read_str("1\nbad\nAr 0 0\n");
        assert!(matches!(
            result,
            Err(XyzError::Parse {
                line: 3,
                kind: XyzParseErrorKind::TooFewFields { .. }
            })
        ));
    }

    #[test]
    fn unknown_element_is_a_parse_error() {
        let result = read_str("1\nbad\nQq 0 0 0\n");
        assert!(matches!(
            result,
            Err(XyzError::Parse {
                kind: XyzParseErrorKind::UnknownElement { .. },
                ..
            })
        ));
    }

    #[test]
    fn empty_input_is_missing_record() {
        assert!(matches!(read_str(""), Err(XyzError::MissingRecord(_))));
        assert!(matches!(read_str("\n\n"), Err(XyzError::MissingRecord(_))));
        assert!(matches!(read_str("2\n"), Err(XyzError::MissingRecord(_))));
    }

    #[test]
    fn writes_fixed_width_columns() {
        let system = MolecularSystem::from_atoms(vec![
            Atom::new("O", Point3::new(0.0, -0.0, 0.1173)).unwrap(),
            Atom::new("Ar", Point3::new(-1.5, 2.25, 10.0)).unwrap(),
        ]);
        let mut buffer = Vec::new();
        XyzFile::write_to(&system, &XyzMetadata::with_comment("a + b"), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let expected = concat!(
            "2\n",
            "a + b\n",
            "O        0.00000000       0.00000000       0.11730000\n",
            "Ar      -1.50000000       2.25000000      10.00000000\n",
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn write_then_read_preserves_atoms_and_comment() {
        let (system, _) = read_str(WATER).unwrap();
        let mut buffer = Vec::new();
        XyzFile::write_to(&system, &XyzMetadata::with_comment("round trip"), &mut buffer)
            .unwrap();
        let (reread, metadata) = read_str(std::str::from_utf8(&buffer).unwrap()).unwrap();
        assert_eq!(metadata.comment, "round trip");
        assert_eq!(reread.len(), system.len());
        for (a, b) in system.atoms().iter().zip(reread.atoms()) {
            assert_eq!(a.element, b.element);
            assert!((a.position - b.position).norm() < 1e-8);
        }
    }

    #[test]
    fn multi_line_comment_is_rejected() {
        let system = MolecularSystem::new();
        let mut buffer = Vec::new();
        let result = XyzFile::write_to(
            &system,
            &XyzMetadata::with_comment("line one\nline two"),
            &mut buffer,
        );
        assert!(matches!(result, Err(XyzError::MultiLineComment(_))));
        assert!(buffer.is_empty());
    }

    #[test]
    fn write_system_to_uses_empty_comment() {
        let mut buffer = Vec::new();
        XyzFile::write_system_to(&MolecularSystem::new(), &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "0\n\n");
    }
}
