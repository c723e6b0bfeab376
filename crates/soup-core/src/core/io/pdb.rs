use crate::core::io::traits::StructureFile;
use crate::core::models::builder::{NewAtom, SoupBuilder};
use crate::core::models::soup::Soup;
use crate::core::utils::identifiers::element_from_atom_name;
use nalgebra::Point3;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::{debug, warn};

const MIN_ATOM_LINE_LEN: usize = 54;

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("No ATOM or HETATM records could be read")]
    NoAtomLines,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Line is too short for ATOM/HETATM record (must be at least 54 chars)")]
    LineTooShort,
    #[error("ATOM/HETATM record contains non-ASCII characters")]
    NonAscii,
}

/// A skipped input line: its 1-based line number and why it was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIssue {
    pub line: usize,
    pub kind: PdbParseErrorKind,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PdbMetadata {
    pub title: String,
    pub line_issues: Vec<LineIssue>,
    pub model_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PdbReadOptions {
    /// Stop at the first `ENDMDL` record.
    pub first_model_only: bool,
}

impl Default for PdbReadOptions {
    fn default() -> Self {
        Self {
            first_model_only: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct AtomRecord<'a> {
    name: &'a str,
    alt_loc: Option<char>,
    res_name: &'a str,
    chain: &'a str,
    res_seq: i32,
    ins_code: Option<char>,
    position: Point3<f32>,
    b_factor: f32,
    element: String,
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("").trim()
}

fn record_type(line: &str) -> &str {
    line.get(..6).unwrap_or(line).trim()
}

fn code_at(line: &str, column: usize) -> Option<char> {
    slice_and_trim(line, column, column + 1).chars().next()
}

fn parse_float(line: &str, start: usize, end: usize) -> Result<f32, PdbParseErrorKind> {
    let field = slice_and_trim(line, start, end);
    field
        .parse::<f32>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| PdbParseErrorKind::InvalidFloat {
            columns: format!("{}-{}", start + 1, end),
            value: field.into(),
        })
}

fn parse_atom_record(line: &str) -> Result<AtomRecord<'_>, PdbParseErrorKind> {
    // Columns are byte offsets; a multi-byte character would shift every field.
    if !line.is_ascii() {
        return Err(PdbParseErrorKind::NonAscii);
    }
    if line.len() < MIN_ATOM_LINE_LEN {
        return Err(PdbParseErrorKind::LineTooShort);
    }

    let name = slice_and_trim(line, 12, 16);
    let res_seq_str = slice_and_trim(line, 22, 26);
    let res_seq: i32 = res_seq_str
        .parse()
        .map_err(|_| PdbParseErrorKind::InvalidInt {
            columns: "23-26".into(),
            value: res_seq_str.into(),
        })?;
    let x = parse_float(line, 30, 38)?;
    let y = parse_float(line, 38, 46)?;
    let z = parse_float(line, 46, 54)?;
    let b_factor = if slice_and_trim(line, 60, 66).is_empty() {
        0.0
    } else {
        parse_float(line, 60, 66)?
    };

    let element_field = slice_and_trim(line, 76, 78);
    let element = if element_field.is_empty() {
        element_from_atom_name(name)
            .map(String::from)
            .unwrap_or_default()
    } else {
        element_field.to_ascii_uppercase()
    };

    Ok(AtomRecord {
        name,
        alt_loc: code_at(line, 16),
        res_name: slice_and_trim(line, 17, 20),
        chain: slice_and_trim(line, 21, 22),
        res_seq,
        ins_code: code_at(line, 26),
        position: Point3::new(x, y, z),
        b_factor,
        element,
    })
}

pub struct PdbFile;

impl PdbFile {
    /// Reads every usable atom record into a [`Soup`].
    ///
    /// Unlike [`StructureFile::read_from`], an input without atom records is
    /// not an error here: the soup comes back empty and the caller decides.
    /// Malformed atom lines are skipped and reported in
    /// [`PdbMetadata::line_issues`]. Bytes that are not valid UTF-8 never
    /// abort the read: they are replaced, and an atom line carrying them is
    /// reported like any other malformed line.
    pub fn read_with_options(
        reader: &mut impl BufRead,
        options: &PdbReadOptions,
    ) -> Result<(Soup, PdbMetadata), PdbError> {
        let mut builder = SoupBuilder::new();
        let mut metadata = PdbMetadata::default();
        let mut current_residue: Option<(String, i32, Option<char>)> = None;

        let mut buf = Vec::new();
        let mut line_num = 0;

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_num += 1;
            while matches!(buf.last(), Some(b'\n' | b'\r')) {
                buf.pop();
            }
            let line = String::from_utf8_lossy(&buf);

            match record_type(&line) {
                "ATOM" | "HETATM" => {
                    let record = match parse_atom_record(&line) {
                        Ok(record) => record,
                        Err(kind) => {
                            warn!("Skipping line {}: {}", line_num, kind);
                            metadata.line_issues.push(LineIssue {
                                line: line_num,
                                kind,
                            });
                            continue;
                        }
                    };

                    let same_residue = current_residue.as_ref().is_some_and(|(chain, seq, ins)| {
                        chain == record.chain && *seq == record.res_seq && *ins == record.ins_code
                    });
                    if !same_residue {
                        builder.start_residue(
                            record.res_name,
                            record.chain,
                            record.res_seq,
                            record.ins_code,
                        );
                        current_residue =
                            Some((record.chain.to_string(), record.res_seq, record.ins_code));
                    }
                    builder.add_atom(
                        NewAtom::new(record.name, &record.element, record.position)
                            .with_alt_loc(record.alt_loc)
                            .with_b_factor(record.b_factor),
                    );
                }
                "TITLE" => {
                    let text = line.get(10..).unwrap_or("").trim();
                    if !text.is_empty() {
                        if !metadata.title.is_empty() {
                            metadata.title.push(' ');
                        }
                        metadata.title.push_str(text);
                    }
                }
                "MODEL" => metadata.model_count += 1,
                "ENDMDL" if options.first_model_only => break,
                "END" => break,
                _ => {}
            }
        }

        if metadata.model_count == 0 && builder.atom_count() > 0 {
            metadata.model_count = 1;
        }
        builder.title(&metadata.title);
        let soup = builder.build();
        debug!(
            "Read {} atoms in {} residues ({} skipped lines).",
            soup.atom_count(),
            soup.residue_count(),
            metadata.line_issues.len()
        );
        Ok((soup, metadata))
    }
}

impl StructureFile for PdbFile {
    type Metadata = PdbMetadata;
    type Error = PdbError;

    fn read_from(reader: &mut impl BufRead) -> Result<(Soup, Self::Metadata), Self::Error> {
        let (soup, metadata) = Self::read_with_options(reader, &PdbReadOptions::default())?;
        if soup.is_empty() {
            return Err(PdbError::NoAtomLines);
        }
        Ok((soup, metadata))
    }
}

/// Formats one fixed-column ATOM/HETATM record.
#[cfg(test)]
#[allow(clippy::too_many_arguments)]
pub(crate) fn format_atom_line(
    record: &str,
    serial: usize,
    name: &str,
    res_name: &str,
    chain: char,
    res_seq: i32,
    position: [f32; 3],
    element: &str,
) -> String {
    format!(
        "{:<6}{:>5} {:<4}{}{:>3} {}{:>4}{}   {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}          {:>2}",
        record,
        serial,
        name,
        ' ',
        res_name,
        chain,
        res_seq,
        ' ',
        position[0],
        position[1],
        position[2],
        1.0,
        20.0,
        element
    )
}
