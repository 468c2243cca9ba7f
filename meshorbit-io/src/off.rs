//! OFF (Object File Format) support
//!
//! Layout:
//! ```text
//! OFF
//! <vertex count> <face count> <edge count>
//! x y z                 (vertex count lines)
//! k i0 i1 ... i(k-1)    (face count lines)
//! ```
//! Blank lines and `#` comments are skipped. Tokens past the ones a line
//! needs (per-vertex or per-face colors) are ignored. The edge count is
//! read but unused. Non-finite coordinates and non-UTF-8 text are rejected.

use crate::error::ParseError;
use crate::registry::MeshImporter;
use meshorbit_core::{Point3f, PolygonMesh, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Magic token on the first line of an OFF file
pub const OFF_MAGIC: &str = "OFF";

// Header counts are untrusted; buffers grow past this as elements arrive.
const PREALLOC_LIMIT: usize = 1 << 16;

/// Importer for plain-text OFF meshes
#[derive(Debug, Clone, Copy, Default)]
pub struct OffImporter;

impl OffImporter {
    /// Parse an OFF mesh from any buffered reader
    pub fn parse<R: BufRead>(reader: R) -> Result<PolygonMesh> {
        let mut lines = DataLines::new(reader);

        let (line, magic) = lines.next_line("OFF header")?;
        if magic.trim() != OFF_MAGIC {
            return Err(ParseError::BadMagic {
                line,
                expected: OFF_MAGIC,
                found: magic.trim().to_string(),
            }
            .into());
        }

        let (line, counts) = lines.next_line("element counts")?;
        let counts: Vec<usize> = parse_tokens(line, &counts, 3, "element counts")?;
        let (nv, nf) = (counts[0], counts[1]);

        let mut mesh = PolygonMesh {
            vertices: Vec::with_capacity(nv.min(PREALLOC_LIMIT)),
            faces: Vec::with_capacity(nf.min(PREALLOC_LIMIT)),
        };

        for _ in 0..nv {
            let (line, text) = lines.next_line("vertex")?;
            let coords: Vec<f32> = parse_tokens(line, &text, 3, "vertex coordinates")?;
            if let Some(value) = coords.iter().find(|c| !c.is_finite()) {
                return Err(ParseError::NonFinite {
                    line,
                    value: *value,
                }
                .into());
            }
            mesh.add_vertex(Point3f::new(coords[0], coords[1], coords[2]));
        }

        for _ in 0..nf {
            let (line, text) = lines.next_line("face")?;
            let head: Vec<usize> = parse_tokens(line, &text, 1, "face vertex count")?;
            let count = head[0];
            if count < 3 {
                return Err(ParseError::FaceTooSmall { line, count }.into());
            }

            let needed = count.checked_add(1).ok_or_else(|| ParseError::InvalidNumber {
                line,
                what: "face vertex count",
                token: count.to_string(),
            })?;
            let tokens: Vec<usize> = parse_tokens(line, &text, needed, "face indices")?;
            let face = tokens[1..].to_vec();
            if let Some(&index) = face.iter().find(|&&i| i >= nv) {
                return Err(ParseError::IndexOutOfRange {
                    line,
                    index,
                    vertex_count: nv,
                }
                .into());
            }
            mesh.add_face(face);
        }

        Ok(mesh)
    }
}

impl MeshImporter for OffImporter {
    fn import(&self, path: &Path) -> Result<PolygonMesh> {
        let file = File::open(path)?;
        Self::parse(BufReader::new(file))
    }

    fn format_name(&self) -> &'static str {
        "off"
    }
}

/// Iterator over non-blank, non-comment lines with 1-based line numbers
struct DataLines<R> {
    reader: R,
    line_number: usize,
}

impl<R: BufRead> DataLines<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
        }
    }

    fn next_line(&mut self, what: &'static str) -> Result<(usize, String)> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if self.reader.read_until(b'\n', &mut buf)? == 0 {
                return Err(ParseError::UnexpectedEof { what }.into());
            }
            self.line_number += 1;

            let text = std::str::from_utf8(&buf).map_err(|_| ParseError::InvalidText {
                line: self.line_number,
            })?;
            let trimmed = text.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            return Ok((self.line_number, trimmed.to_string()));
        }
    }
}

/// Parse the first `needed` whitespace-separated tokens of a line
fn parse_tokens<T: std::str::FromStr>(
    line: usize,
    text: &str,
    needed: usize,
    what: &'static str,
) -> std::result::Result<Vec<T>, ParseError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() < needed {
        return Err(ParseError::MissingTokens {
            line,
            what,
            expected: needed,
            found: tokens.len(),
        });
    }

    tokens[..needed]
        .iter()
        .map(|token| {
            token.parse::<T>().map_err(|_| ParseError::InvalidNumber {
                line,
                what,
                token: token.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshorbit_core::Error;
    use std::io::Cursor;

    fn parse(text: &str) -> Result<PolygonMesh> {
        OffImporter::parse(Cursor::new(text))
    }

    fn format_message(result: Result<PolygonMesh>) -> String {
        match result {
            Err(Error::Format(message)) => message,
            other => panic!("expected a format error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_cube_face() {
        let mesh = parse("OFF\n4 1 0\n0 0 0\n1 0 0\n1 1 0\n0 1 0\n4 0 1 2 3\n").unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.faces[0], vec![0, 1, 2, 3]);
        assert_eq!(mesh.vertices[2], Point3f::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_order_and_duplicates_are_preserved() {
        let mesh = parse("OFF\n3 2 0\n1 1 1\n1 1 1\n0 0 2.5\n3 2 1 0\n3 0 1 2\n").unwrap();
        assert_eq!(mesh.vertices[0], mesh.vertices[1]);
        assert_eq!(mesh.faces, vec![vec![2, 1, 0], vec![0, 1, 2]]);
    }

    #[test]
    fn test_blank_lines_comments_and_colors() {
        let text = "\n  OFF  \n# cube corner\n3 1 3\n\n0 0 0\n1 0 0 255 0 0\n0 1 0\n3 0 1 2 0.5 0.5 0.5\n";
        let mesh = parse(text).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.faces[0], vec![0, 1, 2]);
    }

    #[test]
    fn test_bad_magic() {
        let message = format_message(parse("PLY\n3 1 0\n"));
        assert!(message.contains("magic"));
    }

    #[test]
    fn test_face_index_out_of_range() {
        let message = format_message(parse("OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1 3\n"));
        assert!(message.contains("line 6"));
        assert!(message.contains("out of range"));
    }

    #[test]
    fn test_short_lines() {
        format_message(parse("OFF\n3 1\n"));
        format_message(parse("OFF\n1 0 0\n0 0\n"));
        format_message(parse("OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n4 0 1 2\n"));
    }

    #[test]
    fn test_malformed_numbers() {
        format_message(parse("OFF\nthree 1 0\n"));
        format_message(parse("OFF\n1 0 0\n0 x 0\n"));
        format_message(parse("OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 -1 2\n"));
    }

    #[test]
    fn test_degenerate_face() {
        let message = format_message(parse("OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n2 0 1\n"));
        assert!(message.contains("at least 3"));
    }

    #[test]
    fn test_truncated_file() {
        let message = format_message(parse("OFF\n3 1 0\n0 0 0\n"));
        assert!(message.contains("end of file"));
        format_message(parse(""));
    }

    #[test]
    fn test_huge_face_vertex_count() {
        let text = format!("OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n{} 0 1 2\n", usize::MAX);
        let message = format_message(parse(&text));
        assert!(message.contains("line 6"));
    }

    #[test]
    fn test_huge_header_counts_hit_end_of_file() {
        let text = format!("OFF\n{} {} 0\n", usize::MAX, usize::MAX);
        let message = format_message(parse(&text));
        assert!(message.contains("end of file"));

        let message = format_message(parse("OFF\n4000000000 1 0\n0 0 0\n"));
        assert!(message.contains("end of file"));
    }

    #[test]
    fn test_invalid_utf8_is_format_error() {
        let bytes: &[u8] = b"OFF\n1 0 0\n0 0 \xff\n";
        let message = format_message(OffImporter::parse(Cursor::new(bytes)));
        assert!(message.contains("line 3"));
    }

    #[test]
    fn test_non_finite_coordinates_rejected() {
        for token in ["inf", "-inf", "NaN"] {
            let text = format!("OFF\n3 1 0\n{} 0 0\n1 0 0\n0 1 0\n3 0 1 2\n", token);
            let message = format_message(parse(&text));
            assert!(message.contains("line 3"));
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = OffImporter.import(Path::new("definitely/not/here.off"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
