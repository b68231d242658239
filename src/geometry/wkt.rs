//! Well-known text reading and writing
//!
//! Supports the geometry kinds the predicate model uses: POINT,
//! MULTIPOINT, LINESTRING and POLYGON. The reader is a small
//! recursive-descent scanner over the input text; it is a plain function
//! with no shared state, so callers parse exactly when and what they
//! need.
//!
//! Formatting is the exact inverse for supported kinds; envelopes render
//! in BBOX-style `ENVELOPE (minx, maxx, miny, maxy)` notation and are
//! not accepted back by the reader (they only arise from bbox filters).

use std::fmt;

use super::errors::{GeometryError, GeometryResult};
use super::geom::{Coord, Geometry};

/// Parse a WKT string into a geometry value
pub fn parse(input: &str) -> GeometryResult<Geometry> {
    let mut scanner = Scanner::new(input);
    let geom = scanner.parse_geometry()?;
    scanner.skip_ws();
    if !scanner.at_end() {
        return Err(scanner.error("trailing input after geometry"));
    }
    Ok(geom)
}

struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn parse_geometry(&mut self) -> GeometryResult<Geometry> {
        let keyword = self.keyword()?;
        match keyword.as_str() {
            "POINT" => {
                let coords = self.coord_list()?;
                if coords.len() != 1 {
                    return Err(self.error("POINT requires exactly one coordinate"));
                }
                Ok(Geometry::Point(coords[0]))
            }
            "MULTIPOINT" => {
                let coords = self.multipoint_coords()?;
                if coords.is_empty() {
                    return Err(self.error("MULTIPOINT requires at least one coordinate"));
                }
                Ok(Geometry::MultiPoint(coords))
            }
            "LINESTRING" => {
                let coords = self.coord_list()?;
                if coords.len() < 2 {
                    return Err(self.error("LINESTRING requires at least two coordinates"));
                }
                Ok(Geometry::LineString(coords))
            }
            "POLYGON" => {
                let rings = self.ring_list()?;
                let mut iter = rings.into_iter();
                let exterior = iter
                    .next()
                    .ok_or_else(|| self.error("POLYGON requires an exterior ring"))?;
                Ok(Geometry::Polygon {
                    exterior,
                    holes: iter.collect(),
                })
            }
            other => Err(self.error(format!("unknown geometry type: {other}"))),
        }
    }

    /// `(x1 y1, x2 y2, ...)`
    fn coord_list(&mut self) -> GeometryResult<Vec<Coord>> {
        self.expect('(')?;
        let mut coords = vec![self.coord()?];
        loop {
            self.skip_ws();
            if self.consume(',') {
                coords.push(self.coord()?);
            } else {
                break;
            }
        }
        self.expect(')')?;
        Ok(coords)
    }

    /// MULTIPOINT allows both `(1 2, 3 4)` and `((1 2), (3 4))`
    fn multipoint_coords(&mut self) -> GeometryResult<Vec<Coord>> {
        self.expect('(')?;
        let mut coords = Vec::new();
        loop {
            self.skip_ws();
            let wrapped = self.consume('(');
            coords.push(self.coord()?);
            if wrapped {
                self.expect(')')?;
            }
            self.skip_ws();
            if !self.consume(',') {
                break;
            }
        }
        self.expect(')')?;
        Ok(coords)
    }

    /// `((ring), (ring), ...)` with each ring closed
    fn ring_list(&mut self) -> GeometryResult<Vec<Vec<Coord>>> {
        self.expect('(')?;
        let mut rings = Vec::new();
        loop {
            let ring = self.coord_list()?;
            if ring.len() < 4 {
                return Err(self.error("polygon ring requires at least four coordinates"));
            }
            if ring.first() != ring.last() {
                return Err(self.error("polygon ring must be closed"));
            }
            rings.push(ring);
            self.skip_ws();
            if !self.consume(',') {
                break;
            }
        }
        self.expect(')')?;
        Ok(rings)
    }

    fn coord(&mut self) -> GeometryResult<Coord> {
        let x = self.number()?;
        let y = self.number()?;
        Ok(Coord::new(x, y))
    }

    fn number(&mut self) -> GeometryResult<f64> {
        self.skip_ws();
        let start = self.pos;
        let bytes = self.input.as_bytes();
        while self.pos < bytes.len()
            && matches!(bytes[self.pos], b'0'..=b'9' | b'-' | b'+' | b'.' | b'e' | b'E')
        {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(self.error("expected a number"));
        }
        self.input[start..self.pos]
            .parse::<f64>()
            .map_err(|_| self.error(format!("invalid number: {}", &self.input[start..self.pos])))
    }

    fn keyword(&mut self) -> GeometryResult<String> {
        self.skip_ws();
        let start = self.pos;
        let bytes = self.input.as_bytes();
        while self.pos < bytes.len() && bytes[self.pos].is_ascii_alphabetic() {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(self.error("expected a geometry type keyword"));
        }
        Ok(self.input[start..self.pos].to_ascii_uppercase())
    }

    fn expect(&mut self, c: char) -> GeometryResult<()> {
        self.skip_ws();
        if self.consume(c) {
            Ok(())
        } else {
            Err(self.error(format!("expected '{c}'")))
        }
    }

    fn consume(&mut self, c: char) -> bool {
        if self.input[self.pos..].starts_with(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) {
        let bytes = self.input.as_bytes();
        while self.pos < bytes.len() && bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn error(&self, msg: impl Into<String>) -> GeometryError {
        GeometryError::Parse(format!("{} at offset {}", msg.into(), self.pos))
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Geometry::Point(c) => write!(f, "POINT ({} {})", c.x, c.y),
            Geometry::MultiPoint(cs) => {
                write!(f, "MULTIPOINT (")?;
                write_coords(f, cs)?;
                write!(f, ")")
            }
            Geometry::LineString(cs) => {
                write!(f, "LINESTRING (")?;
                write_coords(f, cs)?;
                write!(f, ")")
            }
            Geometry::Polygon { exterior, holes } => {
                write!(f, "POLYGON ((")?;
                write_coords(f, exterior)?;
                write!(f, ")")?;
                for hole in holes {
                    write!(f, ", (")?;
                    write_coords(f, hole)?;
                    write!(f, ")")?;
                }
                write!(f, ")")
            }
            Geometry::Envelope(b) => {
                write!(f, "ENVELOPE ({}, {}, {}, {})", b.min_x, b.max_x, b.min_y, b.max_y)
            }
        }
    }
}

fn write_coords(f: &mut fmt::Formatter<'_>, coords: &[Coord]) -> fmt::Result {
    for (i, c) in coords.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{} {}", c.x, c.y)?;
    }
    Ok(())
}
