//! `SRID=4326;BBOX(x1,y1 x2,y2)` text form.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use super::BoundingBox;
use crate::error::{GeometryError, ParseError};
use crate::factory::GeometryFactory;

impl Display for BoundingBox {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let srid = self.srid();
        if srid > 0 {
            write!(f, "SRID={srid};")?;
        }
        if self.is_empty() {
            return write!(f, "BBOX EMPTY");
        }

        let axis_count = self.axis_count();
        write!(f, "BBOX")?;
        match axis_count {
            2 => {}
            3 => write!(f, " Z")?,
            4 => write!(f, " ZM")?,
            _ => write!(f, " {axis_count}")?,
        }

        write!(f, "(")?;
        for axis in 0..axis_count {
            if axis > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", self.min(axis))?;
        }
        write!(f, " ")?;
        for axis in 0..axis_count {
            if axis > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", self.max(axis))?;
        }
        write!(f, ")")
    }
}

impl FromStr for BoundingBox {
    type Err = GeometryError;

    /// Parses the text written by [`Display`]. Without an `SRID=` prefix the box gets a
    /// floating factory without coordinate system.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Ok(Reader::new(text).bounding_box()?)
    }
}

struct Reader<'a> {
    text: &'a str,
    position: usize,
}

impl<'a> Reader<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, position: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.text[self.position..]
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(self.position, message)
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.position += rest.len() - rest.trim_start().len();
    }

    /// Consumes `keyword` (case insensitive) if the text continues with it.
    fn keyword(&mut self, keyword: &str) -> bool {
        self.skip_whitespace();
        let rest = self.rest();
        match rest.get(..keyword.len()) {
            Some(start) if start.eq_ignore_ascii_case(keyword) => {
                self.position += keyword.len();
                true
            }
            _ => false,
        }
    }

    fn expect(&mut self, token: char) -> Result<(), ParseError> {
        self.skip_whitespace();
        if self.rest().starts_with(token) {
            self.position += token.len_utf8();
            Ok(())
        } else {
            Err(self.error(format!("Expecting a '{token}'")))
        }
    }

    fn token(&mut self) -> &'a str {
        self.skip_whitespace();
        let rest = self.rest();
        let len = rest
            .find(|c: char| c.is_whitespace() || matches!(c, ',' | ';' | '(' | ')'))
            .unwrap_or(rest.len());
        self.position += len;
        &rest[..len]
    }

    fn number<T: FromStr>(&mut self, what: &str) -> Result<T, ParseError> {
        let start = self.position;
        let token = self.token();
        token.parse().map_err(|_| {
            ParseError::new(start, format!("Expecting {what}, found '{token}'"))
        })
    }

    fn bounding_box(&mut self) -> Result<BoundingBox, ParseError> {
        let mut srid = 0;
        if self.keyword("SRID=") {
            srid = self.number("an SRID")?;
            self.expect(';')?;
        }

        if !self.keyword("BBOX") {
            return Err(self.error("Expecting BBOX"));
        }

        let axis_count = if self.keyword("EMPTY") {
            None
        } else if self.keyword("ZM") {
            Some(4)
        } else if self.keyword("Z") {
            Some(3)
        } else if self.rest().trim_start().starts_with('(') {
            Some(2)
        } else {
            let start = self.position;
            let axis_count: usize = self.number("an axis count or '('")?;
            if !(2..=4).contains(&axis_count) {
                return Err(ParseError::new(
                    start,
                    format!("Axis count must be between 2 and 4, found {axis_count}"),
                ));
            }
            Some(axis_count)
        };

        let bbox = match axis_count {
            None => {
                let factory = GeometryFactory::floating(srid, 2);
                BoundingBox::empty_with(&factory)
            }
            Some(axis_count) => {
                let factory = GeometryFactory::floating(srid, axis_count);
                let mut bounds = Vec::with_capacity(axis_count * 2);
                self.expect('(')?;
                for corner in 0..2 {
                    for axis in 0..axis_count {
                        if axis > 0 {
                            self.expect(',')?;
                        }
                        let what = if corner == 0 { "a minimum" } else { "a maximum" };
                        bounds.push(self.number(what)?);
                    }
                }
                self.expect(')')?;

                BoundingBox::new(&factory, axis_count, &bounds)
                    .map_err(|err| self.error(err.to_string()))?
            }
        };

        self.skip_whitespace();
        if !self.rest().is_empty() {
            return Err(self.error("Unexpected text after bounding box"));
        }

        Ok(bbox)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn parse_with_srid() {
        let bbox: BoundingBox = "SRID=4326;BBOX(10,20 30,40)".parse().unwrap();
        assert_eq!(bbox.srid(), 4326);
        assert_eq!(bbox.min_x(), 10.0);
        assert_eq!(bbox.min_y(), 20.0);
        assert_eq!(bbox.max_x(), 30.0);
        assert_eq!(bbox.max_y(), 40.0);
        assert_eq!(bbox.to_string(), "SRID=4326;BBOX(10,20 30,40)");
    }

    #[test]
    fn parse_without_srid() {
        let bbox: BoundingBox = "  bbox ( -1.5 ,2  3.25, 4 ) ".parse().unwrap();
        assert_eq!(bbox.srid(), 0);
        assert_eq!(bbox.width(), 4.75);
        assert_eq!(bbox.to_string(), "BBOX(-1.5,2 3.25,4)");
    }

    #[test]
    fn corners_in_any_order() {
        let bbox: BoundingBox = "BBOX(30,40 10,20)".parse().unwrap();
        assert_eq!(bbox.to_string(), "BBOX(10,20 30,40)");
    }

    #[test]
    fn empty() {
        let bbox: BoundingBox = "SRID=3005;BBOX EMPTY".parse().unwrap();
        assert!(bbox.is_empty());
        assert_eq!(bbox.srid(), 3005);
        assert_eq!(bbox.to_string(), "SRID=3005;BBOX EMPTY");
        assert_eq!(BoundingBox::empty().to_string(), "BBOX EMPTY");
    }

    #[test]
    fn three_dimensions() {
        let bbox: BoundingBox = "BBOX Z(1,2,3 4,5,6)".parse().unwrap();
        assert_eq!(bbox.axis_count(), 3);
        assert_eq!(bbox.max(2), 6.0);
        assert_eq!(bbox.to_string(), "BBOX Z(1,2,3 4,5,6)");
    }

    #[test]
    fn missing_comma() {
        let err = "BBOX(10 20 30,40)".parse::<BoundingBox>().unwrap_err();
        assert_matches!(
            err,
            GeometryError::Parse(ParseError { position: 8, ref message })
                if message == "Expecting a ','"
        );
    }

    #[test]
    fn malformed() {
        assert_matches!(
            "BOX(1,2 3,4)".parse::<BoundingBox>(),
            Err(GeometryError::Parse(_))
        );
        assert_matches!(
            "SRID=x;BBOX(1,2 3,4)".parse::<BoundingBox>(),
            Err(GeometryError::Parse(_))
        );
        assert_matches!(
            "BBOX(1,2 3,4".parse::<BoundingBox>(),
            Err(GeometryError::Parse(_))
        );
        assert_matches!(
            "BBOX(1,2 3,4) trailing".parse::<BoundingBox>(),
            Err(GeometryError::Parse(_))
        );
    }

    #[test]
    fn axis_count_out_of_range() {
        let err = "BBOX 5(1,2,3,4,5 6,7,8,9,10)"
            .parse::<BoundingBox>()
            .unwrap_err();
        assert_matches!(
            err,
            GeometryError::Parse(ParseError { position: 5, ref message })
                if message == "Axis count must be between 2 and 4, found 5"
        );

        assert_matches!(
            "BBOX 100000000000(1,2 3,4)".parse::<BoundingBox>(),
            Err(GeometryError::Parse(ParseError { position: 5, .. }))
        );
        assert_matches!(
            "BBOX 1(1 2)".parse::<BoundingBox>(),
            Err(GeometryError::Parse(_))
        );

        let bbox: BoundingBox = "BBOX 4(1,2,3,4 5,6,7,8)".parse().unwrap();
        assert_eq!(bbox.axis_count(), 4);
    }
}
