//! Token helpers shared by the OBJ and MTL parsers.

use std::{io::BufRead, str::FromStr};

use corelib::{LoadError, LoadResult, Vec3};

/// A non-blank, non-comment record: 1-based line number, leading keyword, operands.
pub(crate) struct Record<'a> {
    pub line: usize,
    pub keyword: &'a str,
    pub operands: std::str::SplitWhitespace<'a>,
}

/// Drive `handle` over every record of `reader` in a single forward pass.
///
/// Read failures (including invalid UTF-8) surface as `SourceUnavailable`.
pub(crate) fn for_each_record<R, F>(
    reader: R,
    source_name: &str,
    mut handle: F,
) -> LoadResult<()>
where
    R: BufRead,
    F: FnMut(Record<'_>) -> LoadResult<()>,
{
    for (line_no, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| LoadError::unavailable(source_name, e))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut operands = trimmed.split_whitespace();
        let Some(keyword) = operands.next() else {
            continue;
        };
        handle(Record {
            line: line_no + 1,
            keyword,
            operands,
        })?;
    }
    Ok(())
}

impl<'a> Record<'a> {
    pub fn f32(&mut self, what: &str) -> LoadResult<f32> {
        self.number(what)
    }

    pub fn i32(&mut self, what: &str) -> LoadResult<i32> {
        self.number(what)
    }

    fn number<T: FromStr>(&mut self, what: &str) -> LoadResult<T> {
        let (line, keyword) = (self.line, self.keyword);
        let token = self
            .operands
            .next()
            .ok_or_else(|| LoadError::directive(line, keyword, format!("missing {what}")))?;
        token
            .parse::<T>()
            .map_err(|_| LoadError::directive(line, keyword, format!("invalid {what} '{token}'")))
    }

    pub fn vec3(&mut self) -> LoadResult<Vec3> {
        let x = self.f32("x component")?;
        let y = self.f32("y component")?;
        let z = self.f32("z component")?;
        Ok(Vec3::new(x, y, z))
    }

    pub fn name(&mut self) -> LoadResult<&'a str> {
        self.operands
            .next()
            .ok_or_else(|| LoadError::directive(self.line, self.keyword, "missing name"))
    }
}
