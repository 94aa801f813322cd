//! Core interval record for genomic region representation.
//!
//! An [`Interval`] keeps the text columns of one record as its only state.
//! Coordinates, strand, name and attributes are derived from those columns
//! on every read and written back into them on every write, so the numeric
//! view and the serialized line can never disagree.
//!
//! Coordinates are always exposed 0-based and half-open, whatever the
//! on-disk convention of the record's format.

use crate::attrs::{AttrStyle, Attributes};
use crate::error::{IntervalError, Result};
use crate::format::FileType;
use crate::parsing::{parse_u64_fast, split_tabs};
use crate::sniff::classify_line;
use std::fmt;
use std::ops::{Bound, RangeBounds};
use std::str::FromStr;

/// Attribute keys consulted, in order, for the name of a GFF/GTF feature.
const NAME_KEYS: [&str; 6] = ["ID", "Name", "gene_name", "transcript_id", "gene_id", "Parent"];

/// Placeholder written into columns created by padding a short record.
const MISSING: &str = ".";

/// Strand orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    Plus,
    Minus,
    Unknown,
}

impl Strand {
    /// Interpret a strand column. Anything other than `+` or `-` is unknown.
    pub fn from_field(s: &str) -> Self {
        match s {
            "+" => Strand::Plus,
            "-" => Strand::Minus,
            _ => Strand::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Strand::Plus => "+",
            Strand::Minus => "-",
            Strand::Unknown => ".",
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Strand {
    type Err = IntervalError;

    /// Strict parse: only `+`, `-` and `.` are accepted.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "+" | "-" | "." => Ok(Strand::from_field(s)),
            _ => Err(IntervalError::parse(0, format!("Invalid strand: '{}'", s))),
        }
    }
}

/// Canonical field names for name-based access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    Chrom,
    Start,
    End,
    Strand,
    Name,
    Score,
}

impl FromStr for FieldName {
    type Err = IntervalError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "chrom" => Ok(FieldName::Chrom),
            "start" => Ok(FieldName::Start),
            "end" => Ok(FieldName::End),
            "strand" => Ok(FieldName::Strand),
            "name" => Ok(FieldName::Name),
            "score" => Ok(FieldName::Score),
            _ => Err(IntervalError::UnknownField(s.to_string())),
        }
    }
}

/// Value returned by name-based field access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Position(u64),
    Strand(Strand),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Position(p) => write!(f, "{}", p),
            FieldValue::Strand(s) => write!(f, "{}", s),
        }
    }
}

/// Positional relation between two intervals.
///
/// `Less` and `Greater` require a gap between the intervals. `LessEqual` and
/// `GreaterEqual` are the component-wise relations without a gap, which
/// includes adjacency and containment that shares a boundary. Intervals on
/// different chromosomes or strands are `Unordered`. Strictly nested
/// intervals have no relation at all; [`Interval::compare`] reports them as
/// [`IntervalError::Incomparable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Equal,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Unordered,
}

impl Relation {
    #[inline]
    pub fn is_eq(self) -> bool {
        self == Relation::Equal
    }

    #[inline]
    pub fn is_ne(self) -> bool {
        !self.is_eq()
    }

    #[inline]
    pub fn is_le(self) -> bool {
        matches!(self, Relation::Equal | Relation::Less | Relation::LessEqual)
    }

    #[inline]
    pub fn is_ge(self) -> bool {
        matches!(
            self,
            Relation::Equal | Relation::Greater | Relation::GreaterEqual
        )
    }

    #[inline]
    pub fn is_lt(self) -> bool {
        self == Relation::Less
    }

    #[inline]
    pub fn is_gt(self) -> bool {
        self == Relation::Greater
    }
}

/// One genomic feature: its text columns plus the format they follow.
#[derive(Debug, Clone)]
pub struct Interval {
    fields: Vec<String>,
    file_type: FileType,
}

/// 0-based start for a stored start column. 1-based formats have no position 0.
fn decode_start(file_type: FileType, stored: u64, line: usize) -> Result<u64> {
    if file_type.is_one_based() && stored == 0 {
        return Err(IntervalError::parse(
            line,
            format!("Invalid start position for {}: 0 (coordinates are 1-based)", file_type),
        ));
    }
    Ok(file_type.start_from_stored(stored))
}

impl Interval {
    /// Create a BED3 interval.
    ///
    /// `start` must not exceed `end`; an inverted pair is clamped to an empty
    /// interval at `start`. Use [`Interval::try_new`] to reject it instead.
    pub fn new(chrom: impl Into<String>, start: u64, end: u64) -> Self {
        debug_assert!(start <= end, "start ({}) > end ({})", start, end);
        let end = end.max(start);
        let mut buf = itoa::Buffer::new();
        let start = buf.format(start).to_string();
        let end = buf.format(end).to_string();
        Self {
            fields: vec![chrom.into(), start, end],
            file_type: FileType::Bed,
        }
    }

    /// Create a BED3 interval, failing if `start > end`.
    pub fn try_new(chrom: impl Into<String>, start: u64, end: u64) -> Result<Self> {
        if start > end {
            return Err(IntervalError::parse(
                0,
                format!("Start ({}) > end ({})", start, end),
            ));
        }
        Ok(Self::new(chrom, start, end))
    }

    /// Set the strand, padding name and score with `.` if needed.
    pub fn with_strand(mut self, strand: Strand) -> Self {
        self.set_strand(strand);
        self
    }

    /// Set the name, padding as needed.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.set_name(name);
        self
    }

    /// Build an interval from already-split columns, validating coordinates.
    pub fn from_fields(fields: Vec<String>, file_type: FileType) -> Result<Self> {
        Self::validated(fields, file_type, 0)
    }

    /// Parse one line of the given format.
    pub fn parse_line(line: &str, file_type: FileType) -> Result<Self> {
        Self::parse_line_at(line, file_type, 0)
    }

    pub(crate) fn parse_line_at(
        line: &str,
        file_type: FileType,
        line_number: usize,
    ) -> Result<Self> {
        let fields = split_tabs(line).into_iter().map(str::to_string).collect();
        Self::validated(fields, file_type, line_number)
    }

    fn validated(fields: Vec<String>, file_type: FileType, line: usize) -> Result<Self> {
        if fields.len() < file_type.min_columns() {
            return Err(IntervalError::parse(
                line,
                format!(
                    "Expected at least {} fields for {}, got {}",
                    file_type.min_columns(),
                    file_type,
                    fields.len()
                ),
            ));
        }

        let parse = |col: usize, what: &str| {
            parse_u64_fast(fields[col].as_bytes()).ok_or_else(|| {
                IntervalError::parse(line, format!("Invalid {} position: '{}'", what, fields[col]))
            })
        };
        let start = decode_start(file_type, parse(file_type.start_column(), "start")?, line)?;
        let end = parse(file_type.end_column(), "end")?;
        if start > end {
            return Err(IntervalError::parse(
                line,
                format!("Start ({}) > end ({})", start, end),
            ));
        }

        Ok(Self { fields, file_type })
    }

    #[inline]
    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    /// All text columns, in order.
    #[inline]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    #[inline]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn chrom(&self) -> &str {
        &self.fields[0]
    }

    pub fn set_chrom(&mut self, chrom: impl Into<String>) {
        self.fields[0] = chrom.into();
    }

    /// Numeric value of a coordinate column.
    #[inline]
    fn stored(&self, col: usize) -> u64 {
        // Coordinate columns are validated on construction and on every write.
        parse_u64_fast(self.fields[col].as_bytes()).unwrap_or_default()
    }

    /// 0-based start.
    #[inline]
    pub fn start(&self) -> u64 {
        self.file_type
            .start_from_stored(self.stored(self.file_type.start_column()))
    }

    /// 0-based, exclusive end.
    #[inline]
    pub fn end(&self) -> u64 {
        self.stored(self.file_type.end_column())
    }

    /// Set the 0-based start, writing the format's own convention.
    pub fn set_start(&mut self, start: u64) -> Result<()> {
        let end = self.end();
        if start > end {
            return Err(IntervalError::parse(
                0,
                format!("Start ({}) > end ({})", start, end),
            ));
        }
        let stored = self.file_type.start_to_stored(start);
        self.fields[self.file_type.start_column()] =
            itoa::Buffer::new().format(stored).to_string();
        Ok(())
    }

    /// Set the 0-based exclusive end.
    pub fn set_end(&mut self, end: u64) -> Result<()> {
        let start = self.start();
        if start > end {
            return Err(IntervalError::parse(
                0,
                format!("Start ({}) > end ({})", start, end),
            ));
        }
        self.fields[self.file_type.end_column()] = itoa::Buffer::new().format(end).to_string();
        Ok(())
    }

    /// Number of bases covered: `end - start`.
    #[inline]
    pub fn length(&self) -> u64 {
        self.end().saturating_sub(self.start())
    }

    /// Returns true if the interval has zero length.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length() == 0
    }

    pub fn strand(&self) -> Strand {
        self.fields
            .get(self.file_type.strand_column())
            .map(|s| Strand::from_field(s))
            .unwrap_or(Strand::Unknown)
    }

    pub fn set_strand(&mut self, strand: Strand) {
        let col = self.file_type.strand_column();
        self.pad_to(col);
        self.fields[col] = strand.as_str().to_string();
    }

    /// Score column as text, if present.
    pub fn score(&self) -> Option<&str> {
        self.fields
            .get(self.file_type.score_column())
            .map(String::as_str)
    }

    pub fn set_score(&mut self, score: impl Into<String>) {
        let col = self.file_type.score_column();
        self.pad_to(col);
        self.fields[col] = score.into();
    }

    /// Feature name.
    ///
    /// BED reads column 3 (empty when absent). GFF/GTF read the first of
    /// `ID`, `Name`, `gene_name`, `transcript_id`, `gene_id`, `Parent`.
    pub fn name(&self) -> String {
        match self.attrs() {
            Ok(attrs) => NAME_KEYS
                .iter()
                .find_map(|key| attrs.get(key))
                .unwrap_or_default()
                .to_string(),
            Err(_) => self.fields.get(3).cloned().unwrap_or_default(),
        }
    }

    /// Set the feature name.
    ///
    /// GFF/GTF write the attribute that [`name`](Self::name) would read, or
    /// `ID` (GFF) / `gene_id` (GTF) if none is present.
    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        match self.attrs() {
            Ok(mut attrs) => {
                let key = NAME_KEYS
                    .iter()
                    .copied()
                    .find(|key| attrs.contains_key(key))
                    .unwrap_or(match self.file_type {
                        FileType::Gtf => "gene_id",
                        _ => "ID",
                    });
                attrs.insert(key, name);
                self.write_attrs(&attrs);
            }
            Err(_) => {
                self.pad_to(3);
                self.fields[3] = name;
            }
        }
    }

    fn attrs_column(&self) -> Result<(usize, AttrStyle)> {
        match (
            self.file_type.attributes_column(),
            AttrStyle::for_file_type(self.file_type),
        ) {
            (Some(col), Some(style)) => Ok((col, style)),
            _ => Err(IntervalError::NoAttributes(self.file_type)),
        }
    }

    /// Parsed view of the attribute column.
    pub fn attrs(&self) -> Result<Attributes> {
        let (col, style) = self.attrs_column()?;
        Ok(Attributes::parse(&self.fields[col], style))
    }

    /// Replace the attribute column. Only that column is rewritten.
    pub fn set_attrs(&mut self, attrs: &Attributes) -> Result<()> {
        let (_, style) = self.attrs_column()?;
        if attrs.style() == style {
            self.write_attrs(attrs);
        } else {
            let mut packed = Attributes::new(style);
            for (key, value) in attrs.iter() {
                packed.insert(key, value);
            }
            self.write_attrs(&packed);
        }
        Ok(())
    }

    /// Look up one attribute.
    pub fn attr(&self, key: &str) -> Result<Option<String>> {
        Ok(self.attrs()?.get(key).map(str::to_string))
    }

    /// Insert or replace one attribute.
    pub fn set_attr(&mut self, key: &str, value: impl Into<String>) -> Result<()> {
        let mut attrs = self.attrs()?;
        attrs.insert(key, value.into());
        self.write_attrs(&attrs);
        Ok(())
    }

    fn write_attrs(&mut self, attrs: &Attributes) {
        if let Some(col) = self.file_type.attributes_column() {
            self.fields[col] = attrs.to_string();
        }
    }

    fn pad_to(&mut self, col: usize) {
        while self.fields.len() <= col {
            self.fields.push(MISSING.to_string());
        }
    }

    fn resolve_index(&self, index: isize) -> Result<usize> {
        let len = self.fields.len();
        let resolved = if index < 0 {
            len as isize + index
        } else {
            index
        };
        if resolved < 0 || resolved as usize >= len {
            return Err(IntervalError::IndexOutOfRange { index, len });
        }
        Ok(resolved as usize)
    }

    /// Column by position; negative indices count from the end.
    pub fn field(&self, index: isize) -> Result<&str> {
        let i = self.resolve_index(index)?;
        Ok(&self.fields[i])
    }

    /// Columns in a range; negative bounds count from the end.
    ///
    /// Out-of-range bounds clamp like sequence slicing and never fail.
    pub fn slice<R: RangeBounds<isize>>(&self, range: R) -> &[String] {
        let len = self.fields.len() as isize;
        let norm = |i: isize| if i < 0 { i.saturating_add(len) } else { i };

        let begin = match range.start_bound() {
            Bound::Included(&i) => norm(i),
            Bound::Excluded(&i) => norm(i).saturating_add(1),
            Bound::Unbounded => 0,
        }
        .clamp(0, len);
        let end = match range.end_bound() {
            Bound::Included(&i) => norm(i).saturating_add(1),
            Bound::Excluded(&i) => norm(i),
            Bound::Unbounded => len,
        }
        .clamp(0, len);

        if begin >= end {
            &[]
        } else {
            &self.fields[begin as usize..end as usize]
        }
    }

    /// Replace one column.
    ///
    /// Writes to a coordinate column must be a non-negative integer that keeps
    /// `start <= end`; otherwise nothing changes and a parse error is returned.
    pub fn set_field(&mut self, index: isize, value: impl Into<String>) -> Result<()> {
        let i = self.resolve_index(index)?;
        let value = value.into();

        let start_col = self.file_type.start_column();
        let end_col = self.file_type.end_column();
        if i == start_col || i == end_col {
            let stored = parse_u64_fast(value.as_bytes()).ok_or_else(|| {
                IntervalError::parse(0, format!("Invalid position: '{}'", value))
            })?;
            let (start, end) = if i == start_col {
                (decode_start(self.file_type, stored, 0)?, self.end())
            } else {
                (self.start(), stored)
            };
            if start > end {
                return Err(IntervalError::parse(
                    0,
                    format!("Start ({}) > end ({})", start, end),
                ));
            }
        }

        self.fields[i] = value;
        Ok(())
    }

    /// Add a column at the end.
    pub fn append(&mut self, value: impl Into<String>) {
        self.fields.push(value.into());
    }

    /// Named access: `chrom`, `start`, `end`, `strand`, `name` or `score`.
    pub fn get(&self, name: &str) -> Result<FieldValue> {
        Ok(self.get_field(name.parse()?))
    }

    pub fn get_field(&self, field: FieldName) -> FieldValue {
        match field {
            FieldName::Chrom => FieldValue::Text(self.chrom().to_string()),
            FieldName::Start => FieldValue::Position(self.start()),
            FieldName::End => FieldValue::Position(self.end()),
            FieldName::Strand => FieldValue::Strand(self.strand()),
            FieldName::Name => FieldValue::Text(self.name()),
            FieldName::Score => FieldValue::Text(self.score().unwrap_or_default().to_string()),
        }
    }

    /// Named write. `start`/`end` take 0-based values; `strand` takes `+`, `-` or `.`.
    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        let position = || {
            parse_u64_fast(value.as_bytes())
                .ok_or_else(|| IntervalError::parse(0, format!("Invalid position: '{}'", value)))
        };
        match name.parse()? {
            FieldName::Chrom => self.set_chrom(value),
            FieldName::Start => self.set_start(position()?)?,
            FieldName::End => self.set_end(position()?)?,
            FieldName::Strand => self.set_strand(value.parse()?),
            FieldName::Name => self.set_name(value),
            FieldName::Score => self.set_score(value),
        }
        Ok(())
    }

    /// Check if this interval overlaps with another (half-open, same chromosome).
    #[inline]
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.chrom() == other.chrom() && self.start() < other.end() && other.start() < self.end()
    }

    /// Compute the overlap length with another interval.
    #[inline]
    pub fn overlap_length(&self, other: &Interval) -> u64 {
        if !self.overlaps(other) {
            return 0;
        }
        self.end().min(other.end()) - self.start().max(other.start())
    }

    /// `chrom:start-end(strand)`, used in error messages.
    pub fn region(&self) -> String {
        format!(
            "{}:{}-{}({})",
            self.chrom(),
            self.start(),
            self.end(),
            self.strand()
        )
    }

    /// Positional relation to `other`.
    ///
    /// Different chromosomes or strands are `Unordered`. If either interval
    /// strictly contains the other (no shared boundary) the relation is
    /// ambiguous and an [`IntervalError::Incomparable`] is returned.
    pub fn compare(&self, other: &Interval) -> Result<Relation> {
        if self.chrom() != other.chrom() || self.strand() != other.strand() {
            return Ok(Relation::Unordered);
        }

        let (a_start, a_end) = (self.start(), self.end());
        let (b_start, b_end) = (other.start(), other.end());

        if (a_start < b_start && a_end > b_end) || (b_start < a_start && b_end > a_end) {
            return Err(IntervalError::Incomparable {
                a: self.region(),
                b: other.region(),
            });
        }

        let relation = if a_start == b_start && a_end == b_end {
            Relation::Equal
        } else if a_end < b_start {
            Relation::Less
        } else if a_start > b_end {
            Relation::Greater
        } else if a_start <= b_start && a_end <= b_end {
            Relation::LessEqual
        } else {
            Relation::GreaterEqual
        };
        Ok(relation)
    }

    pub fn is_equal(&self, other: &Interval) -> Result<bool> {
        self.compare(other).map(Relation::is_eq)
    }

    pub fn is_not_equal(&self, other: &Interval) -> Result<bool> {
        self.compare(other).map(Relation::is_ne)
    }

    pub fn is_le(&self, other: &Interval) -> Result<bool> {
        self.compare(other).map(Relation::is_le)
    }

    pub fn is_ge(&self, other: &Interval) -> Result<bool> {
        self.compare(other).map(Relation::is_ge)
    }

    pub fn is_lt(&self, other: &Interval) -> Result<bool> {
        self.compare(other).map(Relation::is_lt)
    }

    pub fn is_gt(&self, other: &Interval) -> Result<bool> {
        self.compare(other).map(Relation::is_gt)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str("\t")?;
            }
            f.write_str(field)?;
        }
        Ok(())
    }
}

impl FromStr for Interval {
    type Err = IntervalError;

    /// Parse a single line, guessing its format from the line's shape.
    fn from_str(line: &str) -> Result<Self> {
        let file_type = classify_line(line)
            .ok_or_else(|| IntervalError::UnrecognizedFormat(line.to_string()))?;
        Self::parse_line(line, file_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GFF_LINE: &str =
        "chr1\tucb\tgene\t465\t805\t.\t+\t.\tID=thaliana_1_465_805;match=scaffold_801404.1";
    const GTF_LINE: &str =
        "chr1\tsrc\texon\t11\t20\t0\t-\t.\tgene_id \"g1\"; transcript_id \"t1\";";

    #[test]
    fn test_new_interval() {
        let iv = Interval::new("chr21", 9719768, 9739768).with_strand(Strand::Minus);
        assert_eq!(iv.chrom(), "chr21");
        assert_eq!(iv.start(), 9719768);
        assert_eq!(iv.end(), 9739768);
        assert_eq!(iv.strand(), Strand::Minus);
        assert_eq!(iv.length(), 20000);
        assert_eq!(iv.to_string(), "chr21\t9719768\t9739768\t.\t.\t-");
    }

    #[test]
    fn test_default_strand_is_unknown() {
        let iv = Interval::new("chr1", 1, 2);
        assert_eq!(iv.strand(), Strand::Unknown);
        assert_eq!(iv.field_count(), 3);
    }

    #[test]
    fn test_parse_bed_round_trip() {
        let line = "chr1\t100\t200\tfeat\t0\t+\textra";
        let iv = Interval::parse_line(line, FileType::Bed).unwrap();
        assert_eq!(iv.to_string(), line);
        assert_eq!(iv.name(), "feat");
        assert_eq!(iv.score(), Some("0"));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Interval::parse_line("chr1\t100", FileType::Bed),
            Err(IntervalError::Parse { .. })
        ));
        assert!(matches!(
            Interval::parse_line("chr1\tabc\t200", FileType::Bed),
            Err(IntervalError::Parse { .. })
        ));
        assert!(matches!(
            Interval::parse_line("chr1\t300\t200", FileType::Bed),
            Err(IntervalError::Parse { .. })
        ));
        assert!(Interval::parse_line("chr1\t100\t200", FileType::Gff).is_err());
    }

    #[test]
    fn test_gff_coordinates() {
        let mut iv = Interval::parse_line(GFF_LINE, FileType::Gff).unwrap();
        assert_eq!(iv.start(), 464);
        assert_eq!(iv.end(), 805);
        assert_eq!(iv.length(), 341);
        assert_eq!(iv.strand(), Strand::Plus);
        assert_eq!(iv.name(), "thaliana_1_465_805");

        let start = iv.start();
        iv.set_start(start).unwrap();
        assert_eq!(iv.field(3).unwrap(), "465");
        assert_eq!(iv.to_string(), GFF_LINE);

        iv.set_start(0).unwrap();
        assert_eq!(iv.field(3).unwrap(), "1");
        assert_eq!(iv.start(), 0);
    }

    #[test]
    fn test_set_field_updates_coordinates() {
        let mut iv = Interval::parse_line(GFF_LINE, FileType::Gff).unwrap();
        iv.set_field(3, "500").unwrap();
        assert_eq!(iv.start(), 499);

        let mut bed = Interval::new("chr1", 100, 200);
        bed.set_field(-1, "250").unwrap();
        assert_eq!(bed.end(), 250);
    }

    #[test]
    fn test_set_field_rejects_bad_coordinates() {
        let mut iv = Interval::new("chr1", 100, 200);
        assert!(iv.set_field(1, "abc").is_err());
        assert!(iv.set_field(1, "300").is_err());
        assert!(iv.set_end(50).is_err());
        assert!(iv.set_start(201).is_err());
        assert_eq!(iv.to_string(), "chr1\t100\t200");
    }

    #[test]
    fn test_gff_start_zero_is_rejected() {
        let line = "chr1\tsrc\tgene\t0\t10\t.\t+\t.\tID=g1";
        assert!(matches!(
            Interval::parse_line(line, FileType::Gff),
            Err(IntervalError::Parse { .. })
        ));
        let gtf = "chr1\tsrc\texon\t0\t10\t.\t+\t.\tgene_id \"g1\";";
        assert!(Interval::parse_line(gtf, FileType::Gtf).is_err());

        let mut iv = Interval::parse_line(GFF_LINE, FileType::Gff).unwrap();
        assert!(matches!(
            iv.set_field(3, "0"),
            Err(IntervalError::Parse { .. })
        ));
        assert_eq!(iv.field(3).unwrap(), "465");
        assert_eq!(iv.to_string(), GFF_LINE);

        // BED starts are 0-based, so 0 is a valid position there.
        let mut bed = Interval::new("chr1", 5, 10);
        bed.set_field(1, "0").unwrap();
        assert_eq!(bed.start(), 0);
    }

    #[test]
    fn test_try_new_rejects_inverted_range() {
        assert!(matches!(
            Interval::try_new("chr1", 200, 100),
            Err(IntervalError::Parse { .. })
        ));
        let iv = Interval::try_new("chr1", 100, 100).unwrap();
        assert!(iv.is_empty());
        assert_eq!(iv.to_string(), "chr1\t100\t100");
    }

    #[test]
    fn test_negative_index_and_range_errors() {
        let iv = Interval::parse_line("chr1\t1\t2\tn\t0\t+", FileType::Bed).unwrap();
        assert_eq!(iv.field(-1).unwrap(), "+");
        assert_eq!(iv.field(-6).unwrap(), "chr1");
        assert!(matches!(
            iv.field(6),
            Err(IntervalError::IndexOutOfRange { index: 6, len: 6 })
        ));
        assert!(iv.field(-7).is_err());
    }

    #[test]
    fn test_slices_clamp() {
        let iv = Interval::parse_line("chr1\t1\t2\tn\t0\t+", FileType::Bed).unwrap();
        assert_eq!(iv.slice(..3).len(), 3);
        assert_eq!(iv.slice(3..3).len(), 0);
        assert_eq!(iv.slice(2..).len(), 4);
        assert_eq!(iv.slice(1..=2), ["1", "2"]);
        assert_eq!(iv.slice(-2..), ["0", "+"]);
        assert_eq!(iv.slice(..=-1).len(), 6);
        assert_eq!(iv.slice(4..100), ["0", "+"]);
        assert_eq!(iv.slice(-100..1), ["chr1"]);
        assert!(iv.slice(5..2).is_empty());
    }

    #[test]
    fn test_named_access() {
        let mut iv = Interval::parse_line(GFF_LINE, FileType::Gff).unwrap();
        assert_eq!(iv.get("chrom").unwrap(), FieldValue::Text("chr1".into()));
        assert_eq!(iv.get("start").unwrap(), FieldValue::Position(464));
        assert_eq!(iv.get("end").unwrap(), FieldValue::Position(805));
        assert_eq!(iv.get("strand").unwrap(), FieldValue::Strand(Strand::Plus));
        assert!(matches!(iv.get("bogus"), Err(IntervalError::UnknownField(_))));

        iv.set("chrom", "fake").unwrap();
        assert_eq!(iv.chrom(), "fake");
        iv.set("start", "99").unwrap();
        assert_eq!(iv.field(3).unwrap(), "100");
        iv.set("strand", "-").unwrap();
        assert_eq!(iv.strand(), Strand::Minus);
        assert!(iv.set("strand", "x").is_err());
        assert!(iv.set("start", "-3").is_err());
        assert!(matches!(
            iv.set("bogus", "1"),
            Err(IntervalError::UnknownField(_))
        ));
    }

    #[test]
    fn test_append() {
        let mut iv = Interval::new("chr1", 1, 2);
        iv.append("asdf");
        assert_eq!(iv.field(-1).unwrap(), "asdf");
        assert_eq!(iv.field(1).unwrap(), "1");
        assert_eq!(iv.to_string(), "chr1\t1\t2\tasdf");
    }

    #[test]
    fn test_bed_has_no_attributes() {
        let mut iv = Interval::new("chr1", 1, 2);
        assert!(matches!(iv.attrs(), Err(IntervalError::NoAttributes(FileType::Bed))));
        assert!(matches!(
            iv.set_attr("a", "b"),
            Err(IntervalError::NoAttributes(FileType::Bed))
        ));
    }

    #[test]
    fn test_set_attrs_rewrites_only_attribute_column() {
        let mut iv = Interval::parse_line(GFF_LINE, FileType::Gff).unwrap();
        iv.set_attr("ID", "fake").unwrap();
        iv.set_attr("field0", "asdf").unwrap();
        let column = iv.field(8).unwrap();
        assert!(column.contains("ID=fake"));
        assert!(column.contains("field0=asdf"));
        assert_eq!(iv.attrs().unwrap().to_string(), column);
        let original = Interval::parse_line(GFF_LINE, FileType::Gff).unwrap();
        assert_eq!(iv.slice(..8), original.slice(..8));
    }

    #[test]
    fn test_set_attrs_converts_style() {
        let mut iv = Interval::parse_line(GTF_LINE, FileType::Gtf).unwrap();
        let mut attrs = Attributes::new(AttrStyle::Gff);
        attrs.insert("gene_id", "g2");
        iv.set_attrs(&attrs).unwrap();
        assert_eq!(iv.field(8).unwrap(), "gene_id \"g2\";");
    }

    #[test]
    fn test_names() {
        let mut bed = Interval::new("chr1", 1, 2);
        assert_eq!(bed.name(), "");
        bed.set_name("bart simpson");
        assert_eq!(bed.name(), "bart simpson");
        assert_eq!(bed.to_string(), "chr1\t1\t2\tbart simpson");

        let mut gtf = Interval::parse_line(GTF_LINE, FileType::Gtf).unwrap();
        assert_eq!(gtf.name(), "t1");
        gtf.set_name("bart");
        assert_eq!(gtf.attr("transcript_id").unwrap(), Some("bart".to_string()));

        let mut gff =
            Interval::parse_line("chr1\ts\tgene\t1\t10\t.\t+\t.\t.", FileType::Gff).unwrap();
        assert_eq!(gff.name(), "");
        gff.set_name("bart");
        assert_eq!(gff.field(8).unwrap(), "ID=bart");
    }

    #[test]
    fn test_from_str_guesses_format() {
        let iv: Interval = GTF_LINE.parse().unwrap();
        assert_eq!(iv.file_type(), FileType::Gtf);
        assert_eq!(iv.start(), 10);
        assert!("not an interval".parse::<Interval>().is_err());
    }

    #[test]
    fn test_overlaps() {
        let a = Interval::new("chr1", 100, 200);
        let b = Interval::new("chr1", 150, 250);
        let c = Interval::new("chr1", 200, 300);
        let d = Interval::new("chr2", 100, 200);

        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c)); // Adjacent, not overlapping
        assert!(!a.overlaps(&d)); // Different chromosome
        assert_eq!(a.overlap_length(&b), 50);
        assert_eq!(a.overlap_length(&c), 0);
    }

    #[test]
    fn test_compare_adjacent_and_gapped() {
        let a = Interval::new("chr21", 100, 300);
        let b = Interval::new("chr21", 300, 300);
        assert_eq!(a.compare(&b).unwrap(), Relation::LessEqual);
        assert!(a.is_le(&b).unwrap());
        assert!(!a.is_ge(&b).unwrap());
        assert!(!a.is_lt(&b).unwrap());
        assert!(!a.is_gt(&b).unwrap());
        assert!(!a.is_equal(&b).unwrap());
        assert!(a.is_not_equal(&b).unwrap());

        let a = Interval::new("chr21", 100, 200);
        let b = Interval::new("chr21", 201, 300);
        assert_eq!(a.compare(&b).unwrap(), Relation::Less);
        assert_eq!(b.compare(&a).unwrap(), Relation::Greater);
    }

    #[test]
    fn test_compare_nested_is_error() {
        let a = Interval::new("chr21", 100, 200);
        let b = Interval::new("chr21", 50, 300);
        assert!(matches!(a.compare(&b), Err(IntervalError::Incomparable { .. })));
        assert!(a.is_equal(&b).is_err());
        assert!(a.is_not_equal(&b).is_err());
        assert!(b.is_le(&a).is_err());
    }

    #[test]
    fn test_compare_unordered() {
        let a = Interval::new("chr21", 100, 200).with_strand(Strand::Plus);
        let b = Interval::new("chr21", 100, 200).with_strand(Strand::Minus);
        assert_eq!(a.compare(&b).unwrap(), Relation::Unordered);

        let a = Interval::new("none", 1, 100);
        let b = Interval::new("chr21", 1, 100);
        let r = a.compare(&b).unwrap();
        assert!(!r.is_eq() && r.is_ne() && !r.is_le() && !r.is_ge() && !r.is_lt() && !r.is_gt());
    }
}
