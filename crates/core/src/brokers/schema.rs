//! Per-broker column schemas.
//!
//! A schema names the columns an export must carry and how each one is
//! typed. Binding a table checks the header once; rows are then read by
//! column name through [`SchemaRow`], which reports failures as
//! `MalformedRow` with the 1-based data row number.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::activities::{parse_decimal_string, ImportTable};
use crate::errors::{Error, Result};

/// How a column's cells are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    /// Calendar date in the given `chrono` format.
    Date(&'static str),
    /// Decimal number, thousands separators allowed.
    Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: ColumnKind,
}

impl ColumnSpec {
    pub const fn text(name: &'static str) -> Self {
        Self {
            name,
            kind: ColumnKind::Text,
        }
    }

    pub const fn date(name: &'static str, format: &'static str) -> Self {
        Self {
            name,
            kind: ColumnKind::Date(format),
        }
    }

    pub const fn decimal(name: &'static str) -> Self {
        Self {
            name,
            kind: ColumnKind::Decimal,
        }
    }
}

/// Required columns of one broker export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub columns: &'static [ColumnSpec],
    /// Column holding the broker's action code.
    pub action_column: &'static str,
}

impl TableSchema {
    /// Checks the table header against the schema.
    ///
    /// Every schema column must be present; additional columns are ignored.
    /// Cells are typed lazily since rows dropped as `SKIP` often leave
    /// numeric columns blank.
    pub fn bind<'a>(&'a self, table: &'a ImportTable) -> Result<BoundTable<'a>> {
        let mut indices = HashMap::with_capacity(self.columns.len());
        let mut missing = Vec::new();

        for column in self.columns {
            match table.column_index(column.name) {
                Some(idx) => {
                    indices.insert(column.name, idx);
                }
                None => missing.push(column.name),
            }
        }

        if !missing.is_empty() {
            // Row 0 is the header
            return Err(Error::malformed(
                0,
                format!("missing column(s): {}", missing.join(", ")),
            ));
        }

        Ok(BoundTable {
            schema: self,
            table,
            indices,
        })
    }

    fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// A table whose header matched a schema.
#[derive(Debug)]
pub struct BoundTable<'a> {
    schema: &'a TableSchema,
    table: &'a ImportTable,
    indices: HashMap<&'static str, usize>,
}

impl<'a> BoundTable<'a> {
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = SchemaRow<'_>> + '_ {
        self.table
            .rows
            .iter()
            .enumerate()
            .map(move |(idx, cells)| SchemaRow {
                number: idx + 1,
                cells,
                bound: self,
            })
    }
}

/// One data row, read through the schema.
#[derive(Debug, Clone, Copy)]
pub struct SchemaRow<'a> {
    number: usize,
    cells: &'a [String],
    bound: &'a BoundTable<'a>,
}

impl<'a> SchemaRow<'a> {
    /// 1-based data row number, header excluded.
    pub fn number(&self) -> usize {
        self.number
    }

    /// Trimmed cell text.
    pub fn text(&self, name: &str) -> Result<&'a str> {
        self.cell(name, |kind| matches!(kind, ColumnKind::Text))
    }

    /// Decimal cell; a blank cell is an error.
    pub fn decimal(&self, name: &str) -> Result<Decimal> {
        let raw = self.cell(name, |kind| matches!(kind, ColumnKind::Decimal))?;
        parse_decimal_string(raw, name).map_err(|e| Error::malformed(self.number, e.to_string()))
    }

    /// Decimal cell where a blank cell means zero.
    pub fn decimal_or_zero(&self, name: &str) -> Result<Decimal> {
        let raw = self.cell(name, |kind| matches!(kind, ColumnKind::Decimal))?;
        if raw.is_empty() {
            return Ok(Decimal::ZERO);
        }
        parse_decimal_string(raw, name).map_err(|e| Error::malformed(self.number, e.to_string()))
    }

    /// Date cell in the column's declared format.
    pub fn date(&self, name: &str) -> Result<NaiveDate> {
        let spec = self.spec(name)?;
        let ColumnKind::Date(format) = spec.kind else {
            return Err(Self::kind_mismatch(name));
        };
        let raw = self.raw(name);
        NaiveDate::parse_from_str(raw, format).map_err(|e| {
            Error::malformed(
                self.number,
                format!("{} '{}' does not match {}: {}", name, raw, format, e),
            )
        })
    }

    fn cell(&self, name: &str, accepts: impl Fn(ColumnKind) -> bool) -> Result<&'a str> {
        let spec = self.spec(name)?;
        if !accepts(spec.kind) {
            return Err(Self::kind_mismatch(name));
        }
        Ok(self.raw(name))
    }

    fn spec(&self, name: &str) -> Result<&'a ColumnSpec> {
        self.bound
            .schema
            .column(name)
            .ok_or_else(|| Error::Unexpected(format!("column '{}' is not in the schema", name)))
    }

    fn raw(&self, name: &str) -> &'a str {
        self.bound
            .indices
            .get(name)
            .and_then(|&idx| self.cells.get(idx))
            .map(|cell| cell.trim())
            .unwrap_or("")
    }

    fn kind_mismatch(name: &str) -> Error {
        Error::Unexpected(format!("column '{}' read with the wrong type", name))
    }
}
