//! Literal values carried by `Literal` segments.
//!
//! Values are rendered inline. Text is escaped by doubling single quotes,
//! blobs become hex literals, and booleans follow the context's
//! [`BooleanStyle`]. Floats always keep a fraction or exponent (`1.0`,
//! `1e-7`); NaN and the infinities have no SQL literal and are rejected.

use std::fmt::Write;

use crate::error::{RenderError, Result};
use crate::render::BooleanStyle;

/// A SQL literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// NULL value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// Text value.
    Text(String),
    /// Binary blob value.
    Blob(Vec<u8>),
}

impl SqlValue {
    /// Appends the inline SQL representation of this value to `out`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::NonFiniteFloat`] for NaN and infinite floats.
    pub fn write_inline(&self, out: &mut String, booleans: BooleanStyle) -> Result<()> {
        match self {
            Self::Null => out.push_str("NULL"),
            Self::Bool(b) => out.push_str(booleans.literal(*b)),
            Self::Int(n) => {
                let _ = write!(out, "{n}");
            }
            Self::Float(f) if !f.is_finite() => {
                return Err(RenderError::NonFiniteFloat { value: *f });
            }
            Self::Float(f) => {
                let _ = write!(out, "{f:?}");
            }
            Self::Text(s) => {
                out.push('\'');
                for c in s.chars() {
                    if c == '\'' {
                        out.push('\'');
                    }
                    out.push(c);
                }
                out.push('\'');
            }
            Self::Blob(bytes) => {
                out.push_str("X'");
                for byte in bytes {
                    let _ = write!(out, "{byte:02X}");
                }
                out.push('\'');
            }
        }
        Ok(())
    }

    /// Returns the inline SQL representation of this value.
    ///
    /// # Errors
    ///
    /// See [`SqlValue::write_inline`].
    pub fn to_sql_inline(&self, booleans: BooleanStyle) -> Result<String> {
        let mut out = String::new();
        self.write_inline(&mut out, booleans)?;
        Ok(out)
    }
}

/// Conversion into [`SqlValue`] for the segment constructors.
pub trait ToSqlValue {
    /// Converts the value to a `SqlValue`.
    fn to_sql_value(self) -> SqlValue;
}

impl ToSqlValue for SqlValue {
    fn to_sql_value(self) -> SqlValue {
        self
    }
}

impl ToSqlValue for bool {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Bool(self)
    }
}

impl ToSqlValue for i64 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int(self)
    }
}

impl ToSqlValue for i32 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int(i64::from(self))
    }
}

impl ToSqlValue for u32 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int(i64::from(self))
    }
}

impl ToSqlValue for f64 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Float(self)
    }
}

impl ToSqlValue for String {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(self)
    }
}

impl ToSqlValue for &str {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(String::from(self))
    }
}

impl ToSqlValue for Vec<u8> {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Blob(self)
    }
}

impl<T: ToSqlValue> ToSqlValue for Option<T> {
    fn to_sql_value(self) -> SqlValue {
        self.map_or(SqlValue::Null, ToSqlValue::to_sql_value)
    }
}
