use crate::{Error, Result};

use std::{fmt, str::FromStr};

/// Primitive column type understood by the mapping engine.
///
/// Parses from the engine's type names (`"STRING"`, `"STRING(64)"`,
/// `"ENUM('draft', 'published')"`, `"ARRAY(INTEGER)"`), case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    /// Variable length string, optionally bounded
    String(Option<u32>),
    /// Fixed length string
    Char(Option<u32>),
    Text,
    Integer,
    BigInt,
    Float,
    Real,
    Double,
    Decimal,
    Boolean,
    Time,
    /// Date and time
    Date,
    /// Date without a time component
    DateOnly,
    Uuid,
    Json,
    Jsonb,
    Blob,
    Enum(Vec<String>),
    Array(Box<DataType>),
    /// Computed attribute that is never stored
    Virtual,
}

impl DataType {
    pub fn is_virtual(&self) -> bool {
        matches!(self, DataType::Virtual)
    }

    /// The engine's name for this type, without arguments.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::String(_) => "STRING",
            DataType::Char(_) => "CHAR",
            DataType::Text => "TEXT",
            DataType::Integer => "INTEGER",
            DataType::BigInt => "BIGINT",
            DataType::Float => "FLOAT",
            DataType::Real => "REAL",
            DataType::Double => "DOUBLE",
            DataType::Decimal => "DECIMAL",
            DataType::Boolean => "BOOLEAN",
            DataType::Time => "TIME",
            DataType::Date => "DATE",
            DataType::DateOnly => "DATEONLY",
            DataType::Uuid => "UUID",
            DataType::Json => "JSON",
            DataType::Jsonb => "JSONB",
            DataType::Blob => "BLOB",
            DataType::Enum(_) => "ENUM",
            DataType::Array(_) => "ARRAY",
            DataType::Virtual => "VIRTUAL",
        }
    }
}

impl FromStr for DataType {
    type Err = Error;

    fn from_str(src: &str) -> Result<DataType> {
        let src = src.trim();

        let (head, args) = match src.find('(') {
            Some(open) if src.ends_with(')') => (&src[..open], Some(&src[open + 1..src.len() - 1])),
            Some(_) => return Err(Error::invalid_field_type(format!("`{src}`"))),
            None => (src, None),
        };

        let length = |args: Option<&str>| -> Result<Option<u32>> {
            args.map(|n| {
                n.trim()
                    .parse::<u32>()
                    .map_err(|_| Error::invalid_field_type(format!("`{src}` has an invalid length")))
            })
            .transpose()
        };

        let ty = match (head.trim().to_ascii_uppercase().as_str(), args) {
            ("STRING", args) => DataType::String(length(args)?),
            ("CHAR", args) => DataType::Char(length(args)?),
            ("TEXT", None) => DataType::Text,
            ("INTEGER", None) => DataType::Integer,
            ("BIGINT", None) => DataType::BigInt,
            ("FLOAT", None) => DataType::Float,
            ("REAL", None) => DataType::Real,
            ("DOUBLE", None) => DataType::Double,
            ("DECIMAL", None) => DataType::Decimal,
            ("BOOLEAN", None) => DataType::Boolean,
            ("TIME", None) => DataType::Time,
            ("DATE", None) => DataType::Date,
            ("DATEONLY", None) => DataType::DateOnly,
            ("UUID", None) => DataType::Uuid,
            ("JSON", None) => DataType::Json,
            ("JSONB", None) => DataType::Jsonb,
            ("BLOB", None) => DataType::Blob,
            ("VIRTUAL", None) => DataType::Virtual,
            ("ENUM", Some(values)) => DataType::Enum(parse_enum_values(values)?),
            ("ARRAY", Some(inner)) => DataType::Array(Box::new(inner.parse()?)),
            _ => return Err(Error::invalid_field_type(format!("`{src}`"))),
        };

        Ok(ty)
    }
}

/// Splits the body of `ENUM(...)` into its values. Values may be quoted
/// with `'` or `"`; inside quotes `\` escapes the next character and commas
/// are part of the value.
fn parse_enum_values(src: &str) -> Result<Vec<String>> {
    let mut values = vec![];
    let mut chars = src.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}

        let value = match chars.peek().copied() {
            None if values.is_empty() => {
                return Err(Error::invalid_field_type(format!(
                    "`ENUM({src})` has no values"
                )))
            }
            Some(quote @ ('\'' | '"')) => {
                chars.next();
                let mut value = String::new();

                let closed = loop {
                    match chars.next() {
                        Some('\\') => match chars.next() {
                            Some(c) => value.push(c),
                            None => break None,
                        },
                        Some(c) if c == quote => break Some(value),
                        Some(c) => value.push(c),
                        None => break None,
                    }
                };

                closed.ok_or_else(|| {
                    Error::invalid_field_type(format!("`ENUM({src})` has an unterminated quote"))
                })?
            }
            _ => {
                let mut value = String::new();
                while let Some(c) = chars.next_if(|c| *c != ',') {
                    value.push(c);
                }
                value.trim_end().to_string()
            }
        };

        if value.is_empty() {
            return Err(Error::invalid_field_type(format!(
                "`ENUM({src})` has an empty value"
            )));
        }
        values.push(value);

        while chars.next_if(|c| c.is_whitespace()).is_some() {}

        match chars.next() {
            None => return Ok(values),
            Some(',') => {}
            Some(c) => {
                return Err(Error::invalid_field_type(format!(
                    "`ENUM({src})` has an unexpected `{c}`"
                )))
            }
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::String(Some(len)) | DataType::Char(Some(len)) => {
                write!(fmt, "{}({len})", self.as_str())
            }
            DataType::Enum(values) => {
                fmt.write_str("ENUM(")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        fmt.write_str(", ")?;
                    }
                    write!(fmt, "'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))?;
                }
                fmt.write_str(")")
            }
            DataType::Array(inner) => write!(fmt, "ARRAY({inner})"),
            _ => fmt.write_str(self.as_str()),
        }
    }
}
