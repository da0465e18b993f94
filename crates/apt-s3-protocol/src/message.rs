//! Protocol messages: an ordered field list under a status header.
//!
//! Wire shape, reproduced byte-for-byte by [`Message::to_wire`]:
//!
//! ```text
//! 600 URI Acquire
//! URI: s3://my-bucket/pool/main/p/pkg/pkg_1.0_amd64.deb
//! Filename: /var/cache/apt/archives/partial/pkg_1.0_amd64.deb
//!
//! ```
//!
//! A message is immutable once constructed. Field names are not required
//! to be unique; [`Message::field`] returns the first match and
//! [`Message::fields_named`] returns all matches in order.

use std::fmt;

use crate::error::ProtocolError;
use crate::header::Header;

/// A single `Name: Value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    value: String,
}

impl Field {
    /// Create a field.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// The field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The field value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

/// A complete protocol message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    header: Header,
    fields: Vec<Field>,
}

impl Message {
    /// Create a message from a header and an ordered field list.
    #[must_use]
    pub fn new(header: impl Into<Header>, fields: Vec<Field>) -> Self {
        Self {
            header: header.into(),
            fields,
        }
    }

    /// Parse one message block.
    ///
    /// Leading and trailing blank lines are tolerated (the framer may hand
    /// over a buffer that accumulated stray blank lines before the status
    /// line). The first non-empty line must be `<code> <description>`;
    /// every following non-empty line must be `Name: Value`.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError`] if the status line is absent or malformed,
    /// or if a field line has no `:` separator.
    pub fn parse(input: &str) -> Result<Self, ProtocolError> {
        let mut lines = input
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty());

        let status_line = lines.next().ok_or(ProtocolError::MissingStatusLine)?;
        let (code, description) = status_line
            .split_once(' ')
            .ok_or_else(|| ProtocolError::MalformedStatusLine(status_line.to_owned()))?;
        let status: u16 = code
            .parse()
            .map_err(|_| ProtocolError::MalformedStatusLine(status_line.to_owned()))?;
        let header = Header::new(status, description.trim());

        let mut fields = Vec::new();
        for line in lines {
            let (name, value) = line
                .split_once(':')
                .ok_or_else(|| ProtocolError::MalformedField(line.to_owned()))?;
            fields.push(Field::new(name.trim(), value.trim()));
        }

        Ok(Self { header, fields })
    }

    /// The status header.
    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// All fields, in construction order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// The value of the first field with the given name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(Field::value)
    }

    /// The values of every field with the given name, in order.
    pub fn fields_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> {
        self.fields
            .iter()
            .filter(move |f| f.name == name)
            .map(Field::value)
    }

    /// Serialize to the wire representation, including the terminating
    /// blank line.
    #[must_use]
    pub fn to_wire(&self) -> String {
        format!("{self}\n")
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header)?;
        for field in &self.fields {
            writeln!(f, "{field}")?;
        }
        Ok(())
    }
}
