//! Godot text scene (`.tscn`) writing primitives.
//!
//! Only the subset of the grammar the emitter produces: section headers,
//! `key = value` lines, typed packed arrays, string names, dictionaries of
//! resource references.

use std::fmt::{self, Display};
use std::io::{self, Write};

/// A section header attribute value.
#[derive(Debug, Clone, Copy)]
pub enum Attr<'a> {
    Int(usize),
    Str(&'a str),
}

impl Display for Attr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attr::Int(n) => write!(f, "{}", n),
            Attr::Str(s) => write!(f, "{}", Quoted(s)),
        }
    }
}

/// Element type of a packed array literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackedKind {
    Float32,
    Byte,
    Int32,
}

impl PackedKind {
    pub fn literal(&self) -> &'static str {
        match self {
            PackedKind::Float32 => "PackedFloat32Array",
            PackedKind::Byte => "PackedByteArray",
            PackedKind::Int32 => "PackedInt32Array",
        }
    }
}

/// A float rendered with exactly one digit after the decimal point.
#[derive(Debug, Clone, Copy)]
pub struct Fixed1(pub f32);

impl Display for Fixed1 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Ties round away from zero; `{:.1}` alone rounds them to even
        let rounded = (f64::from(self.0) * 10.0).round() / 10.0;
        write!(f, "{:.1}", rounded)
    }
}

/// A double-quoted string literal.
#[derive(Debug, Clone, Copy)]
pub struct Quoted<'a>(pub &'a str);

impl Display for Quoted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"")?;
        for c in self.0.chars() {
            match c {
                '"' => f.write_str("\\\"")?,
                '\\' => f.write_str("\\\\")?,
                c => write!(f, "{}", c)?,
            }
        }
        f.write_str("\"")
    }
}

/// `ExtResource("<id>")`
pub fn ext_resource(id: &str) -> String {
    format!("ExtResource({})", Quoted(id))
}

/// `SubResource("<id>")`
pub fn sub_resource(id: &str) -> String {
    format!("SubResource({})", Quoted(id))
}

/// `&"<name>"`
pub fn string_name(name: &str) -> String {
    format!("&{}", Quoted(name))
}

/// Render a packed array literal with `", "` separators.
pub fn packed<I>(kind: PackedKind, items: I) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    let body = items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("{}({})", kind.literal(), body)
}

/// Sequential writer for scene text.
pub struct TscnWriter<W: Write> {
    out: W,
}

impl<W: Write> TscnWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// `[kind key="value" key=1]`
    pub fn section(&mut self, kind: &str, attrs: &[(&str, Attr<'_>)]) -> io::Result<()> {
        write!(self.out, "[{}", kind)?;
        for (key, value) in attrs {
            write!(self.out, " {}={}", key, value)?;
        }
        writeln!(self.out, "]")
    }

    /// `key = value`
    pub fn assign(&mut self, key: &str, value: impl Display) -> io::Result<()> {
        writeln!(self.out, "{} = {}", key, value)
    }

    /// A dictionary of string keys to already-rendered values.
    pub fn dictionary(&mut self, key: &str, entries: &[(&str, String)]) -> io::Result<()> {
        writeln!(self.out, "{} = {{", key)?;
        for (i, (name, value)) in entries.iter().enumerate() {
            let sep = if i + 1 < entries.len() { "," } else { "" };
            writeln!(self.out, "{}: {}{}", Quoted(name), value, sep)?;
        }
        writeln!(self.out, "}}")
    }

    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
