//! `{field}` templates rendered against a [`LogRecord`]

use crate::core::{LogRecord, LoggerError, Result, TimestampFormat};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Message,
    LevelName,
    Name,
    Asctime,
    Thread,
    Module,
    File,
    Line,
}

impl Field {
    fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "message" => Field::Message,
            "levelname" => Field::LevelName,
            "name" => Field::Name,
            "asctime" => Field::Asctime,
            "thread" => Field::Thread,
            "module" => Field::Module,
            "file" => Field::File,
            "line" => Field::Line,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(Field),
}

/// A parsed template such as `"{levelname}:{asctime}:{name}:{message}"`.
///
/// `{{` and `}}` produce literal braces. Escape sequences embedded by the
/// style helper pass through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(c) => name.push(c),
                            None => {
                                return Err(LoggerError::template(source, "unclosed '{'"));
                            }
                        }
                    }
                    let field = Field::parse(name.trim()).ok_or_else(|| {
                        LoggerError::template(source, format!("unknown field '{}'", name))
                    })?;
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Field(field));
                }
                '}' => return Err(LoggerError::template(source, "unmatched '}'")),
                c => literal.push(c),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether rendering needs the record's timestamp
    pub fn uses_time(&self) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Field(Field::Asctime)))
    }

    pub fn render(&self, record: &LogRecord, timestamp_format: &TimestampFormat) -> String {
        let mut out = String::with_capacity(self.source.len() + record.message.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(field) => match field {
                    Field::Message => out.push_str(&record.message),
                    Field::LevelName => out.push_str(record.level.to_str()),
                    Field::Name => out.push_str(&record.logger_name),
                    Field::Asctime => out.push_str(&timestamp_format.format(&record.timestamp)),
                    Field::Thread => out.push_str(record.thread_label()),
                    Field::Module => out.push_str(record.module_path.as_deref().unwrap_or("")),
                    Field::File => out.push_str(record.file.as_deref().unwrap_or("")),
                    Field::Line => {
                        if let Some(line) = record.line {
                            out.push_str(&line.to_string());
                        }
                    }
                },
            }
        }
        out
    }
}
