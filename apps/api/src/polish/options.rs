//! Polish options. Each accepts its Korean label (what the editor shows) or an
//! English id; the Korean label is what goes into the prompt.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {field} '{value}'")]
pub struct OptionError {
    pub field: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Neutral,
    Friendly,
    Formal,
}

impl Tone {
    pub fn label(self) -> &'static str {
        match self {
            Tone::Neutral => "중립",
            Tone::Friendly => "친절",
            Tone::Formal => "격식",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "중립" | "neutral" => Some(Tone::Neutral),
            "친절" | "friendly" => Some(Tone::Friendly),
            "격식" | "formal" => Some(Tone::Formal),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Length {
    Short,
    #[default]
    Normal,
    Detailed,
}

impl Length {
    pub fn label(self) -> &'static str {
        match self {
            Length::Short => "짧게",
            Length::Normal => "보통",
            Length::Detailed => "자세히",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "짧게" | "short" => Some(Length::Short),
            "보통" | "normal" => Some(Length::Normal),
            "자세히" | "detailed" => Some(Length::Detailed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Prose,
    Bullets,
}

impl Format {
    pub fn label(self) -> &'static str {
        match self {
            Format::Prose => "일반문장",
            Format::Bullets => "글머리표",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "일반문장" | "prose" => Some(Format::Prose),
            "글머리표" | "bullets" => Some(Format::Bullets),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PolishOptions {
    pub tone: Tone,
    pub length: Length,
    pub format: Format,
}

/// Blank or absent means the default.
fn pick<T: Default>(
    field: &'static str,
    raw: Option<&str>,
    parse: fn(&str) -> Option<T>,
) -> Result<T, OptionError> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(T::default()),
        Some(v) => parse(v).ok_or_else(|| OptionError {
            field,
            value: v.to_string(),
        }),
    }
}

impl PolishOptions {
    pub fn parse(
        tone: Option<&str>,
        length: Option<&str>,
        format: Option<&str>,
    ) -> Result<Self, OptionError> {
        Ok(Self {
            tone: pick("tone", tone, Tone::parse)?,
            length: pick("length", length, Length::parse)?,
            format: pick("format", format, Format::parse)?,
        })
    }
}

impl fmt::Display for PolishOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "어투: {} / 길이: {} / 형식: {}",
            self.tone.label(),
            self.length.label(),
            self.format.label()
        )
    }
}
