//! Output-template parsing and placeholder substitution.

use crate::Value;
use std::fmt;

/// A parse error for a `translatable` template string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A placeholder index of `0` or above the signature arity.
    PlaceholderOutOfRange { index: usize, arity: usize },
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::PlaceholderOutOfRange { index, arity } => write!(
                f,
                "placeholder %{} is out of range for {} parameter(s)",
                index, arity
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Lit(String),
    /// 0-based argument index.
    Arg(usize),
}

/// An output command template with positional `%1..%n` placeholders, parsed
/// once at table-load time. Parsing validates every placeholder against the
/// signature arity, so substitution can never leave a placeholder behind.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    raw: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parses `raw`, accepting placeholders `%1..=%arity`. A `%` not followed
    /// by digits is a literal percent sign.
    pub fn parse(raw: &str, arity: usize) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut lit = String::new();
        let mut chars = raw.chars().peekable();

        while let Some(ch) = chars.next() {
            if ch != '%' {
                lit.push(ch);
                continue;
            }

            let mut digits = String::new();
            while let Some(digit) = chars.peek().filter(|c| c.is_ascii_digit()) {
                digits.push(*digit);
                chars.next();
            }

            if digits.is_empty() {
                lit.push('%');
                continue;
            }

            // The digit count is bounded by the template length, but the
            // index itself must land inside the parameter list.
            let index: usize = digits.parse().unwrap_or(usize::MAX);
            if index == 0 || index > arity {
                return Err(TemplateError::PlaceholderOutOfRange { index, arity });
            }

            if !lit.is_empty() {
                segments.push(Segment::Lit(std::mem::take(&mut lit)));
            }
            segments.push(Segment::Arg(index - 1));
        }

        if !lit.is_empty() {
            segments.push(Segment::Lit(lit));
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// Substitutes `args` positionally. `args` must have the arity the
    /// template was parsed against.
    pub fn substitute(&self, args: &[Value]) -> String {
        let mut out = String::with_capacity(self.raw.len());
        for segment in &self.segments {
            match segment {
                Segment::Lit(text) => out.push_str(text),
                Segment::Arg(index) => out.push_str(&args[*index].to_string()),
            }
        }
        out
    }

    /// The unparsed template text.
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_positionally() {
        let template = Template::parse("setblock ~%1 ~%2 ~%3 %4", 4).unwrap();
        let args = vec![
            Value::Number(1.0),
            Value::Number(2.0),
            Value::Number(3.0),
            Value::Str("minecraft:air".to_string()),
        ];
        assert_eq!(template.substitute(&args), "setblock ~1 ~2 ~3 minecraft:air");
    }

    #[test]
    fn numbers_render_without_forced_decimals() {
        let template = Template::parse("fill %1 %2", 2).unwrap();
        let args = vec![Value::Number(-4.0), Value::Number(2.5)];
        assert_eq!(template.substitute(&args), "fill -4 2.5");
    }

    #[test]
    fn multi_digit_placeholders() {
        let arity = 12;
        let template = Template::parse("a %10 b %2", arity).unwrap();
        let args: Vec<Value> = (0..arity).map(|i| Value::Number(i as f64)).collect();
        assert_eq!(template.substitute(&args), "a 9 b 1");
    }

    #[test]
    fn bare_percent_is_literal() {
        let template = Template::parse("scale %1%", 1).unwrap();
        assert_eq!(
            template.substitute(&[Value::Number(50.0)]),
            "scale 50%"
        );
    }

    #[test]
    fn out_of_range_placeholder_is_a_load_error() {
        assert_eq!(
            Template::parse("setblock %5", 4),
            Err(TemplateError::PlaceholderOutOfRange { index: 5, arity: 4 })
        );
        assert_eq!(
            Template::parse("%0", 4),
            Err(TemplateError::PlaceholderOutOfRange { index: 0, arity: 4 })
        );
    }
}
