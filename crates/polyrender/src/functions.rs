//! The function library available to templates and expressions.
//!
//! Functions are plain [`NativeFunction`]s over [`Value`], so the same table
//! serves every engine that accepts host functions. In templates each function
//! is registered twice, as a global function and as a filter; the filter form
//! passes the piped value as the first argument:
//!
//! ```jinja
//! {{ trim_prefix(image, "docker.io/") }}
//! {{ image | trim_prefix("docker.io/") }}
//! ```
//!
//! ## Standard Functions
//!
//! | Function | Arguments | Result |
//! |----------|-----------|--------|
//! | `trim_prefix` | `s, prefix` | `s` without a leading `prefix` |
//! | `trim_suffix` | `s, suffix` | `s` without a trailing `suffix` |
//! | `has_prefix` | `s, prefix` | bool |
//! | `has_suffix` | `s, suffix` | bool |
//! | `split` | `s, sep` | list of strings |
//! | `pad_left` | `s, width` | right-aligned to display width |
//! | `pad_right` | `s, width` | left-aligned to display width |
//! | `truncate_width` | `s, width` | cut to display width with `…` |
//! | `to_json` | `value` | compact JSON text |
//! | `from_json` | `s` | parsed value |
//! | `to_yaml` | `value` | YAML text |
//! | `humanize_bytes` | `n` | `1.5 KiB`, `3 MiB`, ... |

use std::collections::BTreeMap;

use polyrender_value::{NativeFunction, Value};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// A named table of host functions.
#[derive(Debug, Clone, Default)]
pub struct FunctionLibrary {
    functions: BTreeMap<String, NativeFunction>,
}

impl FunctionLibrary {
    /// An empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// The default library shipped with polyrender.
    pub fn standard() -> Self {
        Self::new()
            .with(NativeFunction::new("trim_prefix", trim_prefix))
            .with(NativeFunction::new("trim_suffix", trim_suffix))
            .with(NativeFunction::new("has_prefix", has_prefix))
            .with(NativeFunction::new("has_suffix", has_suffix))
            .with(NativeFunction::new("split", split))
            .with(NativeFunction::new("pad_left", pad_left))
            .with(NativeFunction::new("pad_right", pad_right))
            .with(NativeFunction::new("truncate_width", truncate_width))
            .with(NativeFunction::new("to_json", to_json))
            .with(NativeFunction::new("from_json", from_json))
            .with(NativeFunction::new("to_yaml", to_yaml))
            .with(NativeFunction::new("humanize_bytes", humanize_bytes))
    }

    /// Adds a function, replacing any function with the same name.
    pub fn register(&mut self, function: NativeFunction) {
        self.functions.insert(function.name().to_string(), function);
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, function: NativeFunction) -> Self {
        self.register(function);
        self
    }

    pub fn get(&self, name: &str) -> Option<&NativeFunction> {
        self.functions.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NativeFunction> {
        self.functions.values()
    }
}

// ============================================================================
// Argument helpers
// ============================================================================

fn arity(args: &[Value], expected: usize) -> Result<(), String> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(format!(
            "expected {} argument{}, got {}",
            expected,
            if expected == 1 { "" } else { "s" },
            args.len()
        ))
    }
}

fn str_arg(args: &[Value], index: usize) -> Result<&str, String> {
    match &args[index] {
        Value::String(s) => Ok(s),
        other => Err(format!(
            "argument {} must be a string, got {}",
            index + 1,
            other.type_name()
        )),
    }
}

fn width_arg(args: &[Value], index: usize) -> Result<usize, String> {
    match &args[index] {
        Value::Int(n) if *n >= 0 => Ok(*n as usize),
        other => Err(format!(
            "argument {} must be a non-negative integer, got {}",
            index + 1,
            other
        )),
    }
}

// ============================================================================
// Standard functions
// ============================================================================

fn trim_prefix(args: &[Value]) -> Result<Value, String> {
    arity(args, 2)?;
    let s = str_arg(args, 0)?;
    Ok(Value::from(s.strip_prefix(str_arg(args, 1)?).unwrap_or(s)))
}

fn trim_suffix(args: &[Value]) -> Result<Value, String> {
    arity(args, 2)?;
    let s = str_arg(args, 0)?;
    Ok(Value::from(s.strip_suffix(str_arg(args, 1)?).unwrap_or(s)))
}

fn has_prefix(args: &[Value]) -> Result<Value, String> {
    arity(args, 2)?;
    Ok(Value::Bool(str_arg(args, 0)?.starts_with(str_arg(args, 1)?)))
}

fn has_suffix(args: &[Value]) -> Result<Value, String> {
    arity(args, 2)?;
    Ok(Value::Bool(str_arg(args, 0)?.ends_with(str_arg(args, 1)?)))
}

fn split(args: &[Value]) -> Result<Value, String> {
    arity(args, 2)?;
    let s = str_arg(args, 0)?;
    let sep = str_arg(args, 1)?;
    if sep.is_empty() {
        return Err("separator must not be empty".to_string());
    }
    Ok(Value::List(s.split(sep).map(Value::from).collect()))
}

fn pad_left(args: &[Value]) -> Result<Value, String> {
    arity(args, 2)?;
    let s = args[0].to_string();
    let width = width_arg(args, 1)?;
    let padding = width.saturating_sub(s.width());
    Ok(Value::from(format!("{}{}", " ".repeat(padding), s)))
}

fn pad_right(args: &[Value]) -> Result<Value, String> {
    arity(args, 2)?;
    let s = args[0].to_string();
    let width = width_arg(args, 1)?;
    let padding = width.saturating_sub(s.width());
    Ok(Value::from(format!("{}{}", s, " ".repeat(padding))))
}

fn truncate_width(args: &[Value]) -> Result<Value, String> {
    arity(args, 2)?;
    let s = args[0].to_string();
    let max_width = width_arg(args, 1)?;

    if s.width() <= max_width {
        return Ok(Value::from(s));
    }

    let mut result = String::new();
    let mut current = 0;
    // One column is reserved for the ellipsis.
    let limit = max_width.saturating_sub(1);
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if current + w > limit {
            break;
        }
        result.push(c);
        current += w;
    }
    if max_width > 0 {
        result.push('…');
    }
    Ok(Value::from(result))
}

fn to_json(args: &[Value]) -> Result<Value, String> {
    arity(args, 1)?;
    serde_json::to_string(&args[0])
        .map(Value::from)
        .map_err(|err| err.to_string())
}

fn from_json(args: &[Value]) -> Result<Value, String> {
    arity(args, 1)?;
    serde_json::from_str::<Value>(str_arg(args, 0)?).map_err(|err| err.to_string())
}

fn to_yaml(args: &[Value]) -> Result<Value, String> {
    arity(args, 1)?;
    serde_yaml::to_string(&args[0])
        .map(|yaml| Value::from(yaml.trim_end()))
        .map_err(|err| err.to_string())
}

fn humanize_bytes(args: &[Value]) -> Result<Value, String> {
    const UNITS: [&str; 7] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB"];

    arity(args, 1)?;
    let mut size = args[0]
        .as_f64()
        .ok_or_else(|| format!("argument 1 must be a number, got {}", args[0].type_name()))?;
    if size < 0.0 {
        return Err("size must not be negative".to_string());
    }

    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    // 1023.96 KiB prints as 1024.0 KiB; carry into the next unit.
    if unit > 0 && unit < UNITS.len() - 1 && round_tenth(size) >= 1024.0 {
        size /= 1024.0;
        unit += 1;
    }

    let text = if unit == 0 {
        format!("{} {}", size as u64, UNITS[unit])
    } else {
        let rounded = round_tenth(size);
        if rounded.fract() == 0.0 {
            format!("{} {}", rounded as u64, UNITS[unit])
        } else {
            format!("{:.1} {}", rounded, UNITS[unit])
        }
    };
    Ok(Value::from(text))
}

fn round_tenth(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
