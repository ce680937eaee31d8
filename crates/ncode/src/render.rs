//! Text and JSON rendering of command output.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::codes::CodeInfo;
use crate::config::OutputFormat;
use crate::types::TypeInfo;

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("failed to serialize output")
}

pub fn codes(codes: &[CodeInfo], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(codes),
        OutputFormat::Text => {
            let width = codes
                .iter()
                .map(|c| c.name.map_or(1, str::len))
                .max()
                .unwrap_or(0);
            let mut out = String::new();
            for code in codes {
                let name = code.name.unwrap_or("?");
                let group = match (code.facility, code.refines) {
                    (Some(facility), Some(general)) => format!("{facility}/{general}"),
                    (Some(facility), None) => facility.to_string(),
                    (None, _) if code.succeeded => "success".to_string(),
                    (None, _) => "-".to_string(),
                };
                writeln!(
                    out,
                    "{:>6}  {name:<width$}  {group:<18}  {}",
                    code.value, code.description
                )?;
            }
            Ok(out)
        }
    }
}

pub fn types(types: &[TypeInfo], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(types),
        OutputFormat::Text => {
            let mut out = String::new();
            for info in types {
                out.push_str(&type_line(info));
                out.push('\n');
            }
            Ok(out)
        }
    }
}

pub fn single_type(info: &TypeInfo, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(info),
        OutputFormat::Text => {
            let mut out = String::new();
            writeln!(out, "name:      {}", info.name)?;
            writeln!(out, "kind:      {}", kind_name(info))?;
            if let (Some(size), Some(align)) = (info.size, info.align) {
                writeln!(out, "size:      {size}")?;
                writeln!(out, "align:     {align}")?;
            }
            if !info.ancestors.is_empty() {
                writeln!(out, "ancestors: {}", info.ancestors.join(" -> "))?;
            }
            Ok(out)
        }
    }
}

fn kind_name(info: &TypeInfo) -> &'static str {
    match info.kind {
        ncore::TypeKind::Object => "object",
        ncore::TypeKind::Primitive => "primitive",
    }
}

fn type_line(info: &TypeInfo) -> String {
    match info.size {
        Some(size) => format!("{:<12} primitive, {size} bytes", info.name),
        None if info.ancestors.is_empty() => format!("{:<12} object (root)", info.name),
        None => format!("{:<12} object : {}", info.name, info.ancestors.join(" : ")),
    }
}
