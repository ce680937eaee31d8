//! Result-code lookup and listing.

use anyhow::{Result, bail};
use clap::ValueEnum;
use ncore::{CodeKind, Facility, NResult, ResultCode, succeeded};
use serde::Serialize;

/// Everything known about one raw result value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeInfo {
    pub value: NResult,
    /// Symbolic name; `None` for a value this build does not know.
    pub name: Option<&'static str>,
    pub kind: Option<CodeKind>,
    pub facility: Option<Facility>,
    pub refines: Option<&'static str>,
    pub succeeded: bool,
    pub description: String,
}

impl CodeInfo {
    pub fn lookup(value: NResult) -> Self {
        match ResultCode::from_raw(value) {
            Some(code) => Self::from_code(code),
            None => Self {
                value,
                name: None,
                kind: None,
                facility: None,
                refines: None,
                succeeded: succeeded(value),
                description: if succeeded(value) {
                    "success with information".to_string()
                } else {
                    "unrecognized failure".to_string()
                },
            },
        }
    }

    pub fn from_code(code: ResultCode) -> Self {
        Self {
            value: code.raw(),
            name: Some(code.name()),
            kind: Some(code.kind()),
            facility: code.facility(),
            refines: code.refines().map(ResultCode::name),
            succeeded: code.succeeded(),
            description: code.description().to_string(),
        }
    }
}

/// Parse a code argument: a decimal value such as `-11`, or a symbolic
/// name such as `ARGUMENT_NULL` (case-insensitive).
pub fn parse_code(arg: &str) -> Result<NResult> {
    let arg = arg.trim();
    if let Ok(value) = arg.parse::<NResult>() {
        return Ok(value);
    }
    match ResultCode::ALL
        .iter()
        .find(|code| code.name().eq_ignore_ascii_case(arg))
    {
        Some(code) => Ok(code.raw()),
        None => bail!("'{arg}' is neither an integer nor a known result code name"),
    }
}

/// Facility selector for `list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FacilityFilter {
    Core,
    External,
    /// Codes outside both facilities.
    None,
}

impl FacilityFilter {
    fn accepts(self, code: ResultCode) -> bool {
        match self {
            FacilityFilter::Core => code.facility() == Some(Facility::Core),
            FacilityFilter::External => code.facility() == Some(Facility::External),
            FacilityFilter::None => code.facility().is_none(),
        }
    }
}

/// The code table, optionally narrowed to one facility and to leaves.
pub fn list(facility: Option<FacilityFilter>, leaves_only: bool) -> Vec<CodeInfo> {
    ResultCode::ALL
        .iter()
        .copied()
        .filter(|code| facility.is_none_or(|filter| filter.accepts(*code)))
        .filter(|code| !leaves_only || code.kind() == CodeKind::Leaf)
        .map(CodeInfo::from_code)
        .collect()
}
