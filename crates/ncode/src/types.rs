//! Declared type listing.

use anyhow::{Result, anyhow};
use ncore::{HNType, TypeKind};
use serde::Serialize;

/// Descriptor of one declared type, as shown by `types` and `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeInfo {
    pub name: &'static str,
    pub kind: TypeKind,
    /// Native size in bytes; primitives only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<usize>,
    /// Base types from the direct base up to the root; objects only.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ancestors: Vec<&'static str>,
}

impl TypeInfo {
    /// `None` for a null token.
    pub fn from_token(token: HNType) -> Option<Self> {
        let descriptor = token.descriptor()?;
        let primitive = descriptor.kind() == TypeKind::Primitive;
        Some(Self {
            name: descriptor.name(),
            kind: descriptor.kind(),
            size: primitive.then_some(descriptor.size()),
            align: primitive.then_some(descriptor.align()),
            ancestors: token.ancestors().skip(1).filter_map(|t| t.name()).collect(),
        })
    }
}

/// Kind selector for `types`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindFilter {
    #[default]
    All,
    Objects,
    Primitives,
}

impl KindFilter {
    fn accepts(self, kind: TypeKind) -> bool {
        match self {
            KindFilter::All => true,
            KindFilter::Objects => kind == TypeKind::Object,
            KindFilter::Primitives => kind == TypeKind::Primitive,
        }
    }
}

/// Every built-in type matching `filter`, in declaration order.
pub fn list(filter: KindFilter) -> Vec<TypeInfo> {
    ncore::types::builtin()
        .filter_map(TypeInfo::from_token)
        .filter(|info| filter.accepts(info.kind))
        .collect()
}

/// One built-in type by exact name.
pub fn describe(name: &str) -> Result<TypeInfo> {
    ncore::types::find(name)
        .and_then(TypeInfo::from_token)
        .ok_or_else(|| anyhow!("unknown type '{name}'"))
}
