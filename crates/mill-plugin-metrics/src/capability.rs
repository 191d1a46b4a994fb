//! Plugin identity and language-feature capability types
//!
//! These are the keys of the registration inventory: which plugin registered
//! which kind of language feature, and under which registry handle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Registry-assigned identifier for a single provider registration.
///
/// Opaque to the tracker; stored verbatim.
pub type Handle = u64;

/// Identifier of the plugin (extension) that owns a registration
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginId(String);

impl PluginId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PluginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PluginId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PluginId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::borrow::Borrow<str> for PluginId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Descriptor sent by the plugin host alongside every registration call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginInfo {
    /// Unique plugin identifier (e.g. "acme.lang")
    pub id: PluginId,
    /// Human-readable plugin name
    pub name: String,
}

impl PluginInfo {
    pub fn new(id: impl Into<PluginId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Language-feature categories a plugin can register providers for.
///
/// This set is closed: nothing outside these variants is ever recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CapabilityKind {
    Completion,
    Definition,
    Declaration,
    Reference,
    SignatureHelp,
    Implementation,
    TypeDefinition,
    Hover,
    DocumentHighlight,
    WorkspaceSymbol,
    DocumentLink,
    CodeLens,
    Outline,
    DocumentFormatting,
    RangeFormatting,
    OnTypeFormatting,
    FoldingRange,
    DocumentColor,
    QuickFix,
    Rename,
}

impl CapabilityKind {
    /// Every capability kind, in declaration order
    pub const ALL: [CapabilityKind; 20] = [
        CapabilityKind::Completion,
        CapabilityKind::Definition,
        CapabilityKind::Declaration,
        CapabilityKind::Reference,
        CapabilityKind::SignatureHelp,
        CapabilityKind::Implementation,
        CapabilityKind::TypeDefinition,
        CapabilityKind::Hover,
        CapabilityKind::DocumentHighlight,
        CapabilityKind::WorkspaceSymbol,
        CapabilityKind::DocumentLink,
        CapabilityKind::CodeLens,
        CapabilityKind::Outline,
        CapabilityKind::DocumentFormatting,
        CapabilityKind::RangeFormatting,
        CapabilityKind::OnTypeFormatting,
        CapabilityKind::FoldingRange,
        CapabilityKind::DocumentColor,
        CapabilityKind::QuickFix,
        CapabilityKind::Rename,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CapabilityKind::Completion => "Completion",
            CapabilityKind::Definition => "Definition",
            CapabilityKind::Declaration => "Declaration",
            CapabilityKind::Reference => "Reference",
            CapabilityKind::SignatureHelp => "SignatureHelp",
            CapabilityKind::Implementation => "Implementation",
            CapabilityKind::TypeDefinition => "TypeDefinition",
            CapabilityKind::Hover => "Hover",
            CapabilityKind::DocumentHighlight => "DocumentHighlight",
            CapabilityKind::WorkspaceSymbol => "WorkspaceSymbol",
            CapabilityKind::DocumentLink => "DocumentLink",
            CapabilityKind::CodeLens => "CodeLens",
            CapabilityKind::Outline => "Outline",
            CapabilityKind::DocumentFormatting => "DocumentFormatting",
            CapabilityKind::RangeFormatting => "RangeFormatting",
            CapabilityKind::OnTypeFormatting => "OnTypeFormatting",
            CapabilityKind::FoldingRange => "FoldingRange",
            CapabilityKind::DocumentColor => "DocumentColor",
            CapabilityKind::QuickFix => "QuickFix",
            CapabilityKind::Rename => "Rename",
        }
    }
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trigger metadata supplied with a signature help registration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureHelpMetadata {
    /// Characters that open signature help
    pub trigger_characters: Vec<String>,
    /// Characters that re-trigger signature help while it is already showing
    pub retrigger_characters: Vec<String>,
}
