//! Test helper functions and a recording registry fake

use lsp_types::{CodeActionKind, DocumentFilter};
use mill_plugin_metrics::{
    CapabilityKind, Handle, LanguageFeatureRegistry, PluginInfo, RegistrationError,
    RegistrationResult, SignatureHelpMetadata,
};
use std::collections::HashMap;
use std::sync::Mutex;

/// Create plugin info with a derived display name
pub fn plugin(id: &str) -> PluginInfo {
    PluginInfo::new(id, format!("{} (test)", id))
}

/// Selector matching Rust files on disk
pub fn rust_selector() -> Vec<DocumentFilter> {
    vec![
        DocumentFilter {
            language: Some("rust".to_string()),
            scheme: Some("file".to_string()),
            pattern: None,
        },
        DocumentFilter {
            language: None,
            scheme: None,
            pattern: Some("**/*.rs".to_string()),
        },
    ]
}

/// Kind-specific arguments of a forwarded registration
#[derive(Debug, Clone, PartialEq)]
pub enum ForwardedArgs {
    /// Selector only
    Plain,
    Completion {
        trigger_characters: Vec<String>,
        supports_resolve_details: bool,
    },
    SignatureHelp(SignatureHelpMetadata),
    EventHandle(Option<Handle>),
    OnTypeFormatting(Vec<String>),
    QuickFix(Option<Vec<CodeActionKind>>),
    Rename {
        supports_resolve_location: bool,
    },
}

/// One registration call as received by [`RecordingRegistry`]
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardedCall {
    pub kind: CapabilityKind,
    pub handle: Handle,
    pub plugin: PluginInfo,
    /// `None` for workspace symbol registrations, which carry no selector
    pub selector: Option<Vec<DocumentFilter>>,
    pub args: ForwardedArgs,
}

/// Registry fake that records every call it receives and can be scripted to fail
#[derive(Debug, Default)]
pub struct RecordingRegistry {
    calls: Mutex<Vec<ForwardedCall>>,
    failures: Mutex<HashMap<Handle, RegistrationError>>,
}

impl RecordingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every registration using `handle` fail with `error`
    pub fn fail_with(&self, handle: Handle, error: RegistrationError) {
        self.failures.lock().unwrap().insert(handle, error);
    }

    /// Calls received so far, in order
    pub fn calls(&self) -> Vec<ForwardedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn receive(
        &self,
        kind: CapabilityKind,
        handle: Handle,
        plugin: &PluginInfo,
        selector: Option<&[DocumentFilter]>,
        args: ForwardedArgs,
    ) -> RegistrationResult<()> {
        self.calls.lock().unwrap().push(ForwardedCall {
            kind,
            handle,
            plugin: plugin.clone(),
            selector: selector.map(<[DocumentFilter]>::to_vec),
            args,
        });

        match self.failures.lock().unwrap().get(&handle) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

impl LanguageFeatureRegistry for RecordingRegistry {
    fn register_completion_support(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
        trigger_characters: &[String],
        supports_resolve_details: bool,
    ) -> RegistrationResult<()> {
        self.receive(
            CapabilityKind::Completion,
            handle,
            plugin,
            Some(selector),
            ForwardedArgs::Completion {
                trigger_characters: trigger_characters.to_vec(),
                supports_resolve_details,
            },
        )
    }

    fn register_definition_provider(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
    ) -> RegistrationResult<()> {
        self.receive(CapabilityKind::Definition, handle, plugin, Some(selector), ForwardedArgs::Plain)
    }

    fn register_declaration_provider(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
    ) -> RegistrationResult<()> {
        self.receive(CapabilityKind::Declaration, handle, plugin, Some(selector), ForwardedArgs::Plain)
    }

    fn register_reference_provider(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
    ) -> RegistrationResult<()> {
        self.receive(CapabilityKind::Reference, handle, plugin, Some(selector), ForwardedArgs::Plain)
    }

    fn register_signature_help_provider(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
        metadata: &SignatureHelpMetadata,
    ) -> RegistrationResult<()> {
        self.receive(
            CapabilityKind::SignatureHelp,
            handle,
            plugin,
            Some(selector),
            ForwardedArgs::SignatureHelp(metadata.clone()),
        )
    }

    fn register_implementation_provider(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
    ) -> RegistrationResult<()> {
        self.receive(CapabilityKind::Implementation, handle, plugin, Some(selector), ForwardedArgs::Plain)
    }

    fn register_type_definition_provider(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
    ) -> RegistrationResult<()> {
        self.receive(CapabilityKind::TypeDefinition, handle, plugin, Some(selector), ForwardedArgs::Plain)
    }

    fn register_hover_provider(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
    ) -> RegistrationResult<()> {
        self.receive(CapabilityKind::Hover, handle, plugin, Some(selector), ForwardedArgs::Plain)
    }

    fn register_document_highlight_provider(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
    ) -> RegistrationResult<()> {
        self.receive(CapabilityKind::DocumentHighlight, handle, plugin, Some(selector), ForwardedArgs::Plain)
    }

    fn register_workspace_symbol_provider(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
    ) -> RegistrationResult<()> {
        self.receive(CapabilityKind::WorkspaceSymbol, handle, plugin, None, ForwardedArgs::Plain)
    }

    fn register_document_link_provider(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
    ) -> RegistrationResult<()> {
        self.receive(CapabilityKind::DocumentLink, handle, plugin, Some(selector), ForwardedArgs::Plain)
    }

    fn register_code_lens_support(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
        event_handle: Option<Handle>,
    ) -> RegistrationResult<()> {
        self.receive(
            CapabilityKind::CodeLens,
            handle,
            plugin,
            Some(selector),
            ForwardedArgs::EventHandle(event_handle),
        )
    }

    fn register_outline_support(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
    ) -> RegistrationResult<()> {
        self.receive(CapabilityKind::Outline, handle, plugin, Some(selector), ForwardedArgs::Plain)
    }

    fn register_document_formatting_support(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
    ) -> RegistrationResult<()> {
        self.receive(CapabilityKind::DocumentFormatting, handle, plugin, Some(selector), ForwardedArgs::Plain)
    }

    fn register_range_formatting_provider(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
    ) -> RegistrationResult<()> {
        self.receive(CapabilityKind::RangeFormatting, handle, plugin, Some(selector), ForwardedArgs::Plain)
    }

    fn register_on_type_formatting_provider(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
        auto_format_trigger_characters: &[String],
    ) -> RegistrationResult<()> {
        self.receive(
            CapabilityKind::OnTypeFormatting,
            handle,
            plugin,
            Some(selector),
            ForwardedArgs::OnTypeFormatting(auto_format_trigger_characters.to_vec()),
        )
    }

    fn register_folding_range_provider(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
        event_handle: Option<Handle>,
    ) -> RegistrationResult<()> {
        self.receive(
            CapabilityKind::FoldingRange,
            handle,
            plugin,
            Some(selector),
            ForwardedArgs::EventHandle(event_handle),
        )
    }

    fn register_document_color_provider(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
    ) -> RegistrationResult<()> {
        self.receive(CapabilityKind::DocumentColor, handle, plugin, Some(selector), ForwardedArgs::Plain)
    }

    fn register_quick_fix_provider(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
        code_action_kinds: Option<Vec<CodeActionKind>>,
    ) -> RegistrationResult<()> {
        self.receive(
            CapabilityKind::QuickFix,
            handle,
            plugin,
            Some(selector),
            ForwardedArgs::QuickFix(code_action_kinds),
        )
    }

    fn register_rename_provider(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
        supports_resolve_location: bool,
    ) -> RegistrationResult<()> {
        self.receive(
            CapabilityKind::Rename,
            handle,
            plugin,
            Some(selector),
            ForwardedArgs::Rename {
                supports_resolve_location,
            },
        )
    }
}

/// Canned kind-specific arguments used by [`invoke_registration`]
fn canned_args(kind: CapabilityKind) -> ForwardedArgs {
    match kind {
        CapabilityKind::Completion => ForwardedArgs::Completion {
            trigger_characters: vec![".".to_string(), "::".to_string()],
            supports_resolve_details: true,
        },
        CapabilityKind::SignatureHelp => ForwardedArgs::SignatureHelp(SignatureHelpMetadata {
            trigger_characters: vec!["(".to_string(), ",".to_string()],
            retrigger_characters: vec![")".to_string()],
        }),
        CapabilityKind::CodeLens => ForwardedArgs::EventHandle(Some(900)),
        CapabilityKind::FoldingRange => ForwardedArgs::EventHandle(None),
        CapabilityKind::OnTypeFormatting => {
            ForwardedArgs::OnTypeFormatting(vec!["}".to_string(), ";".to_string()])
        }
        CapabilityKind::QuickFix => ForwardedArgs::QuickFix(Some(vec![
            CodeActionKind::QUICKFIX,
            CodeActionKind::REFACTOR_EXTRACT,
        ])),
        CapabilityKind::Rename => ForwardedArgs::Rename {
            supports_resolve_location: true,
        },
        _ => ForwardedArgs::Plain,
    }
}

/// The call a registry should receive when [`invoke_registration`] is used
pub fn expected_call(kind: CapabilityKind, handle: Handle, plugin: &PluginInfo) -> ForwardedCall {
    let selector = match kind {
        CapabilityKind::WorkspaceSymbol => None,
        _ => Some(rust_selector()),
    };

    ForwardedCall {
        kind,
        handle,
        plugin: plugin.clone(),
        selector,
        args: canned_args(kind),
    }
}

/// Call the registration entry point for `kind` with canned arguments
pub fn invoke_registration<R: LanguageFeatureRegistry + ?Sized>(
    registry: &R,
    kind: CapabilityKind,
    handle: Handle,
    plugin: &PluginInfo,
) -> RegistrationResult<()> {
    let selector = rust_selector();

    match (kind, canned_args(kind)) {
        (
            CapabilityKind::Completion,
            ForwardedArgs::Completion {
                trigger_characters,
                supports_resolve_details,
            },
        ) => registry.register_completion_support(
            handle,
            plugin,
            &selector,
            &trigger_characters,
            supports_resolve_details,
        ),
        (CapabilityKind::Definition, _) => {
            registry.register_definition_provider(handle, plugin, &selector)
        }
        (CapabilityKind::Declaration, _) => {
            registry.register_declaration_provider(handle, plugin, &selector)
        }
        (CapabilityKind::Reference, _) => {
            registry.register_reference_provider(handle, plugin, &selector)
        }
        (CapabilityKind::SignatureHelp, ForwardedArgs::SignatureHelp(metadata)) => {
            registry.register_signature_help_provider(handle, plugin, &selector, &metadata)
        }
        (CapabilityKind::Implementation, _) => {
            registry.register_implementation_provider(handle, plugin, &selector)
        }
        (CapabilityKind::TypeDefinition, _) => {
            registry.register_type_definition_provider(handle, plugin, &selector)
        }
        (CapabilityKind::Hover, _) => registry.register_hover_provider(handle, plugin, &selector),
        (CapabilityKind::DocumentHighlight, _) => {
            registry.register_document_highlight_provider(handle, plugin, &selector)
        }
        (CapabilityKind::WorkspaceSymbol, _) => {
            registry.register_workspace_symbol_provider(handle, plugin)
        }
        (CapabilityKind::DocumentLink, _) => {
            registry.register_document_link_provider(handle, plugin, &selector)
        }
        (CapabilityKind::CodeLens, ForwardedArgs::EventHandle(event_handle)) => {
            registry.register_code_lens_support(handle, plugin, &selector, event_handle)
        }
        (CapabilityKind::Outline, _) => registry.register_outline_support(handle, plugin, &selector),
        (CapabilityKind::DocumentFormatting, _) => {
            registry.register_document_formatting_support(handle, plugin, &selector)
        }
        (CapabilityKind::RangeFormatting, _) => {
            registry.register_range_formatting_provider(handle, plugin, &selector)
        }
        (CapabilityKind::OnTypeFormatting, ForwardedArgs::OnTypeFormatting(characters)) => {
            registry.register_on_type_formatting_provider(handle, plugin, &selector, &characters)
        }
        (CapabilityKind::FoldingRange, ForwardedArgs::EventHandle(event_handle)) => {
            registry.register_folding_range_provider(handle, plugin, &selector, event_handle)
        }
        (CapabilityKind::DocumentColor, _) => {
            registry.register_document_color_provider(handle, plugin, &selector)
        }
        (CapabilityKind::QuickFix, ForwardedArgs::QuickFix(kinds)) => {
            registry.register_quick_fix_provider(handle, plugin, &selector, kinds)
        }
        (
            CapabilityKind::Rename,
            ForwardedArgs::Rename {
                supports_resolve_location,
            },
        ) => registry.register_rename_provider(handle, plugin, &selector, supports_resolve_location),
        (kind, args) => unreachable!("canned arguments {:?} do not fit {}", args, kind),
    }
}
