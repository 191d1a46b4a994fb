//! The language feature registry interface
//!
//! One method per [`CapabilityKind`](crate::CapabilityKind). The plugin host
//! calls these as plugins register providers; implementations wire the provider
//! into language-service dispatch. [`FeatureRegistrationTracker`](crate::FeatureRegistrationTracker)
//! implements the same trait so it can sit in front of a real registry.

use crate::capability::{Handle, PluginInfo, SignatureHelpMetadata};
use crate::error::RegistrationResult;
use lsp_types::{CodeActionKind, DocumentFilter};

/// Registration entry points of a language feature registry
pub trait LanguageFeatureRegistry: Send + Sync {
    fn register_completion_support(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
        trigger_characters: &[String],
        supports_resolve_details: bool,
    ) -> RegistrationResult<()>;

    fn register_definition_provider(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
    ) -> RegistrationResult<()>;

    fn register_declaration_provider(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
    ) -> RegistrationResult<()>;

    fn register_reference_provider(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
    ) -> RegistrationResult<()>;

    fn register_signature_help_provider(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
        metadata: &SignatureHelpMetadata,
    ) -> RegistrationResult<()>;

    fn register_implementation_provider(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
    ) -> RegistrationResult<()>;

    fn register_type_definition_provider(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
    ) -> RegistrationResult<()>;

    fn register_hover_provider(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
    ) -> RegistrationResult<()>;

    fn register_document_highlight_provider(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
    ) -> RegistrationResult<()>;

    /// Workspace symbols are not scoped to documents, so there is no selector.
    fn register_workspace_symbol_provider(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
    ) -> RegistrationResult<()>;

    fn register_document_link_provider(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
    ) -> RegistrationResult<()>;

    /// `event_handle` is set when the provider emits change events.
    fn register_code_lens_support(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
        event_handle: Option<Handle>,
    ) -> RegistrationResult<()>;

    fn register_outline_support(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
    ) -> RegistrationResult<()>;

    fn register_document_formatting_support(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
    ) -> RegistrationResult<()>;

    fn register_range_formatting_provider(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
    ) -> RegistrationResult<()>;

    fn register_on_type_formatting_provider(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
        auto_format_trigger_characters: &[String],
    ) -> RegistrationResult<()>;

    fn register_folding_range_provider(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
        event_handle: Option<Handle>,
    ) -> RegistrationResult<()>;

    fn register_document_color_provider(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
    ) -> RegistrationResult<()>;

    /// `code_action_kinds` is `None` when the provider did not declare its kinds.
    fn register_quick_fix_provider(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
        code_action_kinds: Option<Vec<CodeActionKind>>,
    ) -> RegistrationResult<()>;

    fn register_rename_provider(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
        supports_resolve_location: bool,
    ) -> RegistrationResult<()>;
}
