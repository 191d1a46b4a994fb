//! Registration tracker that records every capability registration before
//! handing it to the wrapped registry

use crate::capability::{CapabilityKind, Handle, PluginId, PluginInfo, SignatureHelpMetadata};
use crate::error::RegistrationResult;
use crate::inventory::{FeatureInventory, Inventory};
use crate::registry::LanguageFeatureRegistry;
use lsp_types::{CodeActionKind, DocumentFilter};
use std::sync::Arc;

/// Decorator over a [`LanguageFeatureRegistry`] that keeps an inventory of
/// which plugin registered which capability under which handle.
///
/// Every registration is recorded first and then forwarded with the same
/// arguments. Whatever the wrapped registry returns, including errors, is
/// returned as-is. A record made before a failed delegation is kept.
pub struct FeatureRegistrationTracker<R: LanguageFeatureRegistry + ?Sized> {
    inner: Arc<R>,
    inventory: FeatureInventory,
}

impl<R: LanguageFeatureRegistry> FeatureRegistrationTracker<R> {
    /// Wrap an owned registry
    pub fn new(inner: R) -> Self {
        Self::from_shared(Arc::new(inner))
    }
}

impl<R: LanguageFeatureRegistry + ?Sized> FeatureRegistrationTracker<R> {
    /// Wrap a registry that is shared with other owners
    pub fn from_shared(inner: Arc<R>) -> Self {
        Self {
            inner,
            inventory: FeatureInventory::new(),
        }
    }

    /// Record a registration without forwarding it anywhere
    pub fn record(&self, plugin_id: PluginId, kind: CapabilityKind, handle: Handle) {
        self.inventory.record(plugin_id, kind, handle);
    }

    /// Current inventory contents
    pub fn snapshot(&self) -> Inventory {
        self.inventory.snapshot()
    }

    /// Shared handle to the live inventory, for reporters
    pub fn inventory(&self) -> &FeatureInventory {
        &self.inventory
    }

    /// The wrapped registry
    pub fn inner(&self) -> &Arc<R> {
        &self.inner
    }

    pub fn into_inner(self) -> Arc<R> {
        self.inner
    }

    fn track(&self, plugin: &PluginInfo, kind: CapabilityKind, handle: Handle) {
        self.record(plugin.id.clone(), kind, handle);
    }
}

impl<R: LanguageFeatureRegistry + ?Sized> LanguageFeatureRegistry for FeatureRegistrationTracker<R> {
    fn register_completion_support(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
        trigger_characters: &[String],
        supports_resolve_details: bool,
    ) -> RegistrationResult<()> {
        self.track(plugin, CapabilityKind::Completion, handle);
        self.inner.register_completion_support(
            handle,
            plugin,
            selector,
            trigger_characters,
            supports_resolve_details,
        )
    }

    fn register_definition_provider(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
    ) -> RegistrationResult<()> {
        self.track(plugin, CapabilityKind::Definition, handle);
        self.inner.register_definition_provider(handle, plugin, selector)
    }

    fn register_declaration_provider(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
    ) -> RegistrationResult<()> {
        self.track(plugin, CapabilityKind::Declaration, handle);
        self.inner.register_declaration_provider(handle, plugin, selector)
    }

    fn register_reference_provider(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
    ) -> RegistrationResult<()> {
        self.track(plugin, CapabilityKind::Reference, handle);
        self.inner.register_reference_provider(handle, plugin, selector)
    }

    fn register_signature_help_provider(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
        metadata: &SignatureHelpMetadata,
    ) -> RegistrationResult<()> {
        self.track(plugin, CapabilityKind::SignatureHelp, handle);
        self.inner
            .register_signature_help_provider(handle, plugin, selector, metadata)
    }

    fn register_implementation_provider(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
    ) -> RegistrationResult<()> {
        self.track(plugin, CapabilityKind::Implementation, handle);
        self.inner
            .register_implementation_provider(handle, plugin, selector)
    }

    fn register_type_definition_provider(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
    ) -> RegistrationResult<()> {
        self.track(plugin, CapabilityKind::TypeDefinition, handle);
        self.inner
            .register_type_definition_provider(handle, plugin, selector)
    }

    fn register_hover_provider(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
    ) -> RegistrationResult<()> {
        self.track(plugin, CapabilityKind::Hover, handle);
        self.inner.register_hover_provider(handle, plugin, selector)
    }

    fn register_document_highlight_provider(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
    ) -> RegistrationResult<()> {
        self.track(plugin, CapabilityKind::DocumentHighlight, handle);
        self.inner
            .register_document_highlight_provider(handle, plugin, selector)
    }

    fn register_workspace_symbol_provider(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
    ) -> RegistrationResult<()> {
        self.track(plugin, CapabilityKind::WorkspaceSymbol, handle);
        self.inner.register_workspace_symbol_provider(handle, plugin)
    }

    fn register_document_link_provider(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
    ) -> RegistrationResult<()> {
        self.track(plugin, CapabilityKind::DocumentLink, handle);
        self.inner
            .register_document_link_provider(handle, plugin, selector)
    }

    fn register_code_lens_support(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
        event_handle: Option<Handle>,
    ) -> RegistrationResult<()> {
        self.track(plugin, CapabilityKind::CodeLens, handle);
        self.inner
            .register_code_lens_support(handle, plugin, selector, event_handle)
    }

    fn register_outline_support(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
    ) -> RegistrationResult<()> {
        self.track(plugin, CapabilityKind::Outline, handle);
        self.inner.register_outline_support(handle, plugin, selector)
    }

    fn register_document_formatting_support(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
    ) -> RegistrationResult<()> {
        self.track(plugin, CapabilityKind::DocumentFormatting, handle);
        self.inner
            .register_document_formatting_support(handle, plugin, selector)
    }

    fn register_range_formatting_provider(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
    ) -> RegistrationResult<()> {
        self.track(plugin, CapabilityKind::RangeFormatting, handle);
        self.inner
            .register_range_formatting_provider(handle, plugin, selector)
    }

    fn register_on_type_formatting_provider(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
        auto_format_trigger_characters: &[String],
    ) -> RegistrationResult<()> {
        self.track(plugin, CapabilityKind::OnTypeFormatting, handle);
        self.inner.register_on_type_formatting_provider(
            handle,
            plugin,
            selector,
            auto_format_trigger_characters,
        )
    }

    fn register_folding_range_provider(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
        event_handle: Option<Handle>,
    ) -> RegistrationResult<()> {
        self.track(plugin, CapabilityKind::FoldingRange, handle);
        self.inner
            .register_folding_range_provider(handle, plugin, selector, event_handle)
    }

    fn register_document_color_provider(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
    ) -> RegistrationResult<()> {
        self.track(plugin, CapabilityKind::DocumentColor, handle);
        self.inner
            .register_document_color_provider(handle, plugin, selector)
    }

    fn register_quick_fix_provider(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
        code_action_kinds: Option<Vec<CodeActionKind>>,
    ) -> RegistrationResult<()> {
        self.track(plugin, CapabilityKind::QuickFix, handle);
        self.inner
            .register_quick_fix_provider(handle, plugin, selector, code_action_kinds)
    }

    fn register_rename_provider(
        &self,
        handle: Handle,
        plugin: &PluginInfo,
        selector: &[DocumentFilter],
        supports_resolve_location: bool,
    ) -> RegistrationResult<()> {
        self.track(plugin, CapabilityKind::Rename, handle);
        self.inner
            .register_rename_provider(handle, plugin, selector, supports_resolve_location)
    }
}
