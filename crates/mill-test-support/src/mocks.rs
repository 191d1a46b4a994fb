//! Mock implementations for testing

use lsp_types::{CodeActionKind, DocumentFilter};
use mill_plugin_metrics::{
    Handle, LanguageFeatureRegistry, PluginInfo, RegistrationResult, SignatureHelpMetadata,
};
use mockall::mock;

mock! {
    pub Registry {}

    impl LanguageFeatureRegistry for Registry {
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
}

/// Create a mock language feature registry for testing
pub fn mock_registry() -> MockRegistry {
    MockRegistry::new()
}
