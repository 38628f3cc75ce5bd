//! UI preference section consumed by the frontend.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// UI preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct UiConfig {
    /// Chat interface behavior.
    pub interface: InterfaceConfig,
    /// Enterprise panels.
    pub enterprise: EnterpriseUiConfig,
    /// Branding and layout.
    pub customization: CustomizationConfig,
}

impl UiConfig {
    /// Whether the section was absent from its document.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Chat interface behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct InterfaceConfig {
    /// Theme name.
    pub theme: String,
    /// UI language tag.
    pub language: String,
    /// Message input box.
    pub input_box: InputBoxConfig,
    /// Conversation card.
    pub conversation_card: ConversationCardConfig,
    /// Live feedback toggles.
    pub real_time: RealTimeConfig,
    /// Accessibility toggles.
    pub accessibility: AccessibilityConfig,
}

/// Message input box.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
#[allow(missing_docs)]
pub struct InputBoxConfig {
    pub auto_resize: bool,
    pub min_height: String,
    pub max_height: String,
    pub resize_direction: String,
    /// Action name to key chord, in document order.
    pub shortcuts: IndexMap<String, String>,
    pub placeholder: PlaceholderConfig,
    pub button_colors: ButtonColorsConfig,
    pub browser_specific: BrowserSpecificConfig,
}

/// Placeholder text per input state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
#[allow(missing_docs)]
pub struct PlaceholderConfig {
    pub enabled: String,
    pub disabled: String,
}

/// Send button colors per input state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
#[allow(missing_docs)]
pub struct ButtonColorsConfig {
    pub enabled: String,
    pub disabled: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
#[allow(missing_docs)]
pub struct BrowserSpecificConfig {
    pub safari_adaptations: bool,
    pub firefox_adaptations: bool,
    pub mobile_adaptations: bool,
}

/// Conversation card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
#[allow(missing_docs)]
pub struct ConversationCardConfig {
    pub window_size: WindowSizeConfig,
    pub scroll: ScrollConfig,
    pub messages: MessagesConfig,
    pub export: ExportConfig,
    pub toolbar: ToolbarConfig,
}

/// Card size bounds in pixels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
#[allow(missing_docs)]
pub struct WindowSizeConfig {
    pub min_width: u32,
    pub max_width: u32,
    pub min_height: u32,
    pub max_height: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
#[allow(missing_docs)]
pub struct ScrollConfig {
    pub auto_scroll: bool,
    pub scroll_margin: u32,
    pub smooth_scroll: bool,
    /// Freeze scrolling while a response streams in.
    pub lock_when_answer: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
#[allow(missing_docs)]
pub struct MessagesConfig {
    pub show_timestamps: bool,
    pub show_model_name: bool,
    pub markdown_rendering: bool,
    pub code_highlighting: bool,
}

/// Conversation export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
#[allow(missing_docs)]
pub struct ExportConfig {
    /// Offered formats (e.g., "markdown", "json", "pdf").
    pub formats: Vec<String>,
    pub include_metadata: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
#[allow(missing_docs)]
pub struct ToolbarConfig {
    pub show_model_selector: bool,
    pub show_export_button: bool,
    pub show_clear_button: bool,
    pub show_float_button: bool,
    pub show_archive_button: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
#[allow(missing_docs)]
pub struct RealTimeConfig {
    pub typing_indicators: bool,
    pub streaming_responses: bool,
    pub live_word_count: bool,
    pub response_time_display: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
#[allow(missing_docs)]
pub struct AccessibilityConfig {
    pub high_contrast: bool,
    pub large_text: bool,
    pub keyboard_navigation: bool,
    pub screen_reader_support: bool,
}

/// Enterprise panels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
#[allow(missing_docs)]
pub struct EnterpriseUiConfig {
    pub user_management: UserManagementConfig,
    pub admin_dashboard: AdminDashboardConfig,
    pub stealth_ui: StealthUiConfig,
    pub audit: AuditDisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
#[allow(missing_docs)]
pub struct UserManagementConfig {
    pub show_user_avatar: bool,
    pub show_user_role: bool,
    pub show_usage_stats: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
#[allow(missing_docs)]
pub struct AdminDashboardConfig {
    pub enabled: bool,
    pub real_time_metrics: bool,
    pub user_activity_monitor: bool,
    pub cost_tracking: bool,
}

/// Stealth status indicator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
#[allow(missing_docs)]
pub struct StealthUiConfig {
    pub show_stealth_status: bool,
    /// Screen corner (e.g., "top-right").
    pub stealth_indicator_position: String,
    pub detection_alerts: bool,
}

/// Audit identifiers shown in the UI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
#[allow(missing_docs)]
pub struct AuditDisplayConfig {
    pub show_conversation_id: bool,
    pub show_request_trace: bool,
    pub export_audit_logs: bool,
}

/// Branding and layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
#[allow(missing_docs)]
pub struct CustomizationConfig {
    pub branding: BrandingConfig,
    pub layout: LayoutConfig,
    pub advanced: AdvancedConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
#[allow(missing_docs)]
pub struct BrandingConfig {
    pub logo_url: String,
    pub company_name: String,
    pub primary_color: String,
    pub secondary_color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
#[allow(missing_docs)]
pub struct LayoutConfig {
    pub sidebar_position: String,
    pub header_style: String,
    pub footer_enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
#[allow(missing_docs)]
pub struct AdvancedConfig {
    pub developer_mode: bool,
    pub debug_panel: bool,
    pub performance_metrics: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        assert!(UiConfig::default().is_empty());
    }

    #[test]
    fn test_nested_deserialize() {
        let yaml = r#"
            interface:
              theme: dark
              input_box:
                auto_resize: true
                shortcuts:
                  send: Enter
                  newline: Shift+Enter
              conversation_card:
                export:
                  formats: [markdown, json]
            customization:
              branding:
                company_name: Acme
        "#;

        let ui: UiConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(!ui.is_empty());
        assert_eq!(ui.interface.theme, "dark");
        assert_eq!(ui.interface.input_box.shortcuts["newline"], "Shift+Enter");
        assert_eq!(
            ui.interface.conversation_card.export.formats,
            vec!["markdown", "json"]
        );
        assert_eq!(ui.customization.branding.company_name, "Acme");
    }
}
