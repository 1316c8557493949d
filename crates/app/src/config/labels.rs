//! Labels Config

use clap::Args;

/// Label assets and print surface settings.
#[derive(Debug, Clone, Args)]
pub struct LabelsConfig {
    /// Bucket holding the label template and font
    #[arg(long, env = "LABEL_BUCKET", default_value = "labelpdf")]
    pub label_bucket: String,

    /// Object name of the label template
    #[arg(long, env = "LABEL_TEMPLATE", default_value = "labelfinal.pdf")]
    pub label_template: String,

    /// Object name of the label font; empty uses the standard font
    #[arg(long, env = "LABEL_FONT", default_value = "cpb.ttf")]
    pub label_font: String,

    /// Command the rendered PDF is piped to, e.g. `lp -d labels`
    #[arg(long, env = "PRINT_COMMAND")]
    pub print_command: Option<String>,
}

impl LabelsConfig {
    /// Font object to download, if embedding is enabled.
    #[must_use]
    pub fn font_object(&self) -> Option<&str> {
        let font = self.label_font.trim();

        (!font.is_empty()).then_some(font)
    }
}
