use std::sync::Arc;
use winit::error::OsError;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            title: "Tumble".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

impl PlatformConfig {
    /// Replace whichever fields are given, keeping the rest.
    pub fn with_overrides(
        mut self,
        title: Option<&str>,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Self {
        if let Some(title) = title {
            self.title = title.to_string();
        }
        // a zero-sized inner size is rejected by some platforms
        if let Some(width) = width.filter(|w| *w > 0) {
            self.width = width;
        }
        if let Some(height) = height.filter(|h| *h > 0) {
            self.height = height;
        }
        self
    }
}

pub fn create_window(
    event_loop: &ActiveEventLoop,
    config: &PlatformConfig,
) -> Result<Arc<Window>, OsError> {
    let attrs = WindowAttributes::default()
        .with_title(&config.title)
        .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height));

    let window = event_loop.create_window(attrs)?;
    Ok(Arc::new(window))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_only_given_fields() {
        let config = PlatformConfig::default().with_overrides(Some("Rain"), None, Some(480));
        assert_eq!(config.title, "Rain");
        assert_eq!(config.width, 1280);
        assert_eq!(config.height, 480);
    }

    #[test]
    fn zero_dimensions_are_ignored() {
        let config = PlatformConfig::default().with_overrides(None, Some(0), Some(0));
        assert_eq!(config, PlatformConfig::default());
    }
}
