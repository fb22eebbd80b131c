use std::time::Duration;

/// Pause between confirm and `giveCard`, long enough for the spinner to paint
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);
/// How long to wait for the host to lower the loading indicator
pub const DEFAULT_RESPONSE_TIMEOUT: Duration = Duration::from_millis(5000);
pub const DEFAULT_RESOURCE: &str = "rieus_rep";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceConfig {
    pub debounce: Duration,
    pub response_timeout: Duration,
    /// Host resource name; outbound calls are addressed `https://<resource>/<action>`
    pub resource_name: String,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            response_timeout: DEFAULT_RESPONSE_TIMEOUT,
            resource_name: DEFAULT_RESOURCE.to_string(),
        }
    }
}

impl SurfaceConfig {
    pub fn debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn response_timeout(mut self, timeout: Duration) -> Self {
        self.response_timeout = timeout;
        self
    }

    pub fn resource_name(mut self, name: impl Into<String>) -> Self {
        self.resource_name = name.into();
        self
    }
}
