/// Site-wide settings that do not change while the page is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub blog_name: String,
    /// Path the page is served from; what "All" and closing the reader push.
    pub base_path: String,
    pub hard_breaks: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            blog_name: String::new(),
            base_path: "/".to_string(),
            hard_breaks: false,
        }
    }
}

impl SiteConfig {
    pub fn new(blog_name: String, base_path: &str, hard_breaks: bool) -> Self {
        Self {
            blog_name,
            base_path: if base_path.is_empty() {
                "/".to_string()
            } else {
                base_path.to_string()
            },
            hard_breaks,
        }
    }

    /// `BLOG_NAME` from the environment, empty when unset.
    pub fn blog_name_from_env() -> String {
        std::env::var("BLOG_NAME").unwrap_or_default()
    }
}
