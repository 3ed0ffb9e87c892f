use crate::config::Config;
use crate::core::types::ExemptReason;

/// Pre-flight decision for one normalized URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Exempt(ExemptReason),
    Probeable,
}

/// Decides, before any I/O, whether a URL is a placeholder or worth probing.
///
/// Matching is plain substring containment. Template markers are checked
/// first, so a URL carrying both kinds of marker is a template.
#[derive(Debug, Clone)]
pub struct Classifier {
    template_markers: Vec<String>,
    example_domains: Vec<String>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Classifier {
    pub fn new(template_markers: Vec<String>, example_domains: Vec<String>) -> Self {
        Self {
            template_markers,
            example_domains,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.effective_template_markers(),
            config.effective_example_domains(),
        )
    }

    pub fn classify(&self, url: &str) -> Classification {
        if self.template_markers.iter().any(|m| url.contains(m.as_str())) {
            Classification::Exempt(ExemptReason::Template)
        } else if self.example_domains.iter().any(|d| url.contains(d.as_str())) {
            Classification::Exempt(ExemptReason::ExampleDomain)
        } else {
            Classification::Probeable
        }
    }
}
