use super::error::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRecord {
    pub id: String,
    pub repository: String,
    pub tag: String,
    pub image_id: String,
    pub size: String,
    pub created: String,
}

impl ImageRecord {
    /// `repository:tag`, the reference other commands accept
    pub fn reference(&self) -> String {
        format!("{}:{}", self.repository, self.tag)
    }
}

/// Column titles of the runtime's image table.
///
/// They depend on the runtime's locale, so they are configurable instead of inlined in the parser.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ImageTableHeaders {
    pub repository: String,
    pub tag: String,
    pub image_id: String,
    pub created: String,
    pub size: String,
}

impl Default for ImageTableHeaders {
    fn default() -> Self {
        Self {
            repository: "REPOSITORY".into(),
            tag: "TAG".into(),
            image_id: "IMAGE ID".into(),
            created: "CREATED".into(),
            size: "SIZE".into(),
        }
    }
}

impl ImageTableHeaders {
    /// A blank literal would make the header row unrecognizable
    pub fn validate(&self) -> Result<()> {
        let literals = [
            ("repository", &self.repository),
            ("tag", &self.tag),
            ("image_id", &self.image_id),
            ("created", &self.created),
            ("size", &self.size),
        ];
        for (key, value) in literals {
            if value.trim().is_empty() {
                return Err(Error::Config(format!("image header '{key}' must not be empty")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_joins_repository_and_tag() {
        let image = ImageRecord {
            id: "abc-0".into(),
            repository: "docker.io/library/ubuntu".into(),
            tag: "22.04".into(),
            image_id: "abc".into(),
            size: "78MB".into(),
            created: "3 weeks ago".into(),
        };
        assert_eq!(image.reference(), "docker.io/library/ubuntu:22.04");
    }

    #[test]
    fn headers_partial_override_keeps_defaults() {
        let headers: ImageTableHeaders = toml::from_str(r#"size = "GRÖSSE""#).unwrap();
        assert_eq!(headers.size, "GRÖSSE");
        assert_eq!(headers.repository, "REPOSITORY");
        assert_eq!(headers.image_id, "IMAGE ID");
    }

    #[test]
    fn blank_header_is_a_config_error() {
        let headers = ImageTableHeaders {
            tag: " ".into(),
            ..Default::default()
        };
        assert!(matches!(headers.validate(), Err(Error::Config(_))));
        assert!(ImageTableHeaders::default().validate().is_ok());
    }
}
