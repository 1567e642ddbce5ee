use serde::Deserialize;

use crate::{SettingsError, ValidationError};

/// One embeddable external project, supplied by the page author.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectDescriptor {
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub container_id: Option<String>,
}

impl ProjectDescriptor {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            description: None,
            container_id: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_container_id(mut self, id: impl Into<String>) -> Self {
        self.container_id = Some(id.into());
        self
    }

    /// Only presence is checked; the url is rendered as given.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        if self.url.is_empty() {
            return Err(ValidationError::MissingUrl);
        }
        Ok(())
    }

    /// An empty description renders no paragraph at all.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|text| !text.is_empty())
    }
}

/// Container id of the form `project-embed-<millis>-<9 base36 chars>`.
///
/// `random` is expected in `[0, 1)`; uniqueness is collision-improbable, not
/// guaranteed.
pub fn generate_container_id(now_ms: f64, random: f64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut fraction = random.clamp(0.0, 1.0).fract();
    let mut suffix = String::with_capacity(9);
    for _ in 0..9 {
        fraction *= 36.0;
        let digit = fraction.floor() as usize;
        suffix.push(DIGITS[digit.min(35)] as char);
        fraction -= digit as f64;
    }
    format!("project-embed-{}-{}", now_ms.max(0.0) as u64, suffix)
}

/// Parse a JSON array of descriptors as embedded in the page.
///
/// Entries with missing fields parse fine and are rejected later by
/// [`ProjectDescriptor::validate`], so one bad entry does not hide the rest.
pub fn parse_project_list(json: &str) -> Result<Vec<ProjectDescriptor>, SettingsError> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::{generate_container_id, ProjectDescriptor};
    use crate::ValidationError;

    #[test]
    fn container_id_has_prefix_timestamp_and_suffix() {
        let id = generate_container_id(1_700_000_000_123.0, 0.5);
        assert!(id.starts_with("project-embed-1700000000123-"));
        let suffix = id.rsplit('-').next().unwrap();
        assert_eq!(suffix.len(), 9);
        assert!(suffix.starts_with('i'));
        assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn different_randoms_give_different_ids() {
        assert_ne!(
            generate_container_id(1.0, 0.25),
            generate_container_id(1.0, 0.26)
        );
    }

    #[test]
    fn validation_reports_first_missing_field() {
        assert_eq!(
            ProjectDescriptor::new("", "").validate(),
            Err(ValidationError::MissingTitle)
        );
        assert_eq!(
            ProjectDescriptor::new("Demo", "").validate(),
            Err(ValidationError::MissingUrl)
        );
        assert!(ProjectDescriptor::new("Demo", "not a url").validate().is_ok());
    }
}
