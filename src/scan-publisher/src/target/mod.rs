//! The repository whose scan results are being published.

mod error;

pub use error::TargetError;

use serde::Serialize;
use url::Url;

const DEFAULT_HOST_URL: &str = "https://github.com";

/// A scanned repository, parsed from the URL passed to the scan-results flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetRepository {
    /// Repository owner (user or organization).
    pub owner: String,

    /// Repository name.
    pub name: String,

    /// Full repository name in "owner/name" format.
    pub full_name: String,

    /// Normalized web URL without `.git` or trailing slash.
    pub url: String,

    /// `owner-name`, used in branch and results file names.
    pub slug: String,
}

impl TargetRepository {
    /// Parses a repository URL such as `https://github.com/owner/name(.git)`.
    ///
    /// A bare `owner/name` is accepted and assumed to live on github.com.
    ///
    /// # Errors
    ///
    /// Returns [`TargetError`] if the input does not identify a repository.
    pub fn parse(input: &str) -> Result<Self, TargetError> {
        let trimmed = input.trim();
        let url = match Url::parse(trimmed) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                Url::parse(&format!("{DEFAULT_HOST_URL}/{trimmed}")).map_err(|e| {
                    TargetError::InvalidUrl {
                        input: input.to_string(),
                        source: e,
                    }
                })?
            }
            Err(e) => {
                return Err(TargetError::InvalidUrl {
                    input: input.to_string(),
                    source: e,
                })
            }
        };

        if !matches!(url.scheme(), "http" | "https") {
            return Err(TargetError::UnsupportedScheme {
                input: input.to_string(),
            });
        }

        let segments: Vec<&str> = url
            .path_segments()
            .map(|segments| segments.filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();
        let [owner, name] = segments.as_slice() else {
            return Err(TargetError::NotARepository {
                input: input.to_string(),
            });
        };
        let name = name.strip_suffix(".git").unwrap_or(*name);

        validate_segment(input, "owner", owner)?;
        validate_segment(input, "name", name)?;

        let host = url.host_str().unwrap_or("github.com");
        let origin = match url.port() {
            Some(port) => format!("{}://{host}:{port}", url.scheme()),
            None => format!("{}://{host}", url.scheme()),
        };

        Ok(Self {
            owner: (*owner).to_string(),
            name: name.to_string(),
            full_name: format!("{owner}/{name}"),
            url: format!("{origin}/{owner}/{name}"),
            slug: format!("{owner}-{name}"),
        })
    }

    /// File name of this repository's aggregated violations file.
    #[must_use]
    pub fn results_file_name(&self) -> String {
        format!("{}-violations.json", self.slug)
    }
}

fn validate_segment(input: &str, part: &'static str, value: &str) -> Result<(), TargetError> {
    let valid = !value.is_empty()
        && value != "."
        && value != ".."
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(TargetError::InvalidSegment {
            input: input.to_string(),
            part,
            value: value.to_string(),
        })
    }
}
