//! npm registry client
//!
//! Minimal registry client used to resolve a package page to its source
//! repository and to read the package's dependency tables.

use crate::Result;
use crate::source::records::{ContributorRecord, DependencyManifest};
use core::time::Duration;
use ohno::{IntoAppError, bail};
use semver::Version;
use serde::Deserialize;

const LOG_TARGET: &str = "       npm";

/// Package version document from `GET /{package}/{version}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageDoc {
    pub repository: Option<RepositoryField>,
    #[serde(default)]
    pub contributors: Vec<RegistryPerson>,
    #[serde(default)]
    pub maintainers: Vec<RegistryPerson>,
    #[serde(flatten)]
    pub manifest: DependencyManifest,
}

impl PackageDoc {
    /// Source repository URL recorded in the package metadata, if any.
    #[must_use]
    pub fn repository_url(&self) -> Option<&str> {
        self.repository.as_ref().and_then(RepositoryField::url)
    }

    /// Contributor records synthesized from the registry's people arrays,
    /// falling back to the maintainer list when no contributors are declared.
    ///
    /// The registry does not publish contribution counts, so every person
    /// counts once.
    #[must_use]
    pub fn contributor_records(&self) -> Vec<ContributorRecord> {
        let people = if self.contributors.is_empty() {
            &self.maintainers
        } else {
            &self.contributors
        };

        people
            .iter()
            .map(|person| ContributorRecord {
                login: person.login().map(ToString::to_string),
                contributions: 1,
            })
            .collect()
    }
}

/// A person entry in the registry's `contributors` or `maintainers` arrays.
/// Appears either as a bare name string or as a `{name, email}` object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RegistryPerson {
    Plain(String),
    Tagged {
        name: Option<String>,
        email: Option<String>,
    },
}

impl RegistryPerson {
    /// Best available identity for the person: name first, email second.
    #[must_use]
    pub fn login(&self) -> Option<&str> {
        match self {
            Self::Plain(name) => Some(name),
            Self::Tagged { name, email } => name.as_deref().or(email.as_deref()),
        }
    }
}

/// The `repository` field appears either as a bare URL string or as a
/// `{type, url}` object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RepositoryField {
    Plain(String),
    Tagged { url: Option<String> },
}

impl RepositoryField {
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Plain(url) => Some(url),
            Self::Tagged { url } => url.as_deref(),
        }
    }
}

/// npm registry API client.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    client: reqwest::Client,
    base_url: String,
}

impl RegistryClient {
    /// Create a new registry client against the given base URL.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent("pkg-rank").timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Fetch the version document for a package, defaulting to the latest version.
    ///
    /// # Errors
    ///
    /// Returns an error if the package or version does not exist in the
    /// registry, or if the registry cannot be reached. Callers resolve input
    /// URLs through this method, so failure here fails the whole request.
    pub async fn package_version(&self, name: &str, version: Option<&Version>) -> Result<PackageDoc> {
        let version_part = version.map_or_else(|| "latest".to_string(), ToString::to_string);
        let url = format!("{}/{name}/{version_part}", self.base_url.trim_end_matches('/'));

        log::debug!(target: LOG_TARGET, "Fetching package document from '{url}'");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .into_app_err_with(|| format!("could not reach the npm registry at '{url}'"))?;

        if resp.status().as_u16() == 404 {
            bail!("package '{name}' (version {version_part}) was not found in the npm registry");
        }

        let resp = resp
            .error_for_status()
            .into_app_err_with(|| format!("npm registry request for '{name}' failed"))?;

        resp.json::<PackageDoc>()
            .await
            .into_app_err_with(|| format!("malformed package document for '{name}'"))
    }
}
