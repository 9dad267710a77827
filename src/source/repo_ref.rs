use crate::Result;
use core::fmt::{Display, Formatter};
use ohno::{IntoAppError, bail};
use semver::Version;
use std::sync::Arc;
use url::Url;

/// Where a repository identity was resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceOrigin {
    /// The input URL named a git hosting site directly.
    GitHost,

    /// The input URL named a package registry page.
    PackageRegistry,
}

/// A classified input URL, before any network round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlKind {
    /// A GitHub repository in any of the accepted remote forms.
    GitHub {
        owner: Arc<str>,
        repo: Arc<str>,
        canonical: Arc<Url>,
    },

    /// An npm package page, optionally pinned to a version.
    NpmPackage { name: Arc<str>, version: Option<Version> },
}

impl UrlKind {
    /// Classifies an input URL as a GitHub repository or an npm package page.
    ///
    /// GitHub remotes are accepted in `https://`, `http://`, `git://`, `ssh://`,
    /// `git+https://`, and `git+ssh://` forms and are canonicalized to a plain
    /// `https://github.com/{owner}/{repo}` URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be mapped to a known host format.
    pub fn parse(input: &str) -> Result<Self> {
        let url = Url::parse(input.trim()).into_app_err_with(|| format!("unrecognized URL `{input}`"))?;

        match url.scheme() {
            "http" | "https" | "git" | "ssh" | "git+https" | "git+ssh" => (),
            other => bail!("unsupported URL scheme `{other}` in `{input}`"),
        }

        let host = url.host_str().unwrap_or_default();
        match host {
            "github.com" | "www.github.com" => Self::parse_github(&url),
            "npmjs.com" | "www.npmjs.com" | "npmjs.org" | "www.npmjs.org" => Self::parse_npm(&url),
            _ => bail!("URL does not name a supported host: {input}"),
        }
    }

    fn parse_github(url: &Url) -> Result<Self> {
        let path_segments: Vec<_> = url.path_segments().map(Iterator::collect).unwrap_or_default();

        if path_segments.len() < 2 {
            bail!("invalid repository URL format: {url}");
        }

        if path_segments[0].is_empty() || path_segments[1].is_empty() {
            bail!("invalid repository URL: empty owner or repo name: {url}");
        }

        let owner = path_segments[0];
        let repo = path_segments[1].trim_end_matches(".git");

        // Reconstruct a clean URL with only https://github.com/owner/repo
        let canonical =
            Url::parse(&format!("https://github.com/{owner}/{repo}")).into_app_err("reconstructing repository URL")?;

        Ok(Self::GitHub {
            owner: Arc::from(owner),
            repo: Arc::from(repo),
            canonical: Arc::new(canonical),
        })
    }

    fn parse_npm(url: &Url) -> Result<Self> {
        let path_segments: Vec<_> = url.path_segments().map(Iterator::collect).unwrap_or_default();

        if path_segments.first().copied() != Some("package") || path_segments.len() < 2 {
            bail!("not an npm package page: {url}");
        }

        let rest = &path_segments[1..];
        let (name_segments, version) = match rest.iter().position(|s| *s == "v") {
            Some(idx) => {
                let Some(raw) = rest.get(idx + 1) else {
                    bail!("missing version after /v/ in {url}");
                };
                let parsed = Version::parse(raw).into_app_err_with(|| format!("invalid package version in {url}"))?;
                (&rest[..idx], Some(parsed))
            }
            None => (rest, None),
        };

        let name = match *name_segments {
            [single] if !single.is_empty() => single.to_string(),
            [scope, pkg] if scope.starts_with('@') && !pkg.is_empty() => format!("{scope}/{pkg}"),
            _ => bail!("invalid npm package name in URL: {url}"),
        };

        Ok(Self::NpmPackage {
            name: Arc::from(name.as_str()),
            version,
        })
    }
}

/// A resolved repository identity.
///
/// Immutable once constructed. One instance is created per score request and
/// every metric reads the same reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
    url: Arc<Url>,
    owner: Arc<str>,
    repo: Arc<str>,
    origin: SourceOrigin,
}

impl RepoRef {
    #[must_use]
    pub fn new(owner: Arc<str>, repo: Arc<str>, url: Arc<Url>, origin: SourceOrigin) -> Self {
        Self { url, owner, repo, origin }
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub fn repo(&self) -> &str {
        &self.repo
    }

    #[must_use]
    pub const fn origin(&self) -> SourceOrigin {
        self.origin
    }
}

impl Display for RepoRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.url)
    }
}
