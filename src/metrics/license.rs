use crate::metrics::{Metric, MetricKind, MetricOutcome};
use crate::source::{Fetched, RepositorySource};

const LOG_TARGET: &str = "   metrics";

const README_LICENSE_HEADING: &str = "## License";
const LICENSE_FILE: &str = "LICENSE";
const UNKNOWN_LICENSE: &str = "nothing";

/// License names compatible with LGPL-2.1 distribution.
const COMPATIBLE_LICENSES: [&str; 24] = [
    "Apache",
    "Artistic",
    "BSL",
    "BSD-2-Clause",
    "BSD-3-Clause",
    "BSD-3-Clause-Clear",
    "0BSD",
    "CC0",
    "ECL",
    "EPL-1.0",
    "EPL",
    "GPL-2.0",
    "GPL",
    "LGPL-2.1",
    "LGPL",
    "ISC",
    "MIT",
    "MPL",
    "PostgreSQL",
    "NCSA",
    "Unlicense",
    "Zlib",
    "none",
    "other",
];

const INCOMPATIBLE_LICENSES: [&str; 12] = [
    "AFL-3.0",
    "BSD-4-Clause",
    "CC",
    "CC-BY-4.0",
    "CC-BY-SA-4.0",
    "WTFPL",
    "EUPL-1.1",
    "AGPL-3.0",
    "LPPL-1.3c",
    "MS-PL",
    "OSL-3.0",
    "OFL-1.1",
];

/// Binary compatibility check, worked out from three sources in order of
/// trust: the readme's license section, the LICENSE file, and finally the
/// license the hosting service detected. The first source that names a
/// compatible license settles the question.
#[derive(Debug, Clone, Copy, Default)]
pub struct License;

impl Metric for License {
    fn kind(&self) -> MetricKind {
        MetricKind::License
    }

    async fn compute<S: RepositorySource>(&self, source: &S) -> MetricOutcome {
        if let Fetched::Found(readme) = source.readme().await
            && readme_grants(&readme)
        {
            return MetricOutcome::Scored(1.0);
        }

        if let Fetched::Found(text) = source.file_contents(LICENSE_FILE).await
            && license_file_grants(&text)
        {
            return MetricOutcome::Scored(1.0);
        }

        if api_grants(source).await {
            return MetricOutcome::Scored(1.0);
        }

        MetricOutcome::Scored(0.0)
    }
}

/// Looks for a compatible license named on the first line of the readme's
/// `## License` section.
fn readme_grants(readme: &str) -> bool {
    let Some(index) = readme.find(README_LICENSE_HEADING) else {
        return false;
    };

    let first_line = readme[index + README_LICENSE_HEADING.len()..]
        .trim()
        .split('\n')
        .next()
        .unwrap_or_default()
        .trim();

    COMPATIBLE_LICENSES.iter().any(|name| first_line.contains(name))
}

fn license_file_grants(text: &str) -> bool {
    COMPATIBLE_LICENSES.iter().any(|name| text.contains(name))
}

/// Matches the license key the hosting service detected against the known
/// lists, ignoring case. Unknown keys are treated as incompatible.
async fn api_grants<S: RepositorySource>(source: &S) -> bool {
    let key = source
        .metadata()
        .await
        .found()
        .and_then(|meta| meta.license.and_then(|license| license.key))
        .unwrap_or_else(|| UNKNOWN_LICENSE.to_string());

    if COMPATIBLE_LICENSES.iter().any(|name| name.eq_ignore_ascii_case(&key)) {
        log::debug!(target: LOG_TARGET, "detected license '{key}' is compatible");
        return true;
    }

    if INCOMPATIBLE_LICENSES.iter().any(|name| name.eq_ignore_ascii_case(&key)) {
        log::debug!(target: LOG_TARGET, "detected license '{key}' is incompatible");
    } else {
        log::debug!(target: LOG_TARGET, "detected license '{key}' is unknown, treating as incompatible");
    }

    false
}
