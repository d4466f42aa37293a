use serde::Deserialize;

#[derive(Debug, PartialEq, Clone)]
pub struct GitHubRepo {
    pub owner: String,
    pub repo: String,
}

impl GitHubRepo {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Repository publishing the libvips Windows binaries.
    pub fn libvips_windows() -> Self {
        Self::new("libvips", "build-win64-mxe")
    }
}

impl std::fmt::Display for GitHubRepo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Release descriptor returned by `/releases/latest`. Only the tag is read.
#[derive(Deserialize, Debug, PartialEq, Clone)]
pub struct Release {
    pub tag_name: String,
}

impl Release {
    /// The release version: the tag with its leading `v` removed.
    pub fn version(&self) -> &str {
        self.tag_name.strip_prefix('v').unwrap_or(&self.tag_name)
    }
}
