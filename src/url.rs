// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Repository URL parsing
//!
//! Both the https and the scp-like ssh forms are understood:
//!
//! ```text
//! https://github.com/owner/repo.git
//! git@github.com:owner/repo.git
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported hosting providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// github.com
    GitHub,
    /// gitlab.com
    GitLab,
    /// bitbucket.org
    Bitbucket,
    /// codeberg.org
    Codeberg,
    /// sr.ht
    Sourcehut,
}

impl Provider {
    /// Every provider, in matching order
    pub const ALL: [Self; 5] = [
        Self::GitHub,
        Self::GitLab,
        Self::Bitbucket,
        Self::Codeberg,
        Self::Sourcehut,
    ];

    /// Host name that identifies this provider inside a URL
    #[must_use]
    pub fn host(&self) -> &'static str {
        match self {
            Self::GitHub => "github.com",
            Self::GitLab => "gitlab.com",
            Self::Bitbucket => "bitbucket.org",
            Self::Codeberg => "codeberg.org",
            Self::Sourcehut => "sr.ht",
        }
    }

    /// Directory name used under the repository root
    #[must_use]
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::GitHub => "github",
            Self::GitLab => "gitlab",
            Self::Bitbucket => "bitbucket",
            Self::Codeberg => "codeberg",
            Self::Sourcehut => "sourcehut",
        }
    }

    /// Find the provider whose host appears in `url`
    #[must_use]
    pub fn from_url(url: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| url.contains(p.host()))
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// A repository URL broken into its parts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoUrl {
    /// The URL as given (trimmed)
    pub url: String,
    /// Hosting provider
    pub provider: Provider,
    /// Owner or namespace
    pub user: String,
    /// Repository name without `.git`
    pub repo: String,
}

/// Parse a repository URL into provider, user and repo.
///
/// Returns `None` for empty input, unknown hosts, and URLs that do not carry
/// both a user and a repository segment after the host.
#[must_use]
pub fn parse(url: &str) -> Option<RepoUrl> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }

    let provider = Provider::from_url(url)?;
    let (_, rest) = url.split_once(provider.host())?;
    let rest = rest.strip_prefix(&['/', ':'][..]).unwrap_or(rest);
    let rest = rest.split(&['?', '#'][..]).next().unwrap_or_default();

    let mut segments = rest.split('/');
    let user = segments.next().filter(|s| !s.is_empty())?;
    let repo = segments.next()?;
    let repo = repo.strip_suffix(".git").unwrap_or(repo);
    if repo.is_empty() || is_relative_segment(user) || is_relative_segment(repo) {
        return None;
    }

    Some(RepoUrl {
        url: url.to_string(),
        provider,
        user: user.to_string(),
        repo: repo.to_string(),
    })
}

/// `.` and `..` would escape the provider directory once joined onto a path
fn is_relative_segment(segment: &str) -> bool {
    matches!(segment, "." | "..")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_github_https() {
        let parsed = parse("https://github.com/rust-lang/cargo.git").unwrap();
        assert_eq!(parsed.provider, Provider::GitHub);
        assert_eq!(parsed.user, "rust-lang");
        assert_eq!(parsed.repo, "cargo");
        assert_eq!(parsed.url, "https://github.com/rust-lang/cargo.git");
    }

    #[test]
    fn test_parse_github_ssh() {
        let parsed = parse("git@github.com:rust-lang/cargo.git").unwrap();
        assert_eq!(parsed.provider, Provider::GitHub);
        assert_eq!(parsed.user, "rust-lang");
        assert_eq!(parsed.repo, "cargo");
    }

    #[test]
    fn test_parse_without_git_suffix() {
        let parsed = parse("https://github.com/tokio-rs/tokio").unwrap();
        assert_eq!(parsed.repo, "tokio");
    }

    #[test]
    fn test_parse_ignores_extra_segments() {
        let parsed = parse("https://github.com/tokio-rs/tokio/tree/master/tokio").unwrap();
        assert_eq!(parsed.user, "tokio-rs");
        assert_eq!(parsed.repo, "tokio");

        let parsed = parse("https://github.com/tokio-rs/tokio/").unwrap();
        assert_eq!(parsed.repo, "tokio");
    }

    #[test]
    fn test_parse_strips_query_and_fragment() {
        let parsed = parse("https://github.com/tokio-rs/tokio?tab=readme").unwrap();
        assert_eq!(parsed.repo, "tokio");

        let parsed = parse("https://github.com/tokio-rs/tokio#readme").unwrap();
        assert_eq!(parsed.repo, "tokio");
    }

    #[test]
    fn test_parse_other_providers() {
        let gl = parse("git@gitlab.com:gitlab-org/gitlab.git").unwrap();
        assert_eq!(gl.provider, Provider::GitLab);
        assert_eq!((gl.user.as_str(), gl.repo.as_str()), ("gitlab-org", "gitlab"));

        let bb = parse("https://bitbucket.org/atlassian/python-bitbucket.git").unwrap();
        assert_eq!(bb.provider, Provider::Bitbucket);

        let cb = parse("https://codeberg.org/forgejo/forgejo").unwrap();
        assert_eq!(cb.provider, Provider::Codeberg);
        assert_eq!(cb.repo, "forgejo");
    }

    #[test]
    fn test_parse_sourcehut_keeps_tilde() {
        let parsed = parse("https://git.sr.ht/~sircmpwn/hare").unwrap();
        assert_eq!(parsed.provider, Provider::Sourcehut);
        assert_eq!(parsed.user, "~sircmpwn");
        assert_eq!(parsed.repo, "hare");

        let parsed = parse("git@git.sr.ht:~sircmpwn/hare").unwrap();
        assert_eq!(parsed.user, "~sircmpwn");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let parsed = parse("  https://github.com/a/b.git\n").unwrap();
        assert_eq!(parsed.url, "https://github.com/a/b.git");
        assert_eq!(parsed.repo, "b");
    }

    #[test]
    fn test_parse_rejects_incomplete() {
        assert!(parse("").is_none());
        assert!(parse("   ").is_none());
        assert!(parse("https://github.com").is_none());
        assert!(parse("https://github.com/").is_none());
        assert!(parse("https://github.com/owner").is_none());
        assert!(parse("https://github.com/owner/").is_none());
        assert!(parse("https://github.com/owner/.git").is_none());
        assert!(parse("https://example.com/owner/repo.git").is_none());
    }

    #[test]
    fn test_parse_rejects_dot_segments() {
        assert!(parse("https://github.com/../x").is_none());
        assert!(parse("https://github.com/./x").is_none());
        assert!(parse("https://github.com/owner/..").is_none());
        assert!(parse("git@github.com:owner/..git").is_none());
        assert!(parse("git@github.com:owner/.").is_none());

        let parsed = parse("https://github.com/owner/...").unwrap();
        assert_eq!(parsed.repo, "...");
    }

    #[test]
    fn test_provider_from_url() {
        assert_eq!(Provider::from_url("https://gitlab.com/x/y"), Some(Provider::GitLab));
        assert_eq!(Provider::from_url("ssh://git@example.org/x/y"), None);
        assert_eq!(Provider::GitHub.to_string(), "github");
    }

    proptest! {
        #[test]
        fn https_and_ssh_forms_agree(
            user in "[A-Za-z0-9][A-Za-z0-9_-]{0,15}",
            repo in "[A-Za-z0-9][A-Za-z0-9_-]{0,15}",
            suffix in proptest::bool::ANY,
        ) {
            let ext = if suffix { ".git" } else { "" };
            let https = parse(&format!("https://github.com/{user}/{repo}{ext}")).unwrap();
            let ssh = parse(&format!("git@github.com:{user}/{repo}{ext}")).unwrap();
            prop_assert_eq!(&https.user, &user);
            prop_assert_eq!(&https.repo, &repo);
            prop_assert_eq!(https.user, ssh.user);
            prop_assert_eq!(https.repo, ssh.repo);
        }
    }
}
