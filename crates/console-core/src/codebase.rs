use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::model::{CodebaseStatus, GitHubRepository, IndexedCodebase};

/// Project a repository snapshot down to the codebases registered for
/// indexing. The whole view derives from one fetch, so an entry can only
/// exist if that same snapshot carried its `is_indexed` flag.
pub fn indexed_codebases(repos: &[GitHubRepository]) -> Vec<IndexedCodebase> {
    let fetched_at = format_timestamp(OffsetDateTime::now_utc());
    repos
        .iter()
        .filter(|repo| repo.is_indexed)
        .map(|repo| IndexedCodebase {
            id: repo.github_id.to_string(),
            full_name: repo.full_name.clone(),
            github_url: repo.url.clone(),
            default_branch: repo.default_branch.clone(),
            is_private: repo.private,
            description: repo.description.clone(),
            status: CodebaseStatus::Indexed,
            created_at: fetched_at.clone(),
        })
        .collect()
}

fn format_timestamp(timestamp: OffsetDateTime) -> String {
    timestamp
        .format(&Rfc3339)
        .unwrap_or_else(|_| timestamp.unix_timestamp().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(github_id: u64, name: &str, indexed: bool) -> GitHubRepository {
        GitHubRepository {
            github_id,
            full_name: format!("octocat/{name}"),
            name: name.to_string(),
            private: github_id % 2 == 0,
            description: Some("demo".to_string()),
            default_branch: "main".to_string(),
            url: format!("https://github.com/octocat/{name}"),
            is_indexed: indexed,
        }
    }

    #[test]
    fn derivation_matches_indexed_count() {
        let repos = vec![
            repo(1, "alpha", true),
            repo(2, "beta", false),
            repo(3, "gamma", true),
        ];
        let codebases = indexed_codebases(&repos);
        let indexed = repos.iter().filter(|repo| repo.is_indexed).count();
        assert_eq!(codebases.len(), indexed);
    }

    #[test]
    fn derivation_reshapes_fields() {
        let repos = vec![repo(42, "hello", true)];
        let codebases = indexed_codebases(&repos);
        let codebase = &codebases[0];
        assert_eq!(codebase.id, "42");
        assert_eq!(codebase.full_name, "octocat/hello");
        assert_eq!(codebase.github_url, "https://github.com/octocat/hello");
        assert_eq!(codebase.status, CodebaseStatus::Indexed);
        assert!(codebase.is_private);
        assert!(!codebase.created_at.is_empty());
    }

    #[test]
    fn nothing_indexed_derives_empty() {
        let repos = vec![repo(1, "alpha", false), repo(2, "beta", false)];
        assert!(indexed_codebases(&repos).is_empty());
    }
}
