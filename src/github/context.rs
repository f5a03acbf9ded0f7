//! GitHub context generation
//!
//! Deterministic factories for the three levels of the GitHub context
//! tree: source → repository → pull request / issue. Calling any
//! factory twice with the same arguments yields field-for-field equal
//! contexts, which is what lets consumers merge context trees across
//! activities by id.

use crate::model::{make_id, metadata_with_params, Context};

/// Unique identifier for this connector
pub const CONNECTOR_ID: &str = "github";

/// Base URL for the GitHub REST API
pub const GITHUB_API_BASE_URL: &str = "https://api.github.com";

// Resource type constants for context identification
pub const RESOURCE_TYPE_SOURCE: &str = "source";
pub const RESOURCE_TYPE_REPOSITORY: &str = "repository";
pub const RESOURCE_TYPE_PULL_REQUEST: &str = "pull_request";
pub const RESOURCE_TYPE_ISSUE: &str = "issue";

/// Source context id: `github:source`
pub fn source_context_id() -> String {
    make_id(CONNECTOR_ID, RESOURCE_TYPE_SOURCE, [])
}

/// Repository context id: `github:repository:{repo}`
pub fn repository_context_id(repo: &str) -> String {
    make_id(CONNECTOR_ID, RESOURCE_TYPE_REPOSITORY, [repo])
}

/// Pull request context id: `github:pull_request:{repo}:{number}`
pub fn pull_request_context_id(repo: &str, number: &str) -> String {
    make_id(CONNECTOR_ID, RESOURCE_TYPE_PULL_REQUEST, [repo, number])
}

/// Issue context id: `github:issue:{repo}:{number}`
pub fn issue_context_id(repo: &str, number: &str) -> String {
    make_id(CONNECTOR_ID, RESOURCE_TYPE_ISSUE, [repo, number])
}

/// Factory for standardized GitHub [`Context`] values
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextGenerator;

impl ContextGenerator {
    /// Create a new generator
    pub fn new() -> Self {
        Self
    }

    /// Level 1 source context for GitHub
    pub fn source(&self) -> Context {
        let id = source_context_id();
        Context {
            name: id.clone(),
            id,
            level: 1,
            parent_id: String::new(), // top level, no parent
            connector_id: CONNECTOR_ID.to_string(),
            resource_type: RESOURCE_TYPE_SOURCE.to_string(),
            title: Some("GitHub".to_string()),
            description: Some(
                "Github is a code hosting platform for version control and collaboration."
                    .to_string(),
            ),
            url: Some("https://github.com".to_string()),
            created_at: None,
            updated_at: None,
            metadata: metadata_with_params(&[]),
        }
    }

    /// Level 2 repository context
    pub fn repository(&self, repo: &str) -> Context {
        Context {
            id: repository_context_id(repo),
            name: format!("repository:{repo}"),
            level: 2,
            parent_id: source_context_id(),
            connector_id: CONNECTOR_ID.to_string(),
            resource_type: RESOURCE_TYPE_REPOSITORY.to_string(),
            title: Some(repo.to_string()),
            description: None,
            url: None,
            created_at: None,
            updated_at: None,
            metadata: metadata_with_params(&[("repo", repo)]),
        }
    }

    /// Level 3 pull request context
    pub fn pull_request(&self, repo: &str, number: u64) -> Context {
        let number = number.to_string();
        Context {
            id: pull_request_context_id(repo, &number),
            name: format!("PR #{number}"),
            level: 3,
            parent_id: repository_context_id(repo),
            connector_id: CONNECTOR_ID.to_string(),
            resource_type: RESOURCE_TYPE_PULL_REQUEST.to_string(),
            title: Some(format!("PR #{number}")),
            description: None,
            url: None,
            created_at: None,
            updated_at: None,
            metadata: metadata_with_params(&[("repo", repo), ("pr_number", &number)]),
        }
    }

    /// Level 3 issue context
    pub fn issue(&self, repo: &str, number: u64) -> Context {
        let number = number.to_string();
        Context {
            id: issue_context_id(repo, &number),
            name: format!("Issue #{number}"),
            level: 3,
            parent_id: repository_context_id(repo),
            connector_id: CONNECTOR_ID.to_string(),
            resource_type: RESOURCE_TYPE_ISSUE.to_string(),
            title: Some(format!("Issue #{number}")),
            description: None,
            url: None,
            created_at: None,
            updated_at: None,
            metadata: metadata_with_params(&[("repo", repo), ("issue_number", &number)]),
        }
    }
}
