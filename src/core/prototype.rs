use crate::utils::error::Result;
use std::sync::Arc;
use url::Url;

const GITHUB_BASE: &str = "https://github.com/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubRepository {
    pub user: String,
    pub name: String,
}

impl GithubRepository {
    pub fn new(user: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            name: name.into(),
        }
    }
}

/// `Clone` 就是 prototype 操作：repository 共用，id 與 title 複製
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubIssue {
    pub id: u64,
    pub title: String,
    pub repository: Arc<GithubRepository>,
}

impl GithubIssue {
    pub fn new(repository: Arc<GithubRepository>, id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            repository,
        }
    }

    pub fn url(&self) -> Result<Url> {
        let id = self.id.to_string();
        let mut issue_url = Url::parse(GITHUB_BASE)?;
        issue_url
            .path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend([
                self.repository.user.as_str(),
                self.repository.name.as_str(),
                "issues",
                id.as_str(),
            ]);
        Ok(issue_url)
    }

    /// 複製後只替換不同的欄位
    pub fn duplicate_with(&self, id: u64, title: impl Into<String>) -> Self {
        let mut copy = self.clone();
        copy.id = id;
        copy.title = title.into();
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue() -> GithubIssue {
        let repository = Arc::new(GithubRepository::new("whiteship", "live-study"));
        GithubIssue::new(repository, 1, "Week 1: What is the JVM?")
    }

    #[test]
    fn test_url() {
        assert_eq!(
            issue().url().unwrap().as_str(),
            "https://github.com/whiteship/live-study/issues/1"
        );
    }

    #[test]
    fn test_clone_is_equal_but_independent() {
        let original = issue();
        let mut copy = original.clone();
        assert_eq!(copy, original);

        copy.title = "changed".to_string();
        assert_ne!(copy, original);
        assert_eq!(original.title, "Week 1: What is the JVM?");
    }

    #[test]
    fn test_clone_shares_repository() {
        let original = issue();
        let copy = original.duplicate_with(2, "Week 2");

        assert!(Arc::ptr_eq(&original.repository, &copy.repository));
        assert_eq!(
            copy.url().unwrap().as_str(),
            "https://github.com/whiteship/live-study/issues/2"
        );
        assert_eq!(original.id, 1);
    }
}
