/// Splits a GitHub URL into the clonable repository URL and an optional
/// subdirectory scope.
///
/// URLs of the form `<repo>/tree/<branch>/<path>` scope the job to `<path>`
/// inside the clone; plain repository URLs return an empty subdirectory.
pub fn parse_github_url(url: &str) -> (String, String) {
    match url.split_once("/tree/") {
        Some((repo_url, branch_and_path)) => {
            let subdirectory = branch_and_path
                .split_once('/')
                .map(|(_, path)| path)
                .unwrap_or("");
            (repo_url.to_string(), subdirectory.to_string())
        }
        None => (url.to_string(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_repo_url_has_no_subdirectory() {
        let (repo, subdir) = parse_github_url("https://github.com/acme/widget");
        assert_eq!(repo, "https://github.com/acme/widget");
        assert_eq!(subdir, "");
    }

    #[test]
    fn tree_url_scopes_to_the_subdirectory() {
        let (repo, subdir) =
            parse_github_url("https://github.com/acme/widget/tree/main/services/api");
        assert_eq!(repo, "https://github.com/acme/widget");
        assert_eq!(subdir, "services/api");
    }

    #[test]
    fn tree_url_with_branch_only_has_no_subdirectory() {
        let (repo, subdir) = parse_github_url("https://github.com/acme/widget/tree/main");
        assert_eq!(repo, "https://github.com/acme/widget");
        assert_eq!(subdir, "");
    }
}
