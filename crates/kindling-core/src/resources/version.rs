//! Version comparison between the CLI and a resource set

use semver::Version;

/// Compare the CLI version against the resource set version
///
/// Returns a warning message when the CLI is older than the resource set
/// expects. Unparseable versions are skipped silently - compatibility
/// checking is advisory, never fatal.
pub fn check_compatibility(
    cli_version: &str,
    resource_version: &str,
    upgrade_command: &str,
) -> Option<String> {
    let cli = Version::parse(cli_version).ok()?;
    let resource = Version::parse(resource_version).ok()?;
    if cli < resource {
        Some(format!(
            "This resource set was designed for version {} or newer.\n\
             You are running version {}.\n\
             Consider updating: {}",
            resource_version, cli_version, upgrade_command
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_older_than_resources() {
        let warning = check_compatibility("0.1.0", "0.2.0", "cargo install kindling-cli --force");
        assert!(warning.is_some());
        assert!(warning.unwrap().contains("0.2.0"));
    }

    #[test]
    fn test_cli_same_as_resources() {
        assert!(check_compatibility("0.1.0", "0.1.0", "upgrade").is_none());
    }

    #[test]
    fn test_cli_newer_than_resources() {
        assert!(check_compatibility("0.2.0", "0.1.0", "upgrade").is_none());
    }

    #[test]
    fn test_invalid_versions_skip_the_check() {
        assert!(check_compatibility("invalid", "0.1.0", "upgrade").is_none());
    }
}
