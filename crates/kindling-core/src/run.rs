//! The end-to-end run: setup, resources, interview, build, deploy, install

use crate::console::{Console, Tone};
use crate::error::{Error, Result};
use crate::installer::Installer;
use crate::questions::walk;
use crate::resources::{self, check_compatibility, ResourceFetcher, ResourceSource};
use crate::session::Session;
use crate::staging;
use crate::structure::build;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Product identity and remote endpoints baked into the binary
#[derive(Debug, Clone)]
pub struct Profile {
    /// Display name used in the welcome and sign-off messages
    pub display_name: &'static str,

    /// Default URL serving the requirement documents
    pub resource_url: &'static str,

    /// Environment variable overriding the resource URL
    pub resource_url_env: &'static str,

    /// Default URL serving downloadable skeleton files
    pub asset_url: &'static str,

    /// Environment variable overriding the asset URL
    pub asset_url_env: &'static str,

    /// User agent string for HTTP requests
    pub user_agent: &'static str,

    /// Upgrade command shown in version warnings
    pub upgrade_command: &'static str,

    /// Name of the staging directory created below the target
    pub staging_dir_name: &'static str,

    /// Package manager invoked after deployment
    pub install_program: &'static str,
}

/// CLI-provided options for one run
#[derive(Debug, Clone, Default)]
pub struct RunArgs {
    /// Directory the generated site lands in
    pub target: PathBuf,

    /// Local directory serving the requirement documents (with an
    /// `assets/` subdirectory for downloads) instead of the remote roots
    pub resources_dir: Option<PathBuf>,

    /// Remote resource root override
    pub resource_url: Option<String>,

    /// Remote asset root override
    pub asset_url: Option<String>,

    /// Extra arguments appended to the install command
    pub install_args: Vec<String>,

    /// Skip the dependency install step
    pub skip_install: bool,
}

/// Run the whole ignition sequence
///
/// Staging cleanup always runs afterwards; a cleanup failure is reported
/// but never replaces an error from the sequence itself.
pub async fn run(
    profile: &Profile,
    args: RunArgs,
    cli_version: &str,
    console: &dyn Console,
) -> Result<()> {
    console.say(Tone::Success, &format!("\n{}\n", profile.display_name));

    let staging = args.target.join(profile.staging_dir_name);
    let result = sequence(profile, &args, cli_version, &staging, console).await;
    if let Err(err) = &result {
        console.say(Tone::Error, &format!("An error has occurred: {}", err));
    }

    console.say(Tone::Info, "Cleaning up staging area...");
    match (result, staging::cleanup(&staging).await) {
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(cleanup_err)) => {
            console.say(Tone::Error, &cleanup_err.to_string());
            Err(err)
        }
        (Ok(()), Err(cleanup_err)) => Err(cleanup_err),
        (Ok(()), Ok(())) => {
            console.say(
                Tone::Success,
                &format!(
                    "\n{} is done. Your site is ready to design and populate.\n",
                    profile.display_name
                ),
            );
            Ok(())
        }
    }
}

async fn sequence(
    profile: &Profile,
    args: &RunArgs,
    cli_version: &str,
    staging: &Path,
    console: &dyn Console,
) -> Result<()> {
    // Set up the file system.
    console.say(Tone::Info, "Setting up file system...");
    fs::create_dir_all(&args.target).await.map_err(|err| {
        Error::Resource(format!(
            "cannot create target directory \"{}\": {}",
            args.target.display(),
            err
        ))
    })?;
    staging::prepare(staging).await?;

    // Fetch the requirement documents.
    console.say(Tone::Info, "Downloading resources...");
    let (resource_source, asset_source) = resolve_sources(profile, args)?;
    let fetcher = ResourceFetcher::new(resource_source, profile.user_agent);
    let requirements = resources::load(&fetcher).await?;
    if let Some(warning) = check_compatibility(
        cli_version,
        &requirements.manifest.version,
        profile.upgrade_command,
    ) {
        console.say(Tone::Error, &warning);
    }
    console.say(Tone::Success, "Requirements fulfilled");

    // The interview.
    console.say(
        Tone::Info,
        "Please answer the following questions to customise your website. \
         You can accept the defaults for many of the questions if you wish.",
    );
    let mut session = Session::new(requirements.structure, requirements.data);
    walk(&requirements.questions, &mut session, console)?;
    console.say(Tone::Success, "All questions answered");

    // Build the skeleton in the staging area.
    console.say(
        Tone::Info,
        &format!(
            "Building the file system structure in the staging area at \"{}\"...",
            staging.display()
        ),
    );
    let assets = ResourceFetcher::new(asset_source, profile.user_agent);
    build(&session.structure, &session.data, staging, &assets, console).await?;
    console.say(Tone::Success, "File system structure created");

    // Move everything into place.
    console.say(
        Tone::Info,
        &format!(
            "Deploying file system structure to \"{}\"...",
            args.target.display()
        ),
    );
    staging::deploy(staging, &args.target).await?;
    console.say(Tone::Success, "File system structure deployed");

    // Install dependencies.
    if args.skip_install {
        console.say(Tone::Info, "Skipping dependency install");
    } else {
        let installer = Installer::new(profile.install_program, &args.target, &args.install_args);
        console.say(
            Tone::Info,
            &format!("Processing dependencies: {}", installer.command_line()),
        );
        installer.install().await?;
        console.say(Tone::Success, "Dependencies installed");
    }

    Ok(())
}

/// Resolve the resource and asset roots: local directory first, then URL
/// flag, then environment override, then the profile default
fn resolve_sources(
    profile: &Profile,
    args: &RunArgs,
) -> Result<(ResourceSource, ResourceSource)> {
    if let Some(dir) = &args.resources_dir {
        return Ok((
            ResourceSource::local(dir.clone()),
            ResourceSource::local(dir.join("assets")),
        ));
    }
    let resource_url = args
        .resource_url
        .clone()
        .or_else(|| std::env::var(profile.resource_url_env).ok())
        .unwrap_or_else(|| profile.resource_url.to_string());
    let asset_url = args
        .asset_url
        .clone()
        .or_else(|| std::env::var(profile.asset_url_env).ok())
        .unwrap_or_else(|| profile.asset_url.to_string());
    Ok((
        ResourceSource::remote(&resource_url)?,
        ResourceSource::remote(&asset_url)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::scripted::ScriptedConsole;
    use std::fs as std_fs;
    use std::path::Path;

    fn profile() -> Profile {
        Profile {
            display_name: "Kindling",
            resource_url: "https://example.com/resources",
            resource_url_env: "KINDLING_TEST_RESOURCE_URL",
            asset_url: "https://example.com/assets",
            asset_url_env: "KINDLING_TEST_ASSET_URL",
            user_agent: "kindling-test",
            upgrade_command: "cargo install kindling-cli --force",
            staging_dir_name: ".kindling-staging",
            install_program: "composer",
        }
    }

    fn write_resources(dir: &Path) {
        std_fs::write(
            dir.join("manifest.yaml"),
            "version: 0.1.0\nrequirements:\n  - questions\n  - structure\n  - data\n",
        )
        .unwrap();
        std_fs::write(
            dir.join("questions.yaml"),
            r#"
- question: Please enter a site id
  type: string
  required: true
  actions:
    - type: data
      name: configuration.json
      key: site.id
- question: Will you be running on Apache?
  type: boolean
  default: "no"
  actions:
    - type: structure
      path: public
      value:
        name: .htaccess
        type: download
        src: htaccess
"#,
        )
        .unwrap();
        std_fs::write(
            dir.join("structure.yaml"),
            r#"
- name: config
  type: directory
  contents:
    - name: configuration.json
      type: json
- name: public
  type: directory
"#,
        )
        .unwrap();
        std_fs::write(dir.join("data.yaml"), "configuration.json: {}\n").unwrap();
        std_fs::create_dir(dir.join("assets")).unwrap();
        std_fs::write(dir.join("assets/htaccess"), b"RewriteEngine On\n").unwrap();
    }

    fn args(resources: &Path, target: &Path) -> RunArgs {
        RunArgs {
            target: target.to_path_buf(),
            resources_dir: Some(resources.to_path_buf()),
            skip_install: true,
            ..RunArgs::default()
        }
    }

    #[tokio::test]
    async fn test_run_generates_a_site_from_local_resources() {
        let resources = tempfile::tempdir().unwrap();
        write_resources(resources.path());
        let target = tempfile::tempdir().unwrap();
        let target_dir = target.path().join("site");

        let console = ScriptedConsole::new(&["my-site", "yes"]);
        run(
            &profile(),
            args(resources.path(), &target_dir),
            "0.1.0",
            &console,
        )
        .await
        .unwrap();

        let config =
            std_fs::read_to_string(target_dir.join("config/configuration.json")).unwrap();
        assert!(config.contains("\"id\": \"my-site\""));
        let htaccess = std_fs::read_to_string(target_dir.join("public/.htaccess")).unwrap();
        assert_eq!(htaccess, "RewriteEngine On\n");
        assert!(!target_dir.join(".kindling-staging").exists());

        let names: Vec<String> = walkdir::WalkDir::new(&target_dir)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        assert!(names.contains(&"configuration.json".to_string()));
        assert!(names.contains(&".htaccess".to_string()));
    }

    #[tokio::test]
    async fn test_run_declining_apache_leaves_public_empty() {
        let resources = tempfile::tempdir().unwrap();
        write_resources(resources.path());
        let target = tempfile::tempdir().unwrap();
        let target_dir = target.path().join("site");

        let console = ScriptedConsole::new(&["my-site", ""]);
        run(
            &profile(),
            args(resources.path(), &target_dir),
            "0.1.0",
            &console,
        )
        .await
        .unwrap();

        assert!(target_dir.join("public").is_dir());
        assert!(!target_dir.join("public/.htaccess").exists());
    }

    #[tokio::test]
    async fn test_run_reports_broken_resource_sets() {
        let resources = tempfile::tempdir().unwrap();
        write_resources(resources.path());
        std_fs::remove_file(resources.path().join("data.yaml")).unwrap();
        let target = tempfile::tempdir().unwrap();
        let target_dir = target.path().join("site");

        let console = ScriptedConsole::new(&[]);
        let result = run(
            &profile(),
            args(resources.path(), &target_dir),
            "0.1.0",
            &console,
        )
        .await;

        assert!(matches!(result, Err(Error::Resource(_))));
        assert!(console.saw("An error has occurred"));
        // The failed run leaves no staging directory behind.
        assert!(!target_dir.join(".kindling-staging").exists());
    }

    #[tokio::test]
    async fn test_run_warns_when_the_cli_is_outdated() {
        let resources = tempfile::tempdir().unwrap();
        write_resources(resources.path());
        std_fs::write(
            resources.path().join("manifest.yaml"),
            "version: 9.0.0\nrequirements:\n  - questions\n  - structure\n  - data\n",
        )
        .unwrap();
        let target = tempfile::tempdir().unwrap();
        let target_dir = target.path().join("site");

        let console = ScriptedConsole::new(&["my-site", ""]);
        run(
            &profile(),
            args(resources.path(), &target_dir),
            "0.1.0",
            &console,
        )
        .await
        .unwrap();

        assert!(console.saw("designed for version 9.0.0"));
    }
}
