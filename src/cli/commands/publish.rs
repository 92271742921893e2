//! Publish command implementation.
//!
//! `quizctl publish` tags the locally built backend image and pushes it to
//! Docker Hub. The push is confirmed interactively unless `--yes` is given.

use crate::cli::args::PublishArgs;
use crate::config::StackConfig;
use crate::error::Result;
use crate::sequence::run_plan;
use crate::stack::registry;
use crate::ui::{can_prompt, confirm, Reporter};

use super::dispatcher::{Command, CommandResult, PRECONDITION_EXIT};
use super::panels;

/// The publish command implementation.
pub struct PublishCommand {
    config: StackConfig,
    args: PublishArgs,
}

impl PublishCommand {
    /// Create a new publish command.
    pub fn new(mut config: StackConfig, args: PublishArgs) -> Self {
        let registry = &mut config.registry;
        if let Some(user) = &args.user {
            registry.user = user.clone();
        }
        if let Some(repo) = &args.repo {
            registry.repository = repo.clone();
        }
        if let Some(tag) = &args.tag {
            registry.tag = tag.clone();
        }
        if let Some(image) = &args.image {
            registry.local_image = image.clone();
        }
        Self { config, args }
    }

    fn confirmed(&self, reporter: &mut dyn Reporter) -> Result<Option<CommandResult>> {
        if self.args.yes {
            return Ok(None);
        }
        if !can_prompt() {
            reporter.error("Refusing to push without confirmation (use --yes)");
            return Ok(Some(CommandResult::failure(PRECONDITION_EXIT)));
        }
        if confirm("Continue with the push?", false)? {
            Ok(None)
        } else {
            reporter.message("Push cancelled");
            Ok(Some(CommandResult::success()))
        }
    }
}

impl Command for PublishCommand {
    fn execute(&self, reporter: &mut dyn Reporter) -> Result<CommandResult> {
        let registry = &self.config.registry;

        reporter.header("Publishing to Docker Hub");
        reporter.key_value("Docker Hub user", &registry.user);
        reporter.key_value("Local image", &registry.local_image);
        reporter.key_value("Remote image", &registry.remote_image());

        if let Some(result) = self.confirmed(reporter)? {
            return Ok(result);
        }

        let plan = registry::publish_plan(&self.config);
        let outcome = run_plan(&plan, reporter);

        match outcome.halted_at().map(|failed| failed.name.as_str()) {
            Some("check-image") => {
                reporter.info(&format!(
                    "Image '{}' is missing. Build it first: quizctl up",
                    registry.local_image
                ));
            }
            Some("login") => {
                reporter.info("Login failed. Check your Docker Hub credentials");
            }
            _ => {}
        }

        if outcome.success() {
            reporter.message("");
            reporter.key_value("Published", &registry.hub_url());
            reporter.key_value("Pull with", &format!("docker pull {}", registry.remote_image()));
        }

        Ok(panels::finish_run(reporter, &outcome, "Image published"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::ui::RecordingReporter;

    #[test]
    fn tag_flag_overrides_the_configured_tag() {
        let args = PublishArgs {
            yes: true,
            tag: Some("v1.2.0".to_string()),
            ..Default::default()
        };
        let cmd = PublishCommand::new(StackConfig::new("/srv/app"), args);

        assert_eq!(cmd.config.registry.tag, "v1.2.0");
        assert_eq!(
            cmd.config.registry.remote_image(),
            "gm1026/intelliquiz-backend:v1.2.0"
        );
    }

    #[test]
    fn registry_flags_override_every_coordinate() {
        let args = PublishArgs {
            yes: true,
            user: Some("acme".to_string()),
            repo: Some("quiz-api".to_string()),
            tag: Some("v2".to_string()),
            image: Some("quiz-api:dev".to_string()),
        };
        let cmd = PublishCommand::new(StackConfig::new("/srv/app"), args);

        assert_eq!(cmd.config.registry.remote_image(), "acme/quiz-api:v2");
        assert_eq!(cmd.config.registry.local_image, "quiz-api:dev");
        assert_eq!(
            cmd.config.registry.hub_url(),
            "https://hub.docker.com/r/acme/quiz-api"
        );
    }

    #[test]
    fn non_interactive_push_requires_yes() {
        // Test processes have no TTY, so the prompt path refuses.
        let cmd = PublishCommand::new(StackConfig::new("/srv/app"), PublishArgs::default());

        let mut reporter = RecordingReporter::new();
        let result = cmd.execute(&mut reporter).unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, PRECONDITION_EXIT);
        assert!(reporter.has_error("--yes"));
    }

    #[test]
    fn header_panel_shows_the_image_mapping() {
        let cmd = PublishCommand::new(StackConfig::new("/srv/app"), PublishArgs::default());

        let mut reporter = RecordingReporter::new();
        cmd.execute(&mut reporter).unwrap();

        assert!(reporter.has_line("Local image: project-cache-in-backend:latest"));
        assert!(reporter.has_line("Remote image: gm1026/intelliquiz-backend:latest"));
    }
}
