//! Docker Hub publishing plan.

use crate::config::StackConfig;
use crate::sequence::Step;

use super::build_argv;

/// Build the image publishing plan.
///
/// `docker login` and `docker push` run in the foreground: login so the
/// credential prompt reaches the operator, push so layer progress does.
pub fn publish_plan(config: &StackConfig) -> Vec<Step> {
    let registry = &config.registry;
    let remote = registry.remote_image();

    vec![
        Step::new("check-daemon", build_argv(&config.tools.docker, &["ps"]))
            .title("Checking Docker daemon"),
        Step::new(
            "check-image",
            build_argv(
                &config.tools.docker,
                &["image", "inspect", registry.local_image.as_str()],
            ),
        )
        .title("Checking local image"),
        Step::new("login", build_argv(&config.tools.docker, &["login"]))
            .title("Logging in to Docker Hub")
            .streamed(),
        Step::new(
            "tag-image",
            build_argv(
                &config.tools.docker,
                &["tag", registry.local_image.as_str(), remote.as_str()],
            ),
        )
        .title("Tagging image"),
        Step::new(
            "push-image",
            build_argv(&config.tools.docker, &["push", remote.as_str()]),
        )
        .title("Pushing image to Docker Hub")
        .streamed(),
    ]
}
