use crate::config::{OverrideConfig, OverrideContext};

/// User arguments for one execution context, resolved from the nearest
/// override file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunnerArgs {
    /// Rendered override records, empty when none are configured
    pub extra: Vec<String>,
    /// `KEY=value` pairs prefixed to every command
    pub env: Vec<(String, String)>,
}

impl RunnerArgs {
    pub fn resolve(overrides: Option<&OverrideConfig>, context: OverrideContext) -> Self {
        match overrides {
            Some(config) => Self {
                extra: config.rendered(context),
                env: config.env_vars(),
            },
            None => Self::default(),
        }
    }

    /// Configured arguments, or `defaults` when nothing is configured
    pub fn extra_or(&self, defaults: &[&str]) -> Vec<String> {
        if self.extra.is_empty() {
            defaults.iter().map(|s| s.to_string()).collect()
        } else {
            self.extra.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CommandArg;

    #[test]
    fn test_override_replaces_defaults() {
        let config = OverrideConfig {
            test: vec![CommandArg::flag("nocapture")],
            env: Some("RUST_LOG=trace".to_string()),
            ..Default::default()
        };

        let test_args = RunnerArgs::resolve(Some(&config), OverrideContext::Test);
        assert_eq!(test_args.extra_or(&["--exact", "--nocapture"]), vec!["--nocapture"]);
        assert_eq!(test_args.env, vec![("RUST_LOG".to_string(), "trace".to_string())]);

        let run_args = RunnerArgs::resolve(Some(&config), OverrideContext::Run);
        assert!(run_args.extra.is_empty());
        assert_eq!(run_args.extra_or(&["--release"]), vec!["--release"]);
        assert_eq!(RunnerArgs::resolve(None, OverrideContext::Bench), RunnerArgs::default());
    }
}
