//! CLI route: single route table and run context. Dispatches to strategies and presentation.

use crate::cli::help::command_name;
use crate::cli::parse::{CauseArg, Commands, EvaluateArgs};
use crate::cli::presentation::{
    format_decision, format_explanation, format_regex_check, format_strategy_list_json,
    format_strategy_list_text, format_validation_result,
};
use crate::config::{ConfigLoader, StrategiesConfig};
use crate::listener::{RecordingListener, TaskListener, TracingListener};
use crate::scm::{
    Cause, ChangeRequestRevision, CheckoutStrategy, Head, Revision, ScmSource, TrustError,
};
use crate::strategy::{BranchBuildStrategy, BuildContext, FormValidation, RegexNameFilter};
use anyhow::{bail, Context};
use chrono::{Duration, Utc};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// Runtime context for CLI execution: workspace, config path, and the loaded configuration.
pub struct RunContext {
    workspace_root: PathBuf,
    config_path: Option<PathBuf>,
    config: StrategiesConfig,
    color: bool,
}

impl RunContext {
    /// Create run context from workspace root and optional config path. Uses ConfigLoader only.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> anyhow::Result<Self> {
        let config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
            None => ConfigLoader::load(&workspace_root).with_context(|| {
                format!(
                    "Failed to load configuration for workspace {}",
                    workspace_root.display()
                )
            })?,
        };
        Ok(Self::with_config(workspace_root, config_path, config)
            .with_color(std::io::stdout().is_terminal()))
    }

    pub fn with_config(
        workspace_root: PathBuf,
        config_path: Option<PathBuf>,
        config: StrategiesConfig,
    ) -> Self {
        Self {
            workspace_root,
            config_path,
            config,
            color: false,
        }
    }

    /// Color decisions in `evaluate` output.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn config(&self) -> &StrategiesConfig {
        &self.config
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> anyhow::Result<String> {
        let started = Instant::now();
        let result = match command {
            Commands::Evaluate(args) => self.evaluate(args),
            Commands::List { format } => self.list(format),
            Commands::Validate => self.validate(),
            Commands::CheckRegex { pattern } => check_regex(pattern),
        };
        info!(
            command = command_name(command),
            workspace = %self.workspace_root.display(),
            config = ?self.config_path,
            ok = result.is_ok(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    fn evaluate(&self, args: &EvaluateArgs) -> anyhow::Result<String> {
        let now = Utc::now();
        let head = describe_head(args, now)?;
        let checkout = if args.merge {
            CheckoutStrategy::Merge
        } else {
            CheckoutStrategy::Head
        };
        let revision_at = |hash: &str, target_hash: &str| -> Revision {
            match head.target() {
                Some(target) => ChangeRequestRevision::new(
                    &head,
                    Revision::plain(target, target_hash),
                    hash,
                    checkout,
                )
                .into(),
                None => Revision::plain(&head, hash),
            }
        };

        let current = revision_at(&args.revision, &args.target_revision);
        let last_built = args.last_built.as_deref().map(|hash| {
            revision_at(
                hash,
                args.last_built_target
                    .as_deref()
                    .unwrap_or(&args.target_revision),
            )
        });
        let last_seen = args
            .last_seen
            .as_deref()
            .map(|hash| revision_at(hash, &args.target_revision));
        let causes: Vec<Cause> = args
            .cause
            .iter()
            .map(|cause| match cause {
                CauseArg::User => Cause::UserId {
                    user_id: args.user.clone(),
                },
                CauseArg::Indexing => Cause::BranchIndexing,
                CauseArg::Other => Cause::Other("Started from the command line".to_string()),
            })
            .collect();

        let source = CliSource {
            trusted: !args.untrusted,
        };
        let recording = RecordingListener::new();
        let listener: &dyn TaskListener = if args.explain {
            &recording
        } else {
            &TracingListener
        };
        let ctx = BuildContext::new(&source, &head, &current)
            .with_last_built(last_built.as_ref())
            .with_last_seen(last_seen.as_ref())
            .with_causes(&causes)
            .with_listener(listener)
            .at(now);

        let strategy = self.config.strategy();
        let decision = strategy.is_automatic_build(&ctx);
        info!(head = %head, revision = %current, decision, "Evaluated configured strategies");

        let mut out = format_decision(decision, self.color);
        if args.explain {
            out.push('\n');
            out.push_str(&format_explanation(&recording.lines()));
        }
        Ok(out)
    }

    fn list(&self, format: &str) -> anyhow::Result<String> {
        match format {
            "text" => Ok(format_strategy_list_text(&self.config.strategies)),
            "json" => format_strategy_list_json(&self.config.strategies)
                .context("Failed to serialize strategy list"),
            other => bail!("Unsupported format '{}' (expected 'text' or 'json')", other),
        }
    }

    fn validate(&self) -> anyhow::Result<String> {
        let result = self.config.validate();
        let text = format_validation_result(&result);
        match result {
            Ok(()) => Ok(text),
            Err(_) => bail!(text.trim_end().to_string()),
        }
    }
}

fn check_regex(pattern: &str) -> anyhow::Result<String> {
    let validation = RegexNameFilter::check_regex(pattern);
    let text = format_regex_check(pattern, &validation);
    match validation {
        FormValidation::Ok => Ok(text),
        FormValidation::Error(_) => bail!(text),
    }
}

fn describe_head(args: &EvaluateArgs, now: chrono::DateTime<Utc>) -> anyhow::Result<Head> {
    if let Some(name) = &args.branch {
        return Ok(Head::branch(name));
    }
    if let Some(name) = &args.tag {
        let age = Duration::try_days(args.tag_age_days)
            .with_context(|| format!("Tag age of {} days is out of range", args.tag_age_days))?;
        let created = now
            .checked_sub_signed(age)
            .with_context(|| format!("Tag age of {} days is out of range", args.tag_age_days))?;
        return Ok(Head::tag(name, created));
    }
    if let Some(id) = &args.change_request {
        return Ok(Head::change_request(id, Head::branch(&args.target)));
    }
    bail!("One of --branch, --tag or --change-request is required")
}

/// Source backing the CLI: trusts everything unless told the author is untrusted, in which
/// case a change request's trusted content is its target.
struct CliSource {
    trusted: bool,
}

impl ScmSource for CliSource {
    fn id(&self) -> &str {
        "cli"
    }

    fn trusted_revision(
        &self,
        revision: &Revision,
        _listener: &dyn TaskListener,
    ) -> Result<Revision, TrustError> {
        match revision.as_change_request() {
            Some(cr) if !self.trusted => Ok((*cr.target).clone()),
            _ => Ok(revision.clone()),
        }
    }
}
