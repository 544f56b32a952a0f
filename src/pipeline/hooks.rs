//! Lifecycle hook chains.
//!
//! The external build pipeline exposes three extension points: before
//! dependency install, before bundling, and after bundling. A [`HookChain`]
//! is the explicit ordered list of steps for each stage, so composition is
//! plain list concatenation and ordering stays independently testable.
//!
//! # Composition Rule
//!
//! Per stage: this crate's injected steps run first, in order, followed by
//! the caller's steps, in order. Caller steps are never dropped or
//! reordered.

use std::path::PathBuf;

use crate::cache::BINARY_NAME;
use crate::error::{Result, SkiffError};

/// The three extension points of the external build pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookStage {
    BeforeInstall,
    BeforeBundling,
    AfterBundling,
}

impl HookStage {
    /// Stage name as used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::BeforeInstall => "before-install",
            Self::BeforeBundling => "before-bundling",
            Self::AfterBundling => "after-bundling",
        }
    }
}

/// One shell-level step in a hook stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookStep {
    /// Copy the resolved runtime binary into the build output as
    /// `bootstrap`.
    InstallBinary { source: PathBuf },
    /// A caller-supplied shell command. `{input}` and `{output}` expand to
    /// the bundling input and output directories at render time.
    Command(String),
}

impl HookStep {
    /// Convenience constructor for caller commands.
    pub fn command(command: impl Into<String>) -> Self {
        Self::Command(command.into())
    }

    /// Render the step to a shell command for the given directories.
    pub fn render(&self, input_dir: &str, output_dir: &str) -> String {
        match self {
            Self::InstallBinary { source } => {
                format!("cp {} {}/{}", source.display(), output_dir, BINARY_NAME)
            }
            Self::Command(command) => command
                .replace("{input}", input_dir)
                .replace("{output}", output_dir),
        }
    }

    fn validate(&self, stage: HookStage) -> Result<()> {
        if let Self::Command(command) = self {
            if command.trim().is_empty() {
                return Err(SkiffError::PipelineComposition {
                    message: format!("empty hook command in {} stage", stage.name()),
                });
            }
        }
        Ok(())
    }
}

/// Ordered hook steps for all three stages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookChain {
    pub before_install: Vec<HookStep>,
    pub before_bundling: Vec<HookStep>,
    pub after_bundling: Vec<HookStep>,
}

impl HookChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the after-bundling steps.
    pub fn with_after_bundling(mut self, steps: Vec<HookStep>) -> Self {
        self.after_bundling = steps;
        self
    }

    /// Builder: set the before-bundling steps.
    pub fn with_before_bundling(mut self, steps: Vec<HookStep>) -> Self {
        self.before_bundling = steps;
        self
    }

    /// Builder: set the before-install steps.
    pub fn with_before_install(mut self, steps: Vec<HookStep>) -> Self {
        self.before_install = steps;
        self
    }

    /// The steps for one stage.
    pub fn stage(&self, stage: HookStage) -> &[HookStep] {
        match stage {
            HookStage::BeforeInstall => &self.before_install,
            HookStage::BeforeBundling => &self.before_bundling,
            HookStage::AfterBundling => &self.after_bundling,
        }
    }

    /// Compose this chain (injected steps) with a caller's chain: per
    /// stage, self's steps followed by the caller's.
    pub fn compose(&self, caller: &HookChain) -> HookChain {
        let join = |ours: &[HookStep], theirs: &[HookStep]| {
            let mut steps = ours.to_vec();
            steps.extend_from_slice(theirs);
            steps
        };
        HookChain {
            before_install: join(&self.before_install, &caller.before_install),
            before_bundling: join(&self.before_bundling, &caller.before_bundling),
            after_bundling: join(&self.after_bundling, &caller.after_bundling),
        }
    }

    /// Render one stage to shell commands.
    pub fn render_stage(&self, stage: HookStage, input_dir: &str, output_dir: &str) -> Vec<String> {
        self.stage(stage)
            .iter()
            .map(|step| step.render(input_dir, output_dir))
            .collect()
    }

    /// Reject malformed steps before composition.
    pub fn validate(&self) -> Result<()> {
        for stage in [
            HookStage::BeforeInstall,
            HookStage::BeforeBundling,
            HookStage::AfterBundling,
        ] {
            for step in self.stage(stage) {
                step.validate(stage)?;
            }
        }
        Ok(())
    }

    /// Whether every stage is empty.
    pub fn is_empty(&self) -> bool {
        self.before_install.is_empty()
            && self.before_bundling.is_empty()
            && self.after_bundling.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn compose_puts_injected_steps_first() {
        let injected = HookChain::new().with_after_bundling(vec![HookStep::InstallBinary {
            source: PathBuf::from("/cache/bootstrap"),
        }]);
        let caller = HookChain::new()
            .with_after_bundling(vec![HookStep::command("cp {input}/schema.sql {output}/")]);

        let composed = injected.compose(&caller);

        assert_eq!(
            composed.after_bundling,
            vec![
                HookStep::InstallBinary {
                    source: PathBuf::from("/cache/bootstrap"),
                },
                HookStep::command("cp {input}/schema.sql {output}/"),
            ]
        );
    }

    #[test]
    fn compose_preserves_caller_order_per_stage() {
        let caller = HookChain::new()
            .with_before_install(vec![HookStep::command("one"), HookStep::command("two")])
            .with_before_bundling(vec![HookStep::command("three")]);

        let composed = HookChain::new().compose(&caller);

        assert_eq!(
            composed.before_install,
            vec![HookStep::command("one"), HookStep::command("two")]
        );
        assert_eq!(composed.before_bundling, vec![HookStep::command("three")]);
        assert!(composed.after_bundling.is_empty());
    }

    #[test]
    fn render_install_step_copies_into_output() {
        let step = HookStep::InstallBinary {
            source: Path::new("/cache/latest/x64/standard/bootstrap").to_path_buf(),
        };
        assert_eq!(
            step.render("/in", "/out"),
            "cp /cache/latest/x64/standard/bootstrap /out/bootstrap"
        );
    }

    #[test]
    fn render_expands_directory_placeholders() {
        let step = HookStep::command("cp {input}/native.node {output}/");
        assert_eq!(step.render("/in", "/out"), "cp /in/native.node /out/");
    }

    #[test]
    fn render_leaves_plain_commands_alone() {
        let step = HookStep::command("echo done");
        assert_eq!(step.render("/in", "/out"), "echo done");
    }

    #[test]
    fn render_stage_renders_in_order() {
        let chain = HookChain::new().with_after_bundling(vec![
            HookStep::InstallBinary {
                source: PathBuf::from("/b/bootstrap"),
            },
            HookStep::command("strip {output}/bootstrap"),
        ]);

        let commands = chain.render_stage(HookStage::AfterBundling, "/in", "/out");

        assert_eq!(
            commands,
            vec![
                "cp /b/bootstrap /out/bootstrap".to_string(),
                "strip /out/bootstrap".to_string(),
            ]
        );
    }

    #[test]
    fn validate_rejects_blank_commands() {
        let chain = HookChain::new().with_before_bundling(vec![HookStep::command("   ")]);

        let err = chain.validate().unwrap_err();
        assert!(err.to_string().contains("before-bundling"));
    }

    #[test]
    fn validate_accepts_install_steps_and_commands() {
        let chain = HookChain::new()
            .with_after_bundling(vec![
                HookStep::InstallBinary {
                    source: PathBuf::from("/b"),
                },
                HookStep::command("echo ok"),
            ])
            .with_before_install(vec![HookStep::command("npm ci")]);

        assert!(chain.validate().is_ok());
    }

    #[test]
    fn empty_chain_is_empty() {
        assert!(HookChain::new().is_empty());
        assert!(!HookChain::new()
            .with_before_install(vec![HookStep::command("x")])
            .is_empty());
    }
}
