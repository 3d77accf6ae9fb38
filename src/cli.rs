//! CLI: generate registration artifacts | embed a script source
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use luabind_gen::codegen::Form;
use luabind_gen::config::PartialConfig;
use luabind_gen::error::{GenError, Stage};
use luabind_gen::output::{FsSink, write_artifact};
use luabind_gen::profile::ProfileName;
use luabind_gen::{embed, pipeline};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate Lua registration code for a native engine's utility functions and global enums
#[derive(Parser, Debug)]
#[command(name = "luabind-gen", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// regenerate the utility-function and global-enum artifacts
    Generate(GenerateOut),
    /// embed a script source file as a C string constant
    Embed(EmbedOut),
}

#[derive(Args, Debug, Clone)]
struct PolicySettings {
    /// reference source text; functions whose name occurs in it are bound
    #[arg(long, conflicts_with = "map")]
    reference: Option<PathBuf>,

    /// JSON object mapping API names to `true`, a symbol name, or `null`
    #[arg(long)]
    map: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct GenerateOut {
    /// API description (extension_api.json)
    #[arg(long)]
    api: Option<PathBuf>,

    #[command(flatten)]
    policy: PolicySettings,

    /// directory receiving both artifacts (created if missing)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// functions artifact name inside --out-dir
    #[arg(long)]
    functions_file: Option<PathBuf>,

    /// enums artifact name inside --out-dir
    #[arg(long)]
    enums_file: Option<PathBuf>,

    #[arg(long, value_enum)]
    form: Option<Form>,

    #[arg(long, value_enum)]
    profile: Option<ProfileName>,

    /// identifier of the target collection (flat form) or macro parameter
    #[arg(long)]
    target: Option<String>,

    /// class qualifying implementation symbols
    #[arg(long = "class")]
    class_name: Option<String>,

    /// JSON config file; command-line values override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct EmbedOut {
    /// source file to embed
    #[arg(long, short)]
    input: PathBuf,

    /// output header
    #[arg(short, long)]
    out: PathBuf,

    /// C identifier of the constant (derived from the file name if omitted)
    #[arg(long)]
    ident: Option<String>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl GenerateOut {
    fn to_partial(&self) -> PartialConfig {
        PartialConfig {
            api: self.api.clone(),
            reference: self.policy.reference.clone(),
            map: self.policy.map.clone(),
            out_dir: self.out_dir.clone(),
            functions_file: self.functions_file.clone(),
            enums_file: self.enums_file.clone(),
            form: self.form,
            profile: self.profile,
            target: self.target.clone(),
            class: self.class_name.clone(),
        }
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Generate(target) => {
                let mut partial = target.to_partial();
                if let Some(path) = target.config.as_ref() {
                    partial = partial.or(PartialConfig::from_file(path)?);
                }
                let config = partial.resolve()?;

                // debug path
                if target.no_op {
                    eprintln!("{config:#?}");
                    return Ok(());
                }

                let summary = pipeline::run(&config, &FsSink)
                    .context("generation failed; artifacts are only valid after a successful run")?;
                info!(
                    bound = summary.bound_functions,
                    enum_values = summary.enum_values,
                    "wrote {} and {}",
                    summary.functions_path.display(),
                    summary.enums_path.display()
                );
            }
            Command::Embed(target) => {
                let source = std::fs::read(&target.input)
                    .map_err(|err| GenError::io(Stage::Embed, &target.input, err))?;
                let ident = match target.ident.as_ref() {
                    Some(ident) if luabind_gen::schema::is_identifier(ident) => ident.clone(),
                    Some(ident) => {
                        return Err(GenError::config(format!("`{ident}` is not a C identifier")).into());
                    }
                    None => embed::default_ident(&target.input),
                };
                let header = embed::embed_source(&ident, &source);
                write_artifact(&FsSink, &target.out, &header)?;
                info!(ident = %ident, out = %target.out.display(), "embedded source");
            }
        }
        Ok(())
    }
}
