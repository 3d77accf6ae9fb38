//! Generator configuration: command-line values layered over an optional
//! JSON config file. Command-line values win.
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::codegen::{DEFAULT_TARGET, Form};
use crate::error::{GenError, Stage};
use crate::path_de;
use crate::profile::{DEFAULT_CLASS, Profile, ProfileName};
use crate::schema;

pub const DEFAULT_FUNCTIONS_FILE: &str = "utility_functions.hpp";
pub const DEFAULT_ENUMS_FILE: &str = "global_enums.hpp";

/// Where the active resolution policy gets its context from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicySource {
    ReferenceText(PathBuf),
    ExplicitMap(PathBuf),
}

/// Every field optional; used both for the config file and for the values
/// given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct PartialConfig {
    pub api: Option<PathBuf>,
    pub reference: Option<PathBuf>,
    pub map: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub functions_file: Option<PathBuf>,
    pub enums_file: Option<PathBuf>,
    pub form: Option<Form>,
    pub profile: Option<ProfileName>,
    pub target: Option<String>,
    pub class: Option<String>,
}

impl PartialConfig {
    /// Read a config file. Relative paths inside it are taken relative to
    /// the file's own directory.
    pub fn from_file(path: &Path) -> Result<Self, GenError> {
        let bytes = std::fs::read(path).map_err(|err| GenError::io(Stage::Config, path, err))?;
        let cfg = path_de::from_slice_with_path::<PartialConfig>(&bytes)
            .map_err(|err| GenError::config(format!("{}: {err}", path.display())))?;
        let base = path.parent().unwrap_or(Path::new(""));
        Ok(cfg.rebased(base))
    }

    fn rebased(self, base: &Path) -> Self {
        let rebase = |p: Option<PathBuf>| p.map(|p| if p.is_absolute() { p } else { base.join(p) });
        PartialConfig {
            api: rebase(self.api),
            reference: rebase(self.reference),
            map: rebase(self.map),
            out_dir: rebase(self.out_dir),
            // artifact names stay relative to out_dir
            functions_file: self.functions_file,
            enums_file: self.enums_file,
            ..self
        }
    }

    /// Fill every unset field of `self` from `fallback`.
    pub fn or(self, fallback: PartialConfig) -> Self {
        // a policy given on one layer replaces the other layer's policy wholesale
        let (reference, map) = if self.reference.is_some() || self.map.is_some() {
            (self.reference, self.map)
        } else {
            (fallback.reference, fallback.map)
        };
        PartialConfig {
            api: self.api.or(fallback.api),
            reference,
            map,
            out_dir: self.out_dir.or(fallback.out_dir),
            functions_file: self.functions_file.or(fallback.functions_file),
            enums_file: self.enums_file.or(fallback.enums_file),
            form: self.form.or(fallback.form),
            profile: self.profile.or(fallback.profile),
            target: self.target.or(fallback.target),
            class: self.class.or(fallback.class),
        }
    }

    pub fn resolve(self) -> Result<GeneratorConfig, GenError> {
        let api = self.api.ok_or_else(|| GenError::config("no API description given (--api)"))?;
        let policy = match (self.reference, self.map) {
            (Some(reference), None) => PolicySource::ReferenceText(reference),
            (None, Some(map)) => PolicySource::ExplicitMap(map),
            (Some(_), Some(_)) => {
                return Err(GenError::config("--reference and --map are mutually exclusive"));
            }
            (None, None) => {
                return Err(GenError::config("no resolution policy given (--reference or --map)"));
            }
        };
        let out_dir = self.out_dir.ok_or_else(|| GenError::config("no output directory given (--out-dir)"))?;
        let class = self.class.unwrap_or_else(|| DEFAULT_CLASS.to_owned());
        if !schema::is_qualified_name(&class) {
            return Err(GenError::config(format!("class `{class}` is not a valid C++ name")));
        }
        let form = self.form.unwrap_or_default();
        // parameterized output needs block comments; pick the profile that has them
        let profile = self.profile.unwrap_or(match form {
            Form::Flat => ProfileName::Internal,
            Form::Parameterized => ProfileName::Variadic,
        });
        let functions_path = out_dir.join(self.functions_file.unwrap_or_else(|| DEFAULT_FUNCTIONS_FILE.into()));
        let enums_path = out_dir.join(self.enums_file.unwrap_or_else(|| DEFAULT_ENUMS_FILE.into()));
        // the second write would replace the first artifact
        if functions_path == enums_path {
            return Err(GenError::config(format!(
                "functions and enums artifacts resolve to the same path `{}`",
                functions_path.display()
            )));
        }
        Ok(GeneratorConfig {
            api,
            policy,
            functions_path,
            enums_path,
            form,
            profile: Profile::named(profile).with_class(class),
            target: self.target.unwrap_or_else(|| DEFAULT_TARGET.to_owned()),
        })
    }
}

/// Fully resolved settings of one generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub api: PathBuf,
    pub policy: PolicySource,
    pub functions_path: PathBuf,
    pub enums_path: PathBuf,
    pub form: Form,
    pub profile: Profile,
    pub target: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> PartialConfig {
        PartialConfig {
            api: Some("extension_api.json".into()),
            reference: Some("utility_functions.hpp".into()),
            out_dir: Some("src/generated".into()),
            ..PartialConfig::default()
        }
    }

    #[test]
    fn defaults_fill_the_rest() {
        let cfg = base().resolve().unwrap();
        assert_eq!(cfg.policy, PolicySource::ReferenceText("utility_functions.hpp".into()));
        assert_eq!(cfg.functions_path, PathBuf::from("src/generated/utility_functions.hpp"));
        assert_eq!(cfg.enums_path, PathBuf::from("src/generated/global_enums.hpp"));
        assert_eq!(cfg.form, Form::Flat);
        assert_eq!(cfg.profile, Profile::internal());
        assert_eq!(cfg.target, "state");
    }

    #[test]
    fn parameterized_defaults_to_block_comment_profile() {
        let cfg = PartialConfig { form: Some(Form::Parameterized), ..base() }.resolve().unwrap();
        assert_eq!(cfg.profile, Profile::variadic());
    }

    #[test]
    fn command_line_wins_and_policy_layers_do_not_mix() {
        let cli = PartialConfig {
            map: Some("bindings.json".into()),
            target: Some("lua".into()),
            ..PartialConfig::default()
        };
        let cfg = cli.or(base()).resolve().unwrap();
        assert_eq!(cfg.policy, PolicySource::ExplicitMap("bindings.json".into()));
        assert_eq!(cfg.target, "lua");
        assert_eq!(cfg.api, PathBuf::from("extension_api.json"));
    }

    #[test]
    fn missing_or_conflicting_policy_is_a_config_error() {
        let none = PartialConfig { reference: None, ..base() };
        assert_eq!(none.resolve().unwrap_err().stage(), Stage::Config);
        let both = PartialConfig { map: Some("m.json".into()), ..base() };
        assert!(both.resolve().is_err());
    }

    #[test]
    fn artifacts_must_not_share_a_path() {
        let same = PartialConfig {
            functions_file: Some("bindings.hpp".into()),
            enums_file: Some("bindings.hpp".into()),
            ..base()
        };
        let err = same.resolve().unwrap_err();
        assert_eq!(err.stage(), Stage::Config);
        assert!(err.to_string().contains("same path"), "{err}");

        // the default enums name collides just the same
        let shadowed = PartialConfig { functions_file: Some("global_enums.hpp".into()), ..base() };
        assert!(shadowed.resolve().is_err());
    }

    #[test]
    fn class_must_be_a_qualified_cpp_name() {
        let nested = PartialConfig { class: Some("godot::UtilityFunctions".into()), ..base() };
        assert_eq!(nested.resolve().unwrap().profile.class_name, "godot::UtilityFunctions");
        for bad in ["a,b", "Variant.Type", "a::"] {
            let cfg = PartialConfig { class: Some(bad.into()), ..base() };
            assert_eq!(cfg.resolve().unwrap_err().stage(), Stage::Config, "{bad}");
        }
    }

    #[test]
    fn config_file_paths_are_relative_to_the_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("luabind.json");
        std::fs::write(
            &path,
            r#"{"api": "api/extension_api.json", "map": "bindings.json", "out_dir": "gen", "form": "parameterized", "profile": "variadic"}"#,
        )
        .unwrap();
        let cfg = PartialConfig::from_file(&path).unwrap();
        assert_eq!(cfg.api, Some(tmp.path().join("api/extension_api.json")));
        assert_eq!(cfg.form, Some(Form::Parameterized));
        assert_eq!(cfg.profile, Some(ProfileName::Variadic));
    }

    #[test]
    fn config_file_rejects_unknown_keys() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("luabind.json");
        std::fs::write(&path, r#"{"api": "a.json", "verbose": true}"#).unwrap();
        let err = PartialConfig::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("verbose"), "{err}");
    }
}
