//! Layered configuration resolution
//!
//! Three values feed one invocation: the database path, an optional key-file
//! path, and the master password. Each is resolved with "first non-empty
//! wins" precedence: the caller-supplied variable map first, then (for the
//! key file and the password only) a fixed environment variable. Path values
//! are shell-expanded, canonicalized, and checked to name an existing
//! regular file before any subprocess is spawned.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use kplookup_core::{constants, Error, MasterPassword, Result};

/// Variable names the resolver reads from the caller-supplied map.
///
/// The lookup historically shipped as two copies of the same logic differing
/// only in these names; a key table keeps a single implementation serving
/// both vocabularies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableKeys {
    database: String,
    key_file: String,
    password: String,
}

impl VariableKeys {
    /// Custom key names.
    #[must_use]
    pub fn new(
        database: impl Into<String>,
        key_file: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            database: database.into(),
            key_file: key_file.into(),
            password: password.into(),
        }
    }

    /// The `keepass_dbx` / `keepass_key` / `keepassxc_pwd` vocabulary.
    #[must_use]
    pub fn short() -> Self {
        Self::new("keepass_dbx", "keepass_key", "keepassxc_pwd")
    }

    /// The `keepassxc_kdbx_path` / `keepassxc_key_file` / `keepassxc_pwd`
    /// vocabulary.
    #[must_use]
    pub fn long() -> Self {
        Self::new("keepassxc_kdbx_path", "keepassxc_key_file", "keepassxc_pwd")
    }
}

impl Default for VariableKeys {
    fn default() -> Self {
        Self::short()
    }
}

/// Fully validated inputs for one `keepassxc-cli` invocation.
///
/// Constructed fresh per lookup and dropped as soon as the subprocess call
/// returns; the password is zeroized on drop.
#[derive(Debug)]
pub struct ResolvedConfig {
    database: PathBuf,
    key_file: Option<PathBuf>,
    password: MasterPassword,
}

impl ResolvedConfig {
    pub(crate) fn new(
        database: PathBuf,
        key_file: Option<PathBuf>,
        password: MasterPassword,
    ) -> Self {
        Self {
            database,
            key_file,
            password,
        }
    }

    /// Canonical path of the database file.
    #[must_use]
    pub fn database(&self) -> &Path {
        &self.database
    }

    /// Canonical path of the key file, when one was configured.
    #[must_use]
    pub fn key_file(&self) -> Option<&Path> {
        self.key_file.as_deref()
    }

    /// The master password.
    #[must_use]
    pub fn password(&self) -> &MasterPassword {
        &self.password
    }
}

/// Resolves the three configuration values against a variable map and the
/// process environment.
pub struct ConfigResolver {
    keys: VariableKeys,
}

impl ConfigResolver {
    #[must_use]
    pub fn new(keys: VariableKeys) -> Self {
        Self { keys }
    }

    /// Produce a validated [`ResolvedConfig`] or fail fast.
    ///
    /// Precedence per value:
    /// 1. database path: variable only, required;
    /// 2. key-file path: variable, then `ANSIBLE_KEEPASS_KEY_FILE`;
    ///    absent means "no key file";
    /// 3. master password: variable, then `ANSIBLE_KEEPASSXC_PWD`,
    ///    required.
    pub fn resolve(&self, variables: &HashMap<String, String>) -> Result<ResolvedConfig> {
        let database = match non_empty(variables.get(&self.keys.database)) {
            Some(raw) => canonical_file(raw, "database")?,
            None => {
                return Err(Error::configuration(format!(
                    "'{}' is not set",
                    self.keys.database
                )));
            }
        };

        let key_file = match non_empty(variables.get(&self.keys.key_file))
            .map(ToString::to_string)
            .or_else(|| env_non_empty(constants::KEY_FILE_ENV_VAR))
        {
            Some(raw) => Some(canonical_file(&raw, "key")?),
            None => None,
        };

        let password = non_empty(variables.get(&self.keys.password))
            .map(ToString::to_string)
            .or_else(|| env_non_empty(constants::MASTER_PASSWORD_ENV_VAR))
            .ok_or_else(|| {
                Error::configuration(format!("'{}' is not set", self.keys.password))
            })?;

        tracing::debug!(
            database = %database.display(),
            key_file = ?key_file,
            "resolved lookup configuration"
        );

        Ok(ResolvedConfig::new(
            database,
            key_file,
            MasterPassword::new(password),
        ))
    }
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty())
}

fn env_non_empty(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

/// Expand `~` and embedded environment references, canonicalize, and verify
/// the result names an existing regular file.
fn canonical_file(raw: &str, role: &'static str) -> Result<PathBuf> {
    let expanded = shellexpand::full(raw)
        .map_err(|e| Error::shell_expansion(raw, e.to_string()))?;
    let expanded = Path::new(expanded.as_ref());

    let canonical = fs::canonicalize(expanded)
        .map_err(|_| Error::file_not_found(role, expanded))?;
    if !canonical.is_file() {
        return Err(Error::file_not_found(role, canonical));
    }
    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn database_fixture() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"not a real kdbx").unwrap();
        file
    }

    #[test]
    #[serial]
    fn resolves_database_and_password_from_variables() {
        let db = database_fixture();
        let config = ConfigResolver::new(VariableKeys::short())
            .resolve(&vars(&[
                ("keepass_dbx", db.path().to_str().unwrap()),
                ("keepassxc_pwd", "master-pw"),
            ]))
            .unwrap();

        assert_eq!(config.database(), db.path().canonicalize().unwrap());
        assert!(config.key_file().is_none());
    }

    #[test]
    #[serial]
    fn missing_database_variable_is_a_configuration_error() {
        let err = ConfigResolver::new(VariableKeys::short())
            .resolve(&vars(&[("keepassxc_pwd", "master-pw")]))
            .unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
        assert!(err.to_string().contains("keepass_dbx"));
    }

    #[test]
    #[serial]
    fn empty_database_variable_counts_as_unset() {
        let err = ConfigResolver::new(VariableKeys::short())
            .resolve(&vars(&[("keepass_dbx", ""), ("keepassxc_pwd", "master-pw")]))
            .unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    #[serial]
    fn nonexistent_database_fails_naming_the_database() {
        let err = ConfigResolver::new(VariableKeys::short())
            .resolve(&vars(&[
                ("keepass_dbx", "/definitely/not/there.kdbx"),
                ("keepassxc_pwd", "master-pw"),
            ]))
            .unwrap_err();
        assert!(matches!(err, Error::FileNotFound { role: "database", .. }));
    }

    #[test]
    #[serial]
    fn directory_is_not_a_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConfigResolver::new(VariableKeys::short())
            .resolve(&vars(&[
                ("keepass_dbx", dir.path().to_str().unwrap()),
                ("keepassxc_pwd", "master-pw"),
            ]))
            .unwrap_err();
        assert!(matches!(err, Error::FileNotFound { role: "database", .. }));
    }

    #[test]
    #[serial]
    fn nonexistent_key_file_fails_naming_the_key() {
        let db = database_fixture();
        let err = ConfigResolver::new(VariableKeys::short())
            .resolve(&vars(&[
                ("keepass_dbx", db.path().to_str().unwrap()),
                ("keepass_key", "/definitely/not/there.keyx"),
                ("keepassxc_pwd", "master-pw"),
            ]))
            .unwrap_err();
        assert!(matches!(err, Error::FileNotFound { role: "key", .. }));
    }

    #[test]
    #[serial]
    fn undefined_variable_reference_is_an_expansion_error() {
        let err = ConfigResolver::new(VariableKeys::short())
            .resolve(&vars(&[
                ("keepass_dbx", "$KPLOOKUP_NO_SUCH_VARIABLE/db.kdbx"),
                ("keepassxc_pwd", "master-pw"),
            ]))
            .unwrap_err();
        assert!(matches!(err, Error::ShellExpansion { .. }));
    }

    #[test]
    #[serial]
    fn embedded_environment_references_are_expanded() {
        let db = database_fixture();
        let dir = db.path().parent().unwrap();
        let name = db.path().file_name().unwrap().to_str().unwrap();
        env::set_var("KPLOOKUP_TEST_DB_DIR", dir);

        let config = ConfigResolver::new(VariableKeys::short())
            .resolve(&vars(&[
                ("keepass_dbx", &format!("$KPLOOKUP_TEST_DB_DIR/{name}")),
                ("keepassxc_pwd", "master-pw"),
            ]))
            .unwrap();

        env::remove_var("KPLOOKUP_TEST_DB_DIR");
        assert_eq!(config.database(), db.path().canonicalize().unwrap());
    }

    #[test]
    #[serial]
    fn key_file_variable_takes_precedence_over_environment() {
        let db = database_fixture();
        let var_key = database_fixture();
        let env_key = database_fixture();
        env::set_var(
            constants::KEY_FILE_ENV_VAR,
            env_key.path().to_str().unwrap(),
        );

        let config = ConfigResolver::new(VariableKeys::short())
            .resolve(&vars(&[
                ("keepass_dbx", db.path().to_str().unwrap()),
                ("keepass_key", var_key.path().to_str().unwrap()),
                ("keepassxc_pwd", "master-pw"),
            ]))
            .unwrap();

        env::remove_var(constants::KEY_FILE_ENV_VAR);
        assert_eq!(
            config.key_file().unwrap(),
            var_key.path().canonicalize().unwrap()
        );
    }

    #[test]
    #[serial]
    fn key_file_falls_back_to_environment() {
        let db = database_fixture();
        let env_key = database_fixture();
        env::set_var(
            constants::KEY_FILE_ENV_VAR,
            env_key.path().to_str().unwrap(),
        );

        let config = ConfigResolver::new(VariableKeys::short())
            .resolve(&vars(&[
                ("keepass_dbx", db.path().to_str().unwrap()),
                ("keepassxc_pwd", "master-pw"),
            ]))
            .unwrap();

        env::remove_var(constants::KEY_FILE_ENV_VAR);
        assert_eq!(
            config.key_file().unwrap(),
            env_key.path().canonicalize().unwrap()
        );
    }

    #[test]
    #[serial]
    fn password_falls_back_to_environment() {
        let db = database_fixture();
        env::set_var(constants::MASTER_PASSWORD_ENV_VAR, "env-pw");

        let config = ConfigResolver::new(VariableKeys::short())
            .resolve(&vars(&[("keepass_dbx", db.path().to_str().unwrap())]))
            .unwrap();

        env::remove_var(constants::MASTER_PASSWORD_ENV_VAR);
        assert_eq!(config.password().stdin_payload().as_slice(), b"env-pw\n");
    }

    #[test]
    #[serial]
    fn password_variable_takes_precedence_over_environment() {
        let db = database_fixture();
        env::set_var(constants::MASTER_PASSWORD_ENV_VAR, "env-pw");

        let config = ConfigResolver::new(VariableKeys::short())
            .resolve(&vars(&[
                ("keepass_dbx", db.path().to_str().unwrap()),
                ("keepassxc_pwd", "var-pw"),
            ]))
            .unwrap();

        env::remove_var(constants::MASTER_PASSWORD_ENV_VAR);
        assert_eq!(config.password().stdin_payload().as_slice(), b"var-pw\n");
    }

    #[test]
    #[serial]
    fn missing_password_everywhere_is_a_configuration_error() {
        let db = database_fixture();
        env::remove_var(constants::MASTER_PASSWORD_ENV_VAR);

        let err = ConfigResolver::new(VariableKeys::short())
            .resolve(&vars(&[("keepass_dbx", db.path().to_str().unwrap())]))
            .unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
        assert!(err.to_string().contains("keepassxc_pwd"));
    }

    #[test]
    #[serial]
    fn long_key_table_reads_the_other_vocabulary() {
        let db = database_fixture();
        let config = ConfigResolver::new(VariableKeys::long())
            .resolve(&vars(&[
                ("keepassxc_kdbx_path", db.path().to_str().unwrap()),
                ("keepassxc_pwd", "master-pw"),
            ]))
            .unwrap();
        assert_eq!(config.database(), db.path().canonicalize().unwrap());
    }
}
