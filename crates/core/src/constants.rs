//! Shared constants: the external tool's name and CLI grammar pieces, the
//! custom-property sentinel, and the environment-variable fallbacks.

/// Name of the external KeePassXC command-line binary, looked up on `PATH`.
pub const KEEPASSXC_CLI_BIN: &str = "keepassxc-cli";

/// Subcommand used to fetch a single attribute of an entry.
pub const SHOW_SUBCOMMAND: &str = "show";

/// Flag that selects which attribute `show` prints.
pub const ATTRIBUTE_FLAG: &str = "-a";

/// Flag carrying the optional key-file path.
pub const KEY_FILE_FLAG: &str = "--key-file";

/// Attribute sentinel requesting a user-defined entry property. When a
/// request names this attribute, a third term supplies the property key and
/// that key is what gets sent to the external tool.
pub const CUSTOM_PROPERTIES: &str = "custom_properties";

/// Environment fallback for the key-file path, consulted when the variable
/// map does not provide one.
pub const KEY_FILE_ENV_VAR: &str = "ANSIBLE_KEEPASS_KEY_FILE";

/// Environment fallback for the master password.
pub const MASTER_PASSWORD_ENV_VAR: &str = "ANSIBLE_KEEPASSXC_PWD";
