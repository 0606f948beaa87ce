//! # Credential resolution
//!
//! Resolves the server address and basic auth credentials for a client from
//! three sources, in order of precedence:
//!
//! 1. Values provided explicitly by the caller.
//! 2. The `VERDICT_SERVER`, `VERDICT_USERNAME` and `VERDICT_PASSWORD`
//!    environment variables.
//! 3. A netrc file, looked up by the machine name extracted from the server
//!    address. The file location can be overridden with the `NETRC`
//!    environment variable.
//!
//! Resolution is fail-closed: if the username or password cannot be filled in
//! from any source, an error is returned rather than connecting anonymously.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use thiserror::Error;

/// Environment variable holding the server address.
pub const SERVER_ENV_VAR: &str = "VERDICT_SERVER";
/// Environment variable holding the basic auth username.
pub const USERNAME_ENV_VAR: &str = "VERDICT_USERNAME";
/// Environment variable holding the basic auth password.
pub const PASSWORD_ENV_VAR: &str = "VERDICT_PASSWORD";
/// Environment variable overriding the netrc file location.
pub const NETRC_ENV_VAR: &str = "NETRC";

#[cfg(windows)]
const NETRC_FILE_NAME: &str = "_netrc";
#[cfg(not(windows))]
const NETRC_FILE_NAME: &str = ".netrc";

/// Source of environment variables.
///
/// Abstracted so that credential resolution can be tested without mutating
/// the process environment.
pub trait Environment {
    fn var(&self, name: &str) -> Option<String>;
}

/// [`Environment`] backed by the process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEnvironment;

impl Environment for OsEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Fully resolved basic auth credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub server: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Cannot extract machine name from '{0}'")]
    CannotExtractMachineName(String),
    #[error("Failed to parse address '{address}': {reason}")]
    MalformedTarget {
        address: String,
        reason: &'static str,
    },
    #[error("Home directory is not available")]
    HomeDirUnavailable,
    #[error("Failed to read credential file {path}: {source}")]
    CredentialFileRead {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse credential file {path}: {reason}")]
    CredentialFileParse { path: String, reason: String },
    #[error("No credentials found for machine '{0}'")]
    NoNetrcEntry(String),
}

/// Resolves the server address and credentials from explicit values, the
/// environment and the netrc file.
///
/// Explicitly provided values win over environment variables. If the username
/// or password is still empty after that, both are replaced by the netrc
/// entry for the machine name extracted from the server address.
pub fn load_basic_auth<E: Environment>(
    env: &E,
    server: &str,
    username: &str,
    password: &str,
) -> Result<BasicAuth, AuthError> {
    let server = coalesce_with_env(env, server, SERVER_ENV_VAR);
    let username = coalesce_with_env(env, username, USERNAME_ENV_VAR);
    let password = coalesce_with_env(env, password, PASSWORD_ENV_VAR);

    if !username.is_empty() && !password.is_empty() {
        return Ok(BasicAuth {
            server,
            username,
            password,
        });
    }

    let machine = extract_machine_name(&server)?;
    let (username, password) = netrc_credentials(env, &machine)?;

    Ok(BasicAuth {
        server,
        username,
        password,
    })
}

fn coalesce_with_env<E: Environment>(env: &E, value: &str, env_var: &str) -> String {
    if !value.is_empty() {
        return value.to_string();
    }

    env.var(env_var).unwrap_or_default()
}

/// Extracts the machine name to look up in the netrc file from a gRPC target
/// address.
///
/// Supports plain `host`, `host:port` and `dns:` target forms. Unix domain
/// socket targets have no machine name and are rejected.
pub fn extract_machine_name(target: &str) -> Result<String, AuthError> {
    if target.starts_with("unix:") {
        return Err(AuthError::CannotExtractMachineName(target.to_string()));
    }

    let mut addr = target;
    if let Some(rest) = target.strip_prefix("dns:") {
        addr = rest;
        if let Some(rest) = rest.strip_prefix("//") {
            // Authority form: dns://authority/host:port
            match rest.split_once('/') {
                Some((_, endpoint)) => addr = endpoint,
                None => {
                    return Err(AuthError::CannotExtractMachineName(target.to_string()));
                }
            }
        }
    }

    match split_host(addr) {
        Ok(host) => Ok(host.to_string()),
        Err(SplitError::MissingPort) => Ok(addr.to_string()),
        Err(err) => Err(AuthError::MalformedTarget {
            address: target.to_string(),
            reason: err.reason(),
        }),
    }
}

enum SplitError {
    MissingPort,
    MissingBracket,
    TooManyColons,
}

impl SplitError {
    fn reason(&self) -> &'static str {
        match self {
            SplitError::MissingPort => "missing port in address",
            SplitError::MissingBracket => "missing ']' in address",
            SplitError::TooManyColons => "too many colons in address",
        }
    }
}

// Splits `host:port`, `[host]:port` and unbracketed IPv6 literals. A missing
// port is reported separately so the caller can treat the whole address as
// the host.
fn split_host(addr: &str) -> Result<&str, SplitError> {
    if addr.parse::<std::net::Ipv6Addr>().is_ok() {
        return Ok(addr);
    }

    let Some(last_colon) = addr.rfind(':') else {
        return Err(SplitError::MissingPort);
    };

    if addr.starts_with('[') {
        let Some(end) = addr.find(']') else {
            return Err(SplitError::MissingBracket);
        };
        if end + 1 == addr.len() {
            return Err(SplitError::MissingPort);
        }
        if end + 1 == last_colon {
            return Ok(&addr[1..end]);
        }
        if addr.as_bytes()[end + 1] == b':' {
            return Err(SplitError::TooManyColons);
        }
        return Err(SplitError::MissingPort);
    }

    let host = &addr[..last_colon];
    if host.contains(':') {
        return Err(SplitError::TooManyColons);
    }

    Ok(host)
}

fn netrc_credentials<E: Environment>(
    env: &E,
    machine: &str,
) -> Result<(String, String), AuthError> {
    let path = netrc_path(env)?;

    let file = File::open(&path).map_err(|source| AuthError::CredentialFileRead {
        path: path.display().to_string(),
        source,
    })?;

    let parsed =
        netrc::Netrc::parse(BufReader::new(file)).map_err(|err| AuthError::CredentialFileParse {
            path: path.display().to_string(),
            reason: format!("{err:?}"),
        })?;

    let entry = parsed
        .hosts
        .iter()
        .find(|(name, _)| name.as_str() == machine)
        .map(|(_, entry)| entry)
        .ok_or_else(|| AuthError::NoNetrcEntry(machine.to_string()))?;

    Ok((
        entry.login.clone(),
        entry.password.clone().unwrap_or_default(),
    ))
}

fn netrc_path<E: Environment>(env: &E) -> Result<PathBuf, AuthError> {
    match env.var(NETRC_ENV_VAR) {
        Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
        _ => Ok(dirs::home_dir()
            .ok_or(AuthError::HomeDirUnavailable)?
            .join(NETRC_FILE_NAME)),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    struct MockEnv(HashMap<&'static str, String>);

    impl MockEnv {
        fn new(vars: &[(&'static str, &str)]) -> Self {
            Self(
                vars.iter()
                    .map(|(name, value)| (*name, value.to_string()))
                    .collect(),
            )
        }
    }

    impl Environment for MockEnv {
        fn var(&self, name: &str) -> Option<String> {
            self.0.get(name).cloned()
        }
    }

    fn write_netrc(dir: &tempfile::TempDir) -> String {
        let path = dir.path().join("netrc");
        let mut file = File::create(&path).expect("create netrc");
        writeln!(file, "machine server login netrcuser password netrcpass").unwrap();
        writeln!(file, "machine 192.168.1.23 login netrcuser password netrcpass").unwrap();
        path.display().to_string()
    }

    #[test]
    fn explicit_values_win() {
        let dir = tempfile::tempdir().unwrap();
        let netrc_path = write_netrc(&dir);
        let env = MockEnv::new(&[
            (NETRC_ENV_VAR, netrc_path.as_str()),
            (SERVER_ENV_VAR, "envserver"),
            (USERNAME_ENV_VAR, "envuser"),
            (PASSWORD_ENV_VAR, "envpass"),
        ]);

        let auth = load_basic_auth(&env, "server", "user", "pass").unwrap();
        assert_eq!(
            auth,
            BasicAuth {
                server: "server".to_string(),
                username: "user".to_string(),
                password: "pass".to_string(),
            }
        );
    }

    #[test]
    fn env_fills_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let netrc_path = write_netrc(&dir);
        let env = MockEnv::new(&[
            (NETRC_ENV_VAR, netrc_path.as_str()),
            (SERVER_ENV_VAR, "envserver"),
            (USERNAME_ENV_VAR, "envuser"),
            (PASSWORD_ENV_VAR, "envpass"),
        ]);

        let auth = load_basic_auth(&env, "", "user", "pass").unwrap();
        assert_eq!(auth.server, "envserver");
        assert_eq!(auth.username, "user");

        let auth = load_basic_auth(&env, "server", "", "pass").unwrap();
        assert_eq!(auth.username, "envuser");
        assert_eq!(auth.password, "pass");

        let auth = load_basic_auth(&env, "server", "user", "").unwrap();
        assert_eq!(auth.username, "user");
        assert_eq!(auth.password, "envpass");

        let auth = load_basic_auth(&env, "", "", "").unwrap();
        assert_eq!(auth.server, "envserver");
        assert_eq!(auth.username, "envuser");
        assert_eq!(auth.password, "envpass");
    }

    #[test]
    fn netrc_fallback_with_provided_server() {
        let dir = tempfile::tempdir().unwrap();
        let netrc_path = write_netrc(&dir);
        let env = MockEnv::new(&[(NETRC_ENV_VAR, netrc_path.as_str())]);

        let auth = load_basic_auth(&env, "server:3592", "", "").unwrap();
        assert_eq!(auth.server, "server:3592");
        assert_eq!(auth.username, "netrcuser");
        assert_eq!(auth.password, "netrcpass");
    }

    #[test]
    fn netrc_fallback_with_env_server() {
        let dir = tempfile::tempdir().unwrap();
        let netrc_path = write_netrc(&dir);
        let env = MockEnv::new(&[
            (NETRC_ENV_VAR, netrc_path.as_str()),
            (SERVER_ENV_VAR, "dns:///server:3592"),
        ]);

        let auth = load_basic_auth(&env, "", "", "").unwrap();
        assert_eq!(auth.server, "dns:///server:3592");
        assert_eq!(auth.username, "netrcuser");
        assert_eq!(auth.password, "netrcpass");
    }

    #[test]
    fn netrc_replaces_partial_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let netrc_path = write_netrc(&dir);
        let env = MockEnv::new(&[(NETRC_ENV_VAR, netrc_path.as_str())]);

        // A username without a password is not enough; the netrc entry
        // replaces both fields.
        let auth = load_basic_auth(&env, "server:3592", "user", "").unwrap();
        assert_eq!(auth.username, "netrcuser");
        assert_eq!(auth.password, "netrcpass");
    }

    #[test]
    fn missing_netrc_entry_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let netrc_path = write_netrc(&dir);
        let env = MockEnv::new(&[
            (NETRC_ENV_VAR, netrc_path.as_str()),
            (SERVER_ENV_VAR, "dns:///someserver:3592"),
        ]);

        let err = load_basic_auth(&env, "", "", "").unwrap_err();
        assert!(matches!(err, AuthError::NoNetrcEntry(machine) if machine == "someserver"));
    }

    #[test]
    fn missing_netrc_file_is_an_error() {
        let env = MockEnv::new(&[
            (NETRC_ENV_VAR, "does-not-exist"),
            (SERVER_ENV_VAR, "dns:///server:3592"),
        ]);

        let err = load_basic_auth(&env, "", "", "").unwrap_err();
        assert!(matches!(err, AuthError::CredentialFileRead { .. }));
    }

    #[test]
    fn machine_name_extraction() {
        let cases = [
            ("myserver", "myserver"),
            ("myserver:3593", "myserver"),
            ("dns:myserver:3593", "myserver"),
            ("dns:///myserver:3593", "myserver"),
            ("dns://192.168.1.1/myserver:3593", "myserver"),
            ("10.0.1.2", "10.0.1.2"),
            ("10.0.1.2:3593", "10.0.1.2"),
            ("[::1]:80", "::1"),
            ("::1", "::1"),
            ("", ""),
            (":", ""),
            ("   ", "   "),
        ];

        for (target, want) in cases {
            let have = extract_machine_name(target)
                .unwrap_or_else(|err| panic!("{target:?} failed: {err}"));
            assert_eq!(have, want, "target {target:?}");
        }
    }

    #[test]
    fn machine_name_extraction_failures() {
        let cases = [
            "dns://myserver:3593",
            "unix:/path",
            "unix:///path",
            "a:b:c",
            "[::1",
        ];

        for target in cases {
            assert!(
                extract_machine_name(target).is_err(),
                "target {target:?} should fail"
            );
        }
    }
}
