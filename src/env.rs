//! Environment variable names and process lookups used to seed the
//! process-wide options.
//!
//! These are purely helpers; [`AppOptions`](crate::options::AppOptions) can
//! be built without touching the environment.

/// Minimum severity name (`debug`, `info`, `warn`, `error`). Defaults to `info`.
pub const OLOG_LEVEL_ENV: &str = "OLOG_LEVEL";

/// Value of the `application` field.
pub const OLOG_APPLICATION_ENV: &str = "OLOG_APPLICATION";

/// Value of the `environment` field.
pub const OLOG_ENVIRONMENT_ENV: &str = "OLOG_ENVIRONMENT";

/// Read an environment variable or fall back to a provided default.
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read an environment variable, treating empty values as unset.
pub fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Best-effort host name of the current machine.
pub fn hostname() -> String {
    env_opt("HOSTNAME")
        .or_else(|| env_opt("COMPUTERNAME"))
        .or_else(|| {
            std::fs::read_to_string("/proc/sys/kernel/hostname")
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        })
        .unwrap_or_else(|| "localhost".to_string())
}

/// Current process id rendered as a string, as it appears in output lines.
pub fn pid() -> String {
    std::process::id().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pid_is_numeric() {
        assert!(pid().parse::<u32>().is_ok());
    }

    #[test]
    fn hostname_is_never_empty() {
        assert!(!hostname().is_empty());
    }

    #[test]
    fn env_or_falls_back() {
        assert_eq!(env_or("OLOG_TEST_DEFINITELY_UNSET", "dflt"), "dflt");
        assert_eq!(env_opt("OLOG_TEST_DEFINITELY_UNSET"), None);
    }
}
