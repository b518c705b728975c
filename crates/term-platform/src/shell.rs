//! Shell detection and argument helpers: runtime `$SHELL`/`%COMSPEC%`
//! lookup instead of a hardcoded path.
//!
//! @module term-platform/shell

/// Detect the user's default shell.
///
/// - Unix: `$SHELL`, falling back to `/bin/sh`.
/// - Windows: `%COMSPEC%`, falling back to `cmd.exe`.
pub fn detect_shell() -> String {
    #[cfg(unix)]
    {
        std::env::var("SHELL").unwrap_or_else(|_| "/bin/sh".to_string())
    }

    #[cfg(windows)]
    {
        std::env::var("COMSPEC").unwrap_or_else(|_| "cmd.exe".to_string())
    }

    #[cfg(not(any(unix, windows)))]
    {
        "/bin/sh".to_string()
    }
}

/// Arguments to pass so the shell starts as an interactive login session.
pub fn shell_args(shell: &str) -> Vec<String> {
    if shell.ends_with("zsh") || shell.ends_with("bash") {
        vec!["--login".to_string()]
    } else {
        vec![]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_shell_returns_non_empty() {
        assert!(!detect_shell().is_empty());
    }

    #[test]
    fn shell_args_for_zsh_and_bash_add_login() {
        assert_eq!(shell_args("/bin/zsh"), vec!["--login".to_string()]);
        assert_eq!(shell_args("/usr/bin/bash"), vec!["--login".to_string()]);
    }

    #[test]
    fn shell_args_for_other_shells_are_empty() {
        assert!(shell_args("/usr/bin/fish").is_empty());
        assert!(shell_args("/bin/sh").is_empty());
    }
}
