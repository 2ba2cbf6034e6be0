//! External command execution.

use std::path::Path;
use std::process::Command;

/// Candidate names for the git client, tried in order.
///
/// Windows installs may expose git only as `git.cmd` or `git.exe`.
pub fn git_executables() -> &'static [&'static str] {
    if cfg!(windows) {
        &["git.cmd", "git.exe"]
    } else {
        &["git"]
    }
}

/// Run the first launchable candidate executable and capture trimmed stdout.
///
/// Returns `None` when no candidate can be launched or the command exits
/// non-zero; failures are reported at verbose level only, never raised. One
/// attempt per candidate, no retry.
pub fn run_command(
    commands: &[&str],
    args: &[&str],
    cwd: &Path,
    verbose: bool,
) -> Option<String> {
    for exe in commands {
        let output = match Command::new(exe).args(args).current_dir(cwd).output() {
            Ok(output) => output,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => {
                if verbose {
                    eprintln!("unable to run {}: {}", exe, e);
                }
                return None;
            }
        };

        if !output.status.success() {
            if verbose {
                eprintln!(
                    "{} {} failed with {}: {}",
                    exe,
                    args.join(" "),
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                );
            }
            return None;
        }

        return Some(String::from_utf8_lossy(&output.stdout).trim().to_string());
    }

    if verbose {
        eprintln!("unable to find command, tried {:?}", commands);
    }
    None
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn test_missing_executable() {
        let out = run_command(
            &["no-such-executable-anywhere"],
            &["--version"],
            Path::new("."),
            false,
        );
        assert_eq!(out, None);
    }

    #[test]
    fn test_falls_through_to_later_candidate() {
        // `true` exists on any unix test host and prints nothing
        #[cfg(unix)]
        {
            let out = run_command(
                &["no-such-executable-anywhere", "true"],
                &[],
                Path::new("."),
                false,
            );
            assert_eq!(out, Some(String::new()));
        }
    }

    #[test]
    fn test_nonzero_exit_is_none() {
        #[cfg(unix)]
        {
            let out = run_command(&["false"], &[], Path::new("."), false);
            assert_eq!(out, None);
        }
    }

    #[test]
    fn test_stdout_is_trimmed() {
        #[cfg(unix)]
        {
            let out = run_command(&["echo"], &["  hello  "], Path::new("."), false);
            assert_eq!(out, Some("hello".to_string()));
        }
    }
}
