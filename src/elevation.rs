//! Administrative privilege shim.
//!
//! The disk inventory tool needs raw device access, so the viewer makes sure it
//! runs elevated before anything else happens. If it is not, it hands off to an
//! elevated copy of itself: on Unix by exec'ing pkexec in place, on Windows by
//! starting the copy and exiting.

use anyhow::{Result, bail};
use std::ffi::OsString;
use tracing::info;

/// Argument appended to the elevated child so it can tell it was relaunched.
pub const RELAUNCHED_FLAG: &str = "--relaunched";

/// Platform capability to detect and request administrative rights.
pub trait Elevation {
    /// True when the current process holds administrative rights.
    /// Any failure to find out must read as false.
    fn is_elevated(&self) -> bool;

    /// Starts an elevated copy of the current executable with `args`.
    fn relaunch_elevated(&self, args: &[OsString]) -> Result<()>;
}

/// What `ensure_elevated` did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElevationOutcome {
    /// Nothing to do, keep running
    AlreadyElevated,
    /// An elevated copy was started; this process should exit
    Relaunched,
}

/// Ensures the process is elevated, or hands off to an elevated copy.
///
/// `already_relaunched` is set in the child started by a previous call. A child
/// that is still not elevated fails instead of relaunching again.
pub fn ensure_elevated(cap: &dyn Elevation, already_relaunched: bool) -> Result<ElevationOutcome> {
    if cap.is_elevated() {
        return Ok(ElevationOutcome::AlreadyElevated);
    }
    if already_relaunched {
        bail!("still not running with administrator privileges after relaunch");
    }

    info!("Requesting admin privileges...");
    let mut args: Vec<OsString> = std::env::args_os().skip(1).collect();
    args.push(RELAUNCHED_FLAG.into());
    cap.relaunch_elevated(&args)?;
    Ok(ElevationOutcome::Relaunched)
}

/// The elevation capability for the platform this binary was built for.
#[cfg(unix)]
pub fn platform() -> unix::UnixElevation {
    unix::UnixElevation
}

#[cfg(windows)]
pub fn platform() -> windows::WindowsElevation {
    windows::WindowsElevation
}

/// Joins arguments into one Windows command line, quoting the way the MSVC
/// runtime splits it back apart.
#[cfg(any(windows, test))]
fn windows_command_line(args: &[OsString]) -> String {
    let mut line = String::new();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            line.push(' ');
        }
        let arg = arg.to_string_lossy();
        if !arg.is_empty() && !arg.contains(&[' ', '\t', '"'][..]) {
            line.push_str(&arg);
            continue;
        }

        line.push('"');
        let mut backslashes = 0;
        for c in arg.chars() {
            match c {
                '\\' => backslashes += 1,
                '"' => {
                    line.extend(std::iter::repeat_n('\\', backslashes * 2 + 1));
                    line.push('"');
                    backslashes = 0;
                }
                _ => {
                    line.extend(std::iter::repeat_n('\\', backslashes));
                    line.push(c);
                    backslashes = 0;
                }
            }
        }
        // Backslashes before the closing quote must not escape it
        line.extend(std::iter::repeat_n('\\', backslashes * 2));
        line.push('"');
    }
    line
}

#[cfg(unix)]
mod unix {
    use super::Elevation;
    use anyhow::{Context, Result};
    use std::ffi::OsString;
    use std::os::unix::process::CommandExt;
    use std::path::Path;
    use std::process::Command;

    // pkexec starts the child with a clean environment
    const CARRIED_ENV: [&str; 4] = ["DISPLAY", "XAUTHORITY", "WAYLAND_DISPLAY", "XDG_RUNTIME_DIR"];

    pub struct UnixElevation;

    /// `pkexec env -C <cwd> KEY=VALUE... <exe> <args...>`
    pub(super) fn relaunch_command<'a>(
        exe: &Path,
        cwd: &Path,
        env: impl IntoIterator<Item = (&'a str, OsString)>,
        args: &[OsString],
    ) -> Command {
        let mut cmd = Command::new("pkexec");
        cmd.arg("env").arg("-C").arg(cwd);
        for (key, value) in env {
            let mut pair = OsString::from(key);
            pair.push("=");
            pair.push(value);
            cmd.arg(pair);
        }
        cmd.arg(exe).args(args);
        cmd
    }

    impl Elevation for UnixElevation {
        fn is_elevated(&self) -> bool {
            nix::unistd::geteuid().is_root()
        }

        /// Replaces this process with pkexec, which authorizes against its parent
        /// and so needs the launching shell to stay that parent.
        fn relaunch_elevated(&self, args: &[OsString]) -> Result<()> {
            let exe = std::env::current_exe().context("failed to locate current executable")?;
            let cwd = std::env::current_dir().context("failed to read working directory")?;
            let env = CARRIED_ENV
                .into_iter()
                .filter_map(|key| std::env::var_os(key).map(|value| (key, value)));

            // exec only returns on failure
            let err = relaunch_command(&exe, &cwd, env, args).exec();
            Err(err).context("failed to exec pkexec")
        }
    }
}

#[cfg(windows)]
mod windows {
    use super::{Elevation, windows_command_line};
    use anyhow::{Context, Result};
    use std::ffi::OsString;
    use std::process::Command;

    // Mandatory Label\High Mandatory Level
    const HIGH_INTEGRITY_SID: &str = "S-1-16-12288";

    pub struct WindowsElevation;

    fn ps_quote(s: &str) -> String {
        format!("'{}'", s.replace('\'', "''"))
    }

    impl Elevation for WindowsElevation {
        fn is_elevated(&self) -> bool {
            match Command::new("whoami").arg("/groups").output() {
                Ok(out) if out.status.success() => {
                    String::from_utf8_lossy(&out.stdout).contains(HIGH_INTEGRITY_SID)
                }
                _ => false,
            }
        }

        fn relaunch_elevated(&self, args: &[OsString]) -> Result<()> {
            let exe = std::env::current_exe().context("failed to locate current executable")?;
            let cwd = std::env::current_dir().context("failed to read working directory")?;

            let mut script = format!(
                "Start-Process -FilePath {} -WorkingDirectory {} -Verb RunAs",
                ps_quote(&exe.to_string_lossy()),
                ps_quote(&cwd.to_string_lossy()),
            );
            // One pre-quoted string; PowerShell 5.1 joins array elements unquoted
            if !args.is_empty() {
                script.push_str(" -ArgumentList ");
                script.push_str(&ps_quote(&windows_command_line(args)));
            }

            Command::new("powershell")
                .args(["-NoProfile", "-NonInteractive", "-Command", &script])
                .spawn()
                .context("failed to start powershell")?;
            Ok(())
        }
    }
}
