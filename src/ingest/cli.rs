//! Collection command execution.
//!
//! Runs the command that gathers interface state from every node, e.g.
//! `clush -a -L ip -br -4 addr`, and returns its stdout.

use crate::config::MAX_COLLECT_OUTPUT;
use colored::Colorize;
use regex::Regex;
use std::error::Error;
use std::process::Command;
use std::sync::OnceLock;

/// Regex for splitting command strings while preserving quoted substrings.
static COMMAND_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_command_regex() -> &'static Regex {
    COMMAND_REGEX.get_or_init(|| {
        Regex::new(r#"'([^']*)'\s*|\"([^\"]*)\"\s*|([^'\s]*)\s*"#).expect("Invalid Regex")
    })
}

/// Run a shell command and return its stdout.
///
/// The command string is split on spaces, with quoted substrings preserved.
/// A non-zero exit is only logged when stdout is not empty: parallel shells
/// exit non-zero as soon as one node is unreachable, and the remaining nodes'
/// output is still worth analyzing.
pub fn run(cmd: &str) -> Result<String, Box<dyn Error>> {
    log::debug!("run({cmd})", cmd = cmd.on_blue());

    let cmds: Vec<&str> = split_and_strip(cmd)
        .into_iter()
        .filter(|c| !c.is_empty())
        .collect();
    log::trace!("split cmds={:?}", cmds);

    let (program, args) = cmds
        .split_first()
        .ok_or_else(|| format!("Empty collection command: '{cmd}'"))?;
    let output = Command::new(program).args(args).output().map_err(|e| {
        log::error!("Command execution failed: {}", e);
        format!("Failed to execute command '{cmd}': {e}")
    })?;

    if output.stdout.len() > MAX_COLLECT_OUTPUT {
        return Err(format!(
            "Response too large: {} bytes for command: {:?}",
            output.stdout.len(),
            cmds
        )
        .into());
    }

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        log::trace!(
            "code={code:?}, status={status}\n┎######\nstderr=\n{stderr}\n┖######",
            code = output.status.code(),
            status = output.status,
            stderr = stderr.red()
        );
        if output.stdout.is_empty() {
            log::warn!(
                "{failed} to run {cmd}",
                failed = "failed".on_red(),
                cmd = cmd.on_blue()
            );
            return Err(format!("ERROR running: {stderr}").into());
        }
        log::warn!(
            "{cmd} exited with {status}, continuing with partial output",
            cmd = cmd.on_blue(),
            status = output.status
        );
    }

    log::debug!("Success output.stdout.len(): {}", output.stdout.len());
    let stdout = String::from_utf8(output.stdout).map_err(|e| format!("Invalid UTF-8: {}", e))?;

    Ok(stdout)
}

/// Split a command string on spaces, preserving quoted substrings.
fn split_and_strip(input: &str) -> Vec<&str> {
    get_command_regex()
        .find_iter(input)
        .map(|m| m.as_str().trim().trim_matches('\'').trim_matches('"'))
        .collect()
}
