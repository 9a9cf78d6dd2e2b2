use battbar_core::{PowerError, Result};
use std::path::Path;
use std::process::Stdio;
use tokio::io::AsyncReadExt;
use tokio::process::Command;

/// Upper bound on helper output captured per invocation, in bytes.
/// Anything the helper prints beyond this is left unread in the pipe.
pub const HELPER_OUTPUT_CAP: usize = 4095;

/// Captured result of one helper invocation.
#[derive(Debug, Clone)]
pub struct HelperResult {
    /// Child exit code (always 0 on the success path).
    pub exit_code: i32,
    /// Helper stdout, capped at [`HELPER_OUTPUT_CAP`] bytes.
    pub text: String,
}

/// Run the status helper once: spawn it with stdout piped, wait for it to
/// terminate, then capture up to [`HELPER_OUTPUT_CAP`] bytes of its output.
///
/// A non-zero exit status is an error regardless of what the helper
/// printed; the captured text travels along as diagnostic output.
pub async fn invoke(helper: &Path, args: &[&str]) -> Result<HelperResult> {
    let mut child = Command::new(helper)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .spawn()
        .map_err(|e| PowerError::Spawn {
            path: helper.display().to_string(),
            source: e,
        })?;

    let stdout = child.stdout.take();

    // Wait first, read after. The protocol is a handful of short lines, so
    // everything the helper has to say fits in the pipe buffer.
    let status = child.wait().await?;

    let mut buf = vec![0u8; HELPER_OUTPUT_CAP];
    let mut len = 0;
    if let Some(mut pipe) = stdout {
        while len < buf.len() {
            let n = pipe.read(&mut buf[len..]).await?;
            if n == 0 {
                break;
            }
            len += n;
        }
    }
    buf.truncate(len);
    let text = String::from_utf8_lossy(&buf).into_owned();

    let exit_code = status.code().unwrap_or(-1);
    if !status.success() {
        return Err(PowerError::HelperExit {
            path: helper.display().to_string(),
            code: exit_code,
            diagnostic: text,
        });
    }

    Ok(HelperResult { exit_code, text })
}
