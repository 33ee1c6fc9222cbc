//! Clipboard support for the display value.

use arboard::Clipboard;

use super::error::ERROR_SENTINEL;

/// Copy the display text to the system clipboard.
///
/// The error sentinel is never copied. Returns `Ok(false)` in that case.
pub fn copy_to_clipboard(display: &str) -> anyhow::Result<bool> {
    if display == ERROR_SENTINEL {
        return Ok(false);
    }

    let mut clipboard = Clipboard::new()
        .map_err(|e| anyhow::anyhow!("Failed to access clipboard: {}", e))?;

    clipboard
        .set_text(display.to_string())
        .map_err(|e| anyhow::anyhow!("Failed to copy to clipboard: {}", e))?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_is_not_copied() {
        assert!(!copy_to_clipboard(ERROR_SENTINEL).unwrap());
    }
}
