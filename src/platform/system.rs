//! Default opener backed by the system handlers.

use std::path::Path;

use super::Opener;

/// File/URL opening via the desktop default handlers (`open` crate),
/// sharing via the desktop mail handler where one exists.
pub struct SystemOpener;

impl Opener for SystemOpener {
    fn open(&self, path: &Path, _mime_type: &str) -> bool {
        open::that(path).is_ok()
    }

    fn open_downloads(&self) -> bool {
        match dirs::download_dir() {
            Some(dir) => open::that(dir).is_ok(),
            None => false,
        }
    }

    fn share(&self, path: &Path, _mime_type: &str) -> bool {
        #[cfg(target_os = "linux")]
        {
            use std::process::Command;

            let spawned = Command::new("xdg-email")
                .arg("--attach")
                .arg(path)
                .spawn()
                .is_ok();
            if spawned {
                return true;
            }
        }

        // No send-to target; reveal the file's directory instead.
        path.parent()
            .map(|dir| open::that(dir).is_ok())
            .unwrap_or(false)
    }
}
