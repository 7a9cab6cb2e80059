//! launchd scheduler adapter (macOS)
//!
//! Renders a user agent plist with a StartCalendarInterval entry for every
//! quarter hour of the day and drives it through launchctl.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::fs;
use tokio::process::Command;

use crate::application::ports::{SchedulerCtl, SchedulerError};

pub const LAUNCHD_LABEL: &str = "io.popclock.chimes";

const TICK_MINUTES: [u8; 4] = [0, 15, 30, 45];

/// launchd-backed scheduler control
pub struct LaunchdScheduler {
    plist_path: PathBuf,
    program_args: Vec<String>,
    launchctl: PathBuf,
}

impl LaunchdScheduler {
    /// Agent for `program_args`, at the default LaunchAgents path unless
    /// overridden.
    pub fn new(plist_path: Option<PathBuf>, program_args: Vec<String>) -> Self {
        let plist_path = plist_path.unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("~"))
                .join("Library/LaunchAgents")
                .join(format!("{}.plist", LAUNCHD_LABEL))
        });
        Self {
            plist_path,
            program_args,
            launchctl: PathBuf::from("launchctl"),
        }
    }

    /// Agent that re-invokes the current executable with `popclock tick`.
    pub fn for_current_exe(plist_path: Option<PathBuf>) -> Result<Self, SchedulerError> {
        let exe = std::env::current_exe().map_err(|e| SchedulerError::Io(e.to_string()))?;
        let args = vec![exe.to_string_lossy().to_string(), "tick".to_string()];
        Ok(Self::new(plist_path, args))
    }

    /// The complete plist document for this agent.
    pub fn render_plist(&self) -> String {
        let mut doc = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <!DOCTYPE plist PUBLIC \"-//Apple//DTD PLIST 1.0//EN\" \
             \"http://www.apple.com/DTDs/PropertyList-1.0.dtd\">\n\
             <plist version=\"1.0\">\n<dict>\n",
        );
        doc.push_str(&format!(
            "  <key>Label</key>\n  <string>{}</string>\n",
            LAUNCHD_LABEL
        ));

        doc.push_str("  <key>ProgramArguments</key>\n  <array>\n");
        for arg in &self.program_args {
            doc.push_str(&format!("    <string>{}</string>\n", arg));
        }
        doc.push_str("  </array>\n");

        doc.push_str("  <key>StartCalendarInterval</key>\n  <array>\n");
        for hour in 0..24u8 {
            for minute in TICK_MINUTES {
                doc.push_str(&format!(
                    "    <dict>\n      <key>Hour</key>\n      <integer>{}</integer>\n      \
                     <key>Minute</key>\n      <integer>{}</integer>\n    </dict>\n",
                    hour, minute
                ));
            }
        }
        doc.push_str("  </array>\n</dict>\n</plist>\n");
        doc
    }

    async fn launchctl(&self, args: &[&str]) -> Result<std::process::Output, SchedulerError> {
        Command::new(&self.launchctl)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    SchedulerError::Unsupported(format!(
                        "launchctl not found at {}",
                        self.launchctl.display()
                    ))
                } else {
                    SchedulerError::CommandFailed(e.to_string())
                }
            })
    }
}

#[async_trait]
impl SchedulerCtl for LaunchdScheduler {
    fn job_path(&self) -> PathBuf {
        self.plist_path.clone()
    }

    async fn write_job(&self, overwrite: bool) -> Result<(), SchedulerError> {
        if !overwrite && self.plist_path.exists() {
            return Err(SchedulerError::AlreadyExists(
                self.plist_path.display().to_string(),
            ));
        }
        if let Some(parent) = self.plist_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| SchedulerError::Io(e.to_string()))?;
        }
        fs::write(&self.plist_path, self.render_plist())
            .await
            .map_err(|e| SchedulerError::Io(e.to_string()))
    }

    async fn remove_job(&self) -> Result<(), SchedulerError> {
        match fs::remove_file(&self.plist_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SchedulerError::Io(e.to_string())),
        }
    }

    async fn load(&self) -> Result<(), SchedulerError> {
        let path = self.plist_path.to_string_lossy().to_string();
        let output = self.launchctl(&["load", "-w", &path]).await?;
        if !output.status.success() {
            return Err(SchedulerError::CommandFailed(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }
        Ok(())
    }

    async fn unload(&self) -> Result<(), SchedulerError> {
        let path = self.plist_path.to_string_lossy().to_string();
        // Non-zero exit just means the job was not loaded
        let _ = self.launchctl(&["unload", &path]).await?;
        Ok(())
    }

    async fn is_loaded(&self) -> Result<bool, SchedulerError> {
        let output = self.launchctl(&["list"]).await?;
        Ok(String::from_utf8_lossy(&output.stdout).contains(LAUNCHD_LABEL))
    }
}
