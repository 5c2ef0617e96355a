//! System setup verification for the command-line backends.
//!
//! Checks that BlueZ is running and that the external tools the default
//! backends shell out to are installed.

use tokio::process::Command;

use wakeplay_core::process::is_installed;

/// Status of a system component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentStatus {
    /// Component is installed and running.
    Ok,
    /// Component is installed but not running.
    NotRunning,
    /// Component is not installed.
    NotInstalled,
}

/// A single setup issue with suggested fix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupIssue {
    pub description: String,
    pub fix_command: Option<String>,
    /// Whether runs fail outright without this component.
    pub required: bool,
}

/// Overall system setup status.
#[derive(Debug, Clone)]
pub struct SetupStatus {
    pub bluez: ComponentStatus,
    pub issues: Vec<SetupIssue>,
    /// No required component is missing.
    pub ready: bool,
}

impl SetupStatus {
    pub fn summary(&self) -> String {
        if self.issues.is_empty() {
            "System is ready".to_string()
        } else if self.ready {
            format!("{} optional component(s) missing", self.issues.len())
        } else {
            format!("{} issue(s) found", self.issues.len())
        }
    }
}

/// An external tool a backend depends on. Each one only degrades a stage.
struct Tool {
    name: &'static str,
    package: &'static str,
    purpose: &'static str,
}

const TOOLS: &[Tool] = &[
    Tool {
        name: "sdptool",
        package: "bluez-deprecated-tools",
        purpose: "link nudge",
    },
    Tool {
        name: "playerctl",
        package: "playerctl",
        purpose: "media sessions",
    },
    Tool {
        name: "xdg-open",
        package: "xdg-utils",
        purpose: "application launch",
    },
    Tool {
        name: "xdotool",
        package: "xdotool",
        purpose: "media key fallback",
    },
    Tool {
        name: "pactl",
        package: "pulseaudio-utils",
        purpose: "volume control",
    },
    Tool {
        name: "paplay",
        package: "pulseaudio-utils",
        purpose: "test sound",
    },
];

/// System setup verification.
pub struct SystemSetup;

impl SystemSetup {
    /// Check system setup status.
    pub async fn check() -> SetupStatus {
        let bluez = Self::check_bluez().await;

        let mut missing = Vec::new();
        for tool in TOOLS {
            if !is_installed(tool.name).await {
                missing.push(tool);
            }
        }

        Self::evaluate(bluez, &missing)
    }

    fn evaluate(bluez: ComponentStatus, missing: &[&Tool]) -> SetupStatus {
        let mut issues = Vec::new();

        match bluez {
            ComponentStatus::Ok => {}
            ComponentStatus::NotInstalled => issues.push(SetupIssue {
                description: "BlueZ is not installed".to_string(),
                fix_command: Some("sudo apt install bluez".to_string()),
                required: true,
            }),
            ComponentStatus::NotRunning => issues.push(SetupIssue {
                description: "Bluetooth service is not running".to_string(),
                fix_command: Some("sudo systemctl start bluetooth".to_string()),
                required: true,
            }),
        }

        for tool in missing {
            issues.push(SetupIssue {
                description: format!("{} is not installed ({})", tool.name, tool.purpose),
                fix_command: Some(format!("sudo apt install {}", tool.package)),
                required: false,
            });
        }

        let ready = !issues.iter().any(|i| i.required);
        SetupStatus {
            bluez,
            issues,
            ready,
        }
    }

    async fn check_bluez() -> ComponentStatus {
        if !is_installed("bluetoothctl").await {
            return ComponentStatus::NotInstalled;
        }

        let running = Command::new("systemctl")
            .args(["is-active", "--quiet", "bluetooth"])
            .status()
            .await
            .map(|s| s.success())
            .unwrap_or(false);

        if running {
            ComponentStatus::Ok
        } else {
            ComponentStatus::NotRunning
        }
    }
}
