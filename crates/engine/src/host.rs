//! Host description labels shown next to the game list.
//!
//! These are display strings only: the launcher's own version, the OS the
//! process runs on, and process/OS bitness.

/// Application name used in the launcher version label.
pub const DEFAULT_APP_NAME: &str = "CC Magic";

/// Four-part launcher version (`major.minor.build.revision`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct LauncherVersion {
    pub major: u32,
    pub minor: u32,
    pub build: u32,
    pub revision: u32,
}

impl LauncherVersion {
    /// Parses a dotted version string.
    ///
    /// Missing trailing parts default to 0 and any `-pre`/`+meta` suffix is
    /// ignored, so Cargo package versions parse as well as four-part ones.
    /// Returns `None` for empty input, non-numeric parts or more than four
    /// parts.
    pub fn parse(s: &str) -> Option<Self> {
        let core = s.trim().split(['-', '+']).next().unwrap_or_default();
        if core.is_empty() {
            return None;
        }

        let mut parts = [0u32; 4];
        let mut count = 0;
        for piece in core.split('.') {
            if count == parts.len() {
                return None;
            }
            parts[count] = piece.parse().ok()?;
            count += 1;
        }

        Some(Self {
            major: parts[0],
            minor: parts[1],
            build: parts[2],
            revision: parts[3],
        })
    }

    /// Formats the launcher label, e.g. `CC Magic [1.2r4 Build: 3]`.
    pub fn label(&self, app_name: &str) -> String {
        format!(
            "{app_name} [{}.{}r{} Build: {}]",
            self.major, self.minor, self.revision, self.build
        )
    }
}

/// Host labels computed once when the engine is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostInfo {
    pub launcher_version: String,
    pub os_version: String,
    pub platform_bitness: String,
}

impl HostInfo {
    /// Detects OS labels for the running process.
    pub fn detect(app_name: &str, version: LauncherVersion) -> Self {
        Self {
            launcher_version: version.label(app_name),
            os_version: os_version(),
            platform_bitness: platform_bitness(),
        }
    }
}

impl Default for HostInfo {
    fn default() -> Self {
        let version = LauncherVersion::parse(env!("CARGO_PKG_VERSION")).unwrap_or_default();
        Self::detect(DEFAULT_APP_NAME, version)
    }
}

/// Returns the OS name and CPU architecture, e.g. `Ubuntu 24.04 LTS (x86_64)`.
pub fn os_version() -> String {
    format!("{} ({})", os_pretty_name(), std::env::consts::ARCH)
}

/// Returns e.g. `64-bit Application on 64-bit Linux`.
pub fn platform_bitness() -> String {
    let process_64 = cfg!(target_pointer_width = "64");
    bitness_label(process_64, os_is_64bit(process_64), os_family())
}

fn bitness_label(process_64: bool, os_64: bool, family: &str) -> String {
    let bits = |is_64: bool| if is_64 { "64-bit" } else { "32-bit" };
    format!("{} Application on {} {family}", bits(process_64), bits(os_64))
}

fn os_family() -> &'static str {
    match std::env::consts::OS {
        "windows" => "Windows",
        "linux" => "Linux",
        "macos" => "macOS",
        "freebsd" => "FreeBSD",
        other => other,
    }
}

#[cfg(target_os = "linux")]
fn os_pretty_name() -> String {
    std::fs::read_to_string("/etc/os-release")
        .ok()
        .and_then(|content| pretty_name_from_os_release(&content))
        .unwrap_or_else(|| os_family().to_string())
}

#[cfg(not(target_os = "linux"))]
fn os_pretty_name() -> String {
    os_family().to_string()
}

/// Extracts `PRETTY_NAME` from `/etc/os-release` content.
fn pretty_name_from_os_release(content: &str) -> Option<String> {
    content
        .lines()
        .find_map(|line| line.trim().strip_prefix("PRETTY_NAME="))
        .map(|value| value.trim_matches(|c| c == '"' || c == '\'').to_string())
        .filter(|name| !name.is_empty())
}

#[cfg(target_os = "windows")]
fn os_is_64bit(process_64: bool) -> bool {
    // A 32-bit process under WOW64 sees the native architecture here.
    process_64 || std::env::var_os("PROCESSOR_ARCHITEW6432").is_some()
}

#[cfg(target_os = "linux")]
fn os_is_64bit(process_64: bool) -> bool {
    process_64
        || std::fs::read_to_string("/proc/sys/kernel/arch")
            .map(|arch| arch.trim().ends_with("64"))
            .unwrap_or(false)
}

#[cfg(not(any(target_os = "windows", target_os = "linux")))]
fn os_is_64bit(process_64: bool) -> bool {
    process_64
}
