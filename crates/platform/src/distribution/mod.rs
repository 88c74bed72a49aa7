//! Published binary distributions and host platform detection

use std::fmt;

/// Base name of the native executable.
pub const BINARY_NAME: &str = "gsoc2-cli";

/// Every platform a binary distribution is published for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformKey {
    Darwin,
    LinuxX64,
    LinuxI686,
    LinuxArm64,
    LinuxArm,
    Win32X64,
    Win32I686,
}

/// Companion package carrying the binary for one platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryDistribution {
    pub platform_key: PlatformKey,
    pub package_name: &'static str,
    /// Path of the executable inside the package
    pub subpath: &'static str,
}

/// Indexed by `PlatformKey as usize`.
pub static BINARY_DISTRIBUTIONS: [BinaryDistribution; 7] = [
    BinaryDistribution {
        platform_key: PlatformKey::Darwin,
        package_name: "@gsoc2/cli-darwin",
        subpath: "bin/gsoc2-cli",
    },
    BinaryDistribution {
        platform_key: PlatformKey::LinuxX64,
        package_name: "@gsoc2/cli-linux-x64",
        subpath: "bin/gsoc2-cli",
    },
    BinaryDistribution {
        platform_key: PlatformKey::LinuxI686,
        package_name: "@gsoc2/cli-linux-i686",
        subpath: "bin/gsoc2-cli",
    },
    BinaryDistribution {
        platform_key: PlatformKey::LinuxArm64,
        package_name: "@gsoc2/cli-linux-arm64",
        subpath: "bin/gsoc2-cli",
    },
    BinaryDistribution {
        platform_key: PlatformKey::LinuxArm,
        package_name: "@gsoc2/cli-linux-arm",
        subpath: "bin/gsoc2-cli",
    },
    BinaryDistribution {
        platform_key: PlatformKey::Win32X64,
        package_name: "@gsoc2/cli-win32-x64",
        subpath: "bin/gsoc2-cli.exe",
    },
    BinaryDistribution {
        platform_key: PlatformKey::Win32I686,
        package_name: "@gsoc2/cli-win32-i686",
        subpath: "bin/gsoc2-cli.exe",
    },
];

impl PlatformKey {
    pub const ALL: [PlatformKey; 7] = [
        Self::Darwin,
        Self::LinuxX64,
        Self::LinuxI686,
        Self::LinuxArm64,
        Self::LinuxArm,
        Self::Win32X64,
        Self::Win32I686,
    ];

    /// Map a host onto the published key space; `None` means unsupported.
    #[must_use]
    pub fn for_host(host: &HostPlatform) -> Option<Self> {
        match (&host.os, &host.arch) {
            (HostOs::Darwin, _) => Some(Self::Darwin),
            (HostOs::Linux | HostOs::FreeBsd, HostArch::X64) => Some(Self::LinuxX64),
            (HostOs::Linux | HostOs::FreeBsd, HostArch::X86 | HostArch::Ia32) => {
                Some(Self::LinuxI686)
            }
            (HostOs::Linux | HostOs::FreeBsd, HostArch::Arm64) => Some(Self::LinuxArm64),
            (HostOs::Linux | HostOs::FreeBsd, HostArch::Arm) => Some(Self::LinuxArm),
            (HostOs::Win32, HostArch::X64) => Some(Self::Win32X64),
            (HostOs::Win32, HostArch::X86 | HostArch::Ia32) => Some(Self::Win32I686),
            _ => None,
        }
    }

    #[must_use]
    pub fn distribution(self) -> &'static BinaryDistribution {
        &BINARY_DISTRIBUTIONS[self as usize]
    }
}

/// Operating system, named the way the companion packages name it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HostOs {
    Darwin,
    Linux,
    FreeBsd,
    Win32,
    Other(String),
}

impl HostOs {
    /// Accepts both Rust (`macos`, `windows`) and package (`darwin`,
    /// `win32`) spellings.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name {
            "darwin" | "macos" => Self::Darwin,
            "linux" => Self::Linux,
            "freebsd" => Self::FreeBsd,
            "win32" | "windows" => Self::Win32,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for HostOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Darwin => "darwin",
            Self::Linux => "linux",
            Self::FreeBsd => "freebsd",
            Self::Win32 => "win32",
            Self::Other(name) => name,
        })
    }
}

/// CPU architecture, named the way the companion packages name it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HostArch {
    X64,
    X86,
    Ia32,
    Arm64,
    Arm,
    Other(String),
}

impl HostArch {
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name {
            "x64" | "x86_64" => Self::X64,
            "x86" | "i686" => Self::X86,
            "ia32" => Self::Ia32,
            "arm64" | "aarch64" => Self::Arm64,
            "arm" => Self::Arm,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for HostArch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::X64 => "x64",
            Self::X86 => "x86",
            Self::Ia32 => "ia32",
            Self::Arm64 => "arm64",
            Self::Arm => "arm",
            Self::Other(name) => name,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostPlatform {
    pub os: HostOs,
    pub arch: HostArch,
}

impl HostPlatform {
    #[must_use]
    pub fn new(os: HostOs, arch: HostArch) -> Self {
        Self { os, arch }
    }

    /// The machine this process runs on
    #[must_use]
    pub fn current() -> Self {
        Self::new(
            HostOs::parse(std::env::consts::OS),
            HostArch::parse(std::env::consts::ARCH),
        )
    }

    #[must_use]
    pub fn platform_key(&self) -> Option<PlatformKey> {
        PlatformKey::for_host(self)
    }

    #[must_use]
    pub fn distribution(&self) -> Option<&'static BinaryDistribution> {
        self.platform_key().map(PlatformKey::distribution)
    }

    /// `gsoc2-cli`, with `.exe` on Windows
    #[must_use]
    pub fn executable_name(&self) -> String {
        if self.os == HostOs::Win32 {
            format!("{BINARY_NAME}.exe")
        } else {
            BINARY_NAME.to_string()
        }
    }
}

impl fmt::Display for HostPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os, self.arch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host(os: &str, arch: &str) -> HostPlatform {
        HostPlatform::new(HostOs::parse(os), HostArch::parse(arch))
    }

    #[test]
    fn test_table_is_indexed_by_key() {
        for key in PlatformKey::ALL {
            assert_eq!(key.distribution().platform_key, key);
        }
    }

    #[test]
    fn test_supported_hosts_map_to_documented_packages() {
        let cases = [
            ("darwin", "x64", "@gsoc2/cli-darwin", "bin/gsoc2-cli"),
            ("darwin", "arm64", "@gsoc2/cli-darwin", "bin/gsoc2-cli"),
            ("linux", "x64", "@gsoc2/cli-linux-x64", "bin/gsoc2-cli"),
            ("linux", "x86", "@gsoc2/cli-linux-i686", "bin/gsoc2-cli"),
            ("linux", "ia32", "@gsoc2/cli-linux-i686", "bin/gsoc2-cli"),
            ("linux", "arm64", "@gsoc2/cli-linux-arm64", "bin/gsoc2-cli"),
            ("linux", "arm", "@gsoc2/cli-linux-arm", "bin/gsoc2-cli"),
            ("freebsd", "x64", "@gsoc2/cli-linux-x64", "bin/gsoc2-cli"),
            ("freebsd", "arm64", "@gsoc2/cli-linux-arm64", "bin/gsoc2-cli"),
            ("win32", "x64", "@gsoc2/cli-win32-x64", "bin/gsoc2-cli.exe"),
            ("win32", "x86", "@gsoc2/cli-win32-i686", "bin/gsoc2-cli.exe"),
            ("win32", "ia32", "@gsoc2/cli-win32-i686", "bin/gsoc2-cli.exe"),
        ];

        for (os, arch, package, subpath) in cases {
            let dist = host(os, arch)
                .distribution()
                .unwrap_or_else(|| panic!("{os}/{arch} should be supported"));
            assert_eq!(dist.package_name, package, "{os}/{arch}");
            assert_eq!(dist.subpath, subpath, "{os}/{arch}");
        }
    }

    #[test]
    fn test_unsupported_hosts_have_no_distribution() {
        for (os, arch) in [
            ("win32", "arm64"),
            ("linux", "ppc64"),
            ("linux", "s390x"),
            ("aix", "x64"),
            ("openbsd", "x64"),
        ] {
            assert!(host(os, arch).distribution().is_none(), "{os}/{arch}");
        }
    }

    #[test]
    fn test_rust_names_are_normalized() {
        let h = host("macos", "aarch64");
        assert_eq!(h.to_string(), "darwin/arm64");
        assert_eq!(host("windows", "x86_64").executable_name(), "gsoc2-cli.exe");
        assert_eq!(host("linux", "x86_64").executable_name(), "gsoc2-cli");
    }
}
