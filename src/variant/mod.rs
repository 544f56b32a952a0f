//! Runtime binary variant resolution.
//!
//! A variant is one published binary of the runtime family: a CPU
//! architecture paired with an SDK feature set, at a given release version.
//! [`resolve`] turns that selection into the canonical binary identifier,
//! the release-asset download URL, and the ECMAScript target level the
//! bundler should emit for that runtime version.
//!
//! Resolution is a pure function of its inputs: no IO, no error paths
//! (every selector has a defined default).

use std::fmt;

/// Release base for the default binary family.
pub const DEFAULT_RELEASE_BASE: &str = "https://github.com/awslabs/llrt/releases";

/// Name prefix shared by every published binary of the default family.
pub const DEFAULT_FAMILY: &str = "llrt-lambda";

/// Runtime versions at or above this tag ship an interpreter that accepts
/// ES2023 syntax. Comparison is lexicographic on the raw tag string.
//
// TODO: switch to a semantic comparison before the release line can
// plausibly tag a two-digit minor ("v0.10.0" sorts below "v0.2.0-beta").
const MODERN_TARGET_SINCE: &str = "v0.2.0-beta";

/// Where runtime binaries are published.
///
/// Defaults to the LLRT GitHub release line; both fields are plain values so
/// a mirror or a fork can be injected without touching the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinarySource {
    /// Base URL of the release line, without a trailing slash.
    pub release_base: String,
    /// Binary name prefix, e.g. `llrt-lambda`.
    pub family: String,
}

impl Default for BinarySource {
    fn default() -> Self {
        Self {
            release_base: DEFAULT_RELEASE_BASE.to_string(),
            family: DEFAULT_FAMILY.to_string(),
        }
    }
}

/// A runtime release selector: the floating `latest` or a concrete tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum VersionSpec {
    /// Track the newest published release.
    #[default]
    Latest,
    /// A concrete release tag, e.g. `v0.2.0-beta`.
    Tag(String),
}

impl VersionSpec {
    /// Parse a version string; `"latest"` selects the floating release.
    pub fn parse(s: &str) -> Self {
        if s == "latest" {
            Self::Latest
        } else {
            Self::Tag(s.to_string())
        }
    }

    /// The raw selector string (`"latest"` or the tag).
    pub fn as_str(&self) -> &str {
        match self {
            Self::Latest => "latest",
            Self::Tag(tag) => tag,
        }
    }

    /// Whether this selector tracks the floating release.
    pub fn is_latest(&self) -> bool {
        matches!(self, Self::Latest)
    }

    /// Whether this version is at or above `floor`.
    ///
    /// `Latest` is always at least any floor. Tags compare lexicographically
    /// on the raw string, matching how the release line documents ordering.
    pub fn at_least(&self, floor: &str) -> bool {
        match self {
            Self::Latest => true,
            Self::Tag(tag) => tag.as_str() >= floor,
        }
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for VersionSpec {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

/// CPU architecture of the build target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Architecture {
    /// 64-bit ARM (Graviton).
    Arm64,
    /// 64-bit x86.
    #[default]
    X64,
}

impl Architecture {
    /// Map a platform string to an architecture.
    ///
    /// Anything that is not recognizably ARM resolves to [`Architecture::X64`].
    pub fn from_platform(platform: &str) -> Self {
        match platform {
            "arm64" | "aarch64" => Self::Arm64,
            _ => Self::X64,
        }
    }

    /// Token used in binary identifiers and cache paths.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Arm64 => "arm64",
            Self::X64 => "x64",
        }
    }
}

/// Which SDK dependency set is embedded in the runtime binary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum FeatureSet {
    /// Entire SDK embedded.
    Full,
    /// No SDK embedded; handlers bundle their own clients.
    None,
    /// The curated standard subset of SDK clients.
    #[default]
    Standard,
}

impl FeatureSet {
    /// Binary identifier suffix; the standard set is the unsuffixed build.
    pub fn suffix(&self) -> Option<&'static str> {
        match self {
            Self::Full => Some("full-sdk"),
            Self::None => Some("no-sdk"),
            Self::Standard => None,
        }
    }

    /// Token used as a cache path segment.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Full => "full-sdk",
            Self::None => "no-sdk",
            Self::Standard => "standard",
        }
    }
}

/// ECMAScript level the bundler should emit for a runtime version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EsTarget {
    /// Conservative output for runtimes predating ES2023 support.
    Es2020,
    /// Modern output for current runtimes.
    Es2023,
}

impl EsTarget {
    /// The bundler-facing target name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Es2020 => "es2020",
            Self::Es2023 => "es2023",
        }
    }
}

/// A fully resolved binary variant, ready for the cache and the composer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVariant {
    /// Release selector the variant was resolved for.
    pub version: VersionSpec,
    /// Target CPU architecture.
    pub architecture: Architecture,
    /// Embedded SDK feature set.
    pub feature_set: FeatureSet,
    /// Canonical binary name, e.g. `llrt-lambda-arm64-full-sdk`.
    pub identifier: String,
    /// Release-asset URL of the zip payload.
    pub download_url: String,
    /// ECMAScript level this runtime version accepts.
    pub es_target: EsTarget,
}

/// Resolve a (version, architecture, feature-set) selection to its variant.
///
/// Identical inputs always yield the identical identifier and URL.
pub fn resolve(
    source: &BinarySource,
    version: &VersionSpec,
    architecture: Architecture,
    feature_set: FeatureSet,
) -> ResolvedVariant {
    let mut identifier = format!("{}-{}", source.family, architecture.token());
    if let Some(suffix) = feature_set.suffix() {
        identifier.push('-');
        identifier.push_str(suffix);
    }

    let download_url = match version {
        VersionSpec::Latest => {
            format!("{}/latest/download/{}.zip", source.release_base, identifier)
        }
        VersionSpec::Tag(tag) => {
            format!("{}/download/{}/{}.zip", source.release_base, tag, identifier)
        }
    };

    let es_target = if version.at_least(MODERN_TARGET_SINCE) {
        EsTarget::Es2023
    } else {
        EsTarget::Es2020
    };

    ResolvedVariant {
        version: version.clone(),
        architecture,
        feature_set,
        identifier,
        download_url,
        es_target,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_for_standard_set_has_no_suffix() {
        let v = resolve(
            &BinarySource::default(),
            &VersionSpec::Latest,
            Architecture::Arm64,
            FeatureSet::Standard,
        );
        assert_eq!(v.identifier, "llrt-lambda-arm64");
    }

    #[test]
    fn identifier_includes_feature_suffix() {
        let full = resolve(
            &BinarySource::default(),
            &VersionSpec::Latest,
            Architecture::X64,
            FeatureSet::Full,
        );
        assert_eq!(full.identifier, "llrt-lambda-x64-full-sdk");

        let none = resolve(
            &BinarySource::default(),
            &VersionSpec::Latest,
            Architecture::X64,
            FeatureSet::None,
        );
        assert_eq!(none.identifier, "llrt-lambda-x64-no-sdk");
    }

    #[test]
    fn latest_url_uses_floating_release_path() {
        let v = resolve(
            &BinarySource::default(),
            &VersionSpec::Latest,
            Architecture::Arm64,
            FeatureSet::Standard,
        );
        assert_eq!(
            v.download_url,
            "https://github.com/awslabs/llrt/releases/latest/download/llrt-lambda-arm64.zip"
        );
    }

    #[test]
    fn tagged_url_pins_the_release() {
        let v = resolve(
            &BinarySource::default(),
            &VersionSpec::parse("v0.1.0"),
            Architecture::X64,
            FeatureSet::Full,
        );
        assert_eq!(
            v.download_url,
            "https://github.com/awslabs/llrt/releases/download/v0.1.0/llrt-lambda-x64-full-sdk.zip"
        );
    }

    #[test]
    fn resolve_is_deterministic() {
        let source = BinarySource::default();
        let a = resolve(
            &source,
            &VersionSpec::parse("v0.2.0"),
            Architecture::Arm64,
            FeatureSet::Full,
        );
        let b = resolve(
            &source,
            &VersionSpec::parse("v0.2.0"),
            Architecture::Arm64,
            FeatureSet::Full,
        );
        assert_eq!(a, b);
    }

    #[test]
    fn custom_source_feeds_identifier_and_url() {
        let source = BinarySource {
            release_base: "https://mirror.example.com/releases".into(),
            family: "quick-lambda".into(),
        };
        let v = resolve(
            &source,
            &VersionSpec::Latest,
            Architecture::X64,
            FeatureSet::Standard,
        );
        assert_eq!(v.identifier, "quick-lambda-x64");
        assert_eq!(
            v.download_url,
            "https://mirror.example.com/releases/latest/download/quick-lambda-x64.zip"
        );
    }

    #[test]
    fn latest_selects_modern_target() {
        let v = resolve(
            &BinarySource::default(),
            &VersionSpec::Latest,
            Architecture::X64,
            FeatureSet::Standard,
        );
        assert_eq!(v.es_target, EsTarget::Es2023);
    }

    #[test]
    fn recent_tag_selects_modern_target() {
        let v = resolve(
            &BinarySource::default(),
            &VersionSpec::parse("v0.3.0"),
            Architecture::X64,
            FeatureSet::Standard,
        );
        assert_eq!(v.es_target, EsTarget::Es2023);
    }

    #[test]
    fn threshold_tag_selects_modern_target() {
        let v = resolve(
            &BinarySource::default(),
            &VersionSpec::parse("v0.2.0-beta"),
            Architecture::X64,
            FeatureSet::Standard,
        );
        assert_eq!(v.es_target, EsTarget::Es2023);
    }

    #[test]
    fn old_tag_selects_legacy_target() {
        let v = resolve(
            &BinarySource::default(),
            &VersionSpec::parse("v0.1.0"),
            Architecture::X64,
            FeatureSet::Standard,
        );
        assert_eq!(v.es_target, EsTarget::Es2020);
    }

    #[test]
    fn version_parse_roundtrip() {
        assert_eq!(VersionSpec::parse("latest"), VersionSpec::Latest);
        assert_eq!(
            VersionSpec::parse("v0.2.0-beta"),
            VersionSpec::Tag("v0.2.0-beta".into())
        );
        assert_eq!(VersionSpec::parse("v0.2.0-beta").to_string(), "v0.2.0-beta");
        assert_eq!(VersionSpec::Latest.to_string(), "latest");
    }

    #[test]
    fn version_comparison_is_lexicographic() {
        assert!(!VersionSpec::parse("v0.2.0").at_least("v0.2.0-beta"));
        assert!(VersionSpec::parse("v0.2.1").at_least("v0.2.0-beta"));
        assert!(VersionSpec::Latest.at_least("v0.2.0-beta"));
        // The documented shortcut: a two-digit minor sorts low.
        assert!(!VersionSpec::parse("v0.10.0").at_least("v0.2.0-beta"));
    }

    #[test]
    fn architecture_from_platform() {
        assert_eq!(Architecture::from_platform("arm64"), Architecture::Arm64);
        assert_eq!(Architecture::from_platform("aarch64"), Architecture::Arm64);
        assert_eq!(Architecture::from_platform("x86_64"), Architecture::X64);
        assert_eq!(Architecture::from_platform(""), Architecture::X64);
    }

    #[test]
    fn defaults_are_x64_standard_latest() {
        assert_eq!(Architecture::default(), Architecture::X64);
        assert_eq!(FeatureSet::default(), FeatureSet::Standard);
        assert_eq!(VersionSpec::default(), VersionSpec::Latest);
    }

    #[test]
    fn feature_tokens_are_distinct() {
        assert_eq!(FeatureSet::Full.token(), "full-sdk");
        assert_eq!(FeatureSet::None.token(), "no-sdk");
        assert_eq!(FeatureSet::Standard.token(), "standard");
    }
}
