use thiserror::Error;

/// Platforms the bundled decoders recognize.
///
/// Centralizes platform identity (the `platform` field value, short names
/// for the CLI, manufacturer and aliases) so decoders never hand-write the
/// strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Mega Drive / Genesis cartridges, plus Sega CD and 32X media
    MegaDrive,
    Saturn,
    Dreamcast,
    /// Any ISO 9660 / ECMA-167 / CD-i volume
    GenericDisc,
}

/// All platform variants in default registration order.
const ALL_PLATFORMS: &[Platform] = &[
    Platform::Dreamcast,
    Platform::Saturn,
    Platform::MegaDrive,
    Platform::GenericDisc,
];

impl Platform {
    /// Canonical short name used for CLI arguments.
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::MegaDrive => "megadrive",
            Self::Saturn => "saturn",
            Self::Dreamcast => "dreamcast",
            Self::GenericDisc => "disc",
        }
    }

    /// Value of the `platform` field in decoded output.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::MegaDrive => "Mega Drive",
            Self::Saturn => "Saturn",
            Self::Dreamcast => "Dreamcast",
            Self::GenericDisc => "Generic Disc",
        }
    }

    pub fn manufacturer(&self) -> &'static str {
        match self {
            Self::MegaDrive | Self::Saturn | Self::Dreamcast => "Sega",
            Self::GenericDisc => "",
        }
    }

    /// All accepted names for this platform (case-insensitive matching).
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::MegaDrive => &[
                "megadrive",
                "mega drive",
                "genesis",
                "md",
                "segacd",
                "megacd",
                "32x",
            ],
            Self::Saturn => &["saturn", "sega saturn", "ss"],
            Self::Dreamcast => &["dreamcast", "dc"],
            Self::GenericDisc => &["disc", "iso", "generic"],
        }
    }

    pub fn all() -> &'static [Platform] {
        ALL_PLATFORMS
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A name that matches no platform alias.
#[derive(Debug, Clone, Error)]
#[error("unknown platform: '{0}'")]
pub struct PlatformParseError(pub String);

impl std::str::FromStr for Platform {
    type Err = PlatformParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        ALL_PLATFORMS
            .iter()
            .copied()
            .find(|p| p.aliases().contains(&lower.as_str()))
            .ok_or_else(|| PlatformParseError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_names_round_trip() {
        for &platform in Platform::all() {
            let parsed: Platform = platform.short_name().parse().unwrap();
            assert_eq!(parsed, platform, "round-trip failed for {:?}", platform);
        }
    }

    #[test]
    fn short_name_is_first_alias() {
        for &platform in Platform::all() {
            assert_eq!(platform.short_name(), platform.aliases()[0]);
        }
    }

    #[test]
    fn aliases_are_case_insensitive() {
        assert_eq!("Genesis".parse::<Platform>().unwrap(), Platform::MegaDrive);
        assert_eq!("DC".parse::<Platform>().unwrap(), Platform::Dreamcast);
        assert!("commodore64".parse::<Platform>().is_err());
    }

    #[test]
    fn display_is_platform_field_value() {
        assert_eq!(Platform::MegaDrive.to_string(), "Mega Drive");
        assert_eq!(Platform::GenericDisc.to_string(), "Generic Disc");
    }
}
