/// Wire protocol version announced in the `hello` envelope.
pub const CLIENT_PROTOCOL_VERSION: u32 = 1;

/// Identity this client announces once per successful connection open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIdentity {
    pub device_name: String,
    pub client_version: u32,
    pub app_version: u32,
    pub app_version_code: String,
}

impl ClientIdentity {
    /// Build an identity from a device name and a semver-like version string.
    ///
    /// `app_version` encodes `major.minor.patch` as `major * 10000 + minor * 100 + patch`;
    /// unparsable components count as zero.
    pub fn new(device_name: impl Into<String>, version: &str) -> Self {
        Self {
            device_name: device_name.into(),
            client_version: CLIENT_PROTOCOL_VERSION,
            app_version: numeric_version(version),
            app_version_code: version.to_string(),
        }
    }
}

fn numeric_version(version: &str) -> u32 {
    let mut parts = version
        .split(['.', '-', '+'])
        .map(|p| p.parse::<u32>().unwrap_or(0));
    let major = parts.next().unwrap_or(0);
    let minor = parts.next().unwrap_or(0);
    let patch = parts.next().unwrap_or(0);
    major
        .saturating_mul(10_000)
        .saturating_add(minor.min(99) * 100)
        .saturating_add(patch.min(99))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_semver_as_number() {
        let identity = ClientIdentity::new("desk", "1.2.3");

        assert_eq!(identity.app_version, 10203);
        assert_eq!(identity.app_version_code, "1.2.3");
        assert_eq!(identity.client_version, CLIENT_PROTOCOL_VERSION);
    }

    #[test]
    fn prerelease_suffix_is_ignored() {
        assert_eq!(numeric_version("0.1.0-beta.1"), 100);
    }

    #[test]
    fn garbage_version_is_zero() {
        assert_eq!(numeric_version("dev"), 0);
    }
}
