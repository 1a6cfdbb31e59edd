//! Process-wide rustls crypto provider.

use std::sync::Once;

use tracing::debug;

static INSTALL: Once = Once::new();

/// Install ring as the process default provider unless one is already set.
///
/// rustls refuses to build a client config without a default provider, so
/// this runs before the first `wss://` dial.
pub fn ensure_crypto_provider() {
    INSTALL.call_once(|| {
        if rustls::crypto::ring::default_provider()
            .install_default()
            .is_err()
        {
            debug!("rustls crypto provider already installed");
        }
    });
}
