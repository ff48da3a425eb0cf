use rustls::crypto::CryptoProvider;

pub struct Crypto;

impl Crypto {
    /// Installs `ring` as the process wide crypto provider unless one is already installed.
    pub fn install_crypto_provider() -> anyhow::Result<()> {
        if CryptoProvider::get_default().is_some() {
            return Ok(());
        }

        // fails when another thread installed a provider first
        let _ = rustls::crypto::ring::default_provider().install_default();

        match CryptoProvider::get_default() {
            Some(_) => Ok(()),
            None => Err(anyhow::anyhow!("no crypto provider installed")),
        }
    }
}
