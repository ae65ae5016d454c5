//! The `KeyPair` asset: an Ed25519 key pair serialized as PEM.

use async_trait::async_trait;
use clusterkit_common::{Content, State};
use ed25519_dalek::SigningKey;
use ed25519_dalek::pkcs8::spki::der::pem::LineEnding;
use ed25519_dalek::pkcs8::{EncodePrivateKey, EncodePublicKey};
use rand::RngCore;
use rand::rngs::OsRng;

use crate::domain::{Asset, AssetError, AssetId, Generation, ParentStates, asset_file_path};

/// Generates a private/public key pair.
///
/// The state holds two contents, in order: the private key as PKCS#8 PEM
/// under `tls/<private_key_file>` and the public key as SPKI PEM under
/// `tls/<public_key_file>`.
#[derive(Debug, Clone)]
pub struct KeyPair {
    pub private_key_file: String,
    pub public_key_file: String,
}

impl KeyPair {
    pub fn new(private_key_file: impl Into<String>, public_key_file: impl Into<String>) -> Self {
        Self {
            private_key_file: private_key_file.into(),
            public_key_file: public_key_file.into(),
        }
    }

    /// Generate the pair from a caller-supplied entropy source.
    ///
    /// # Errors
    ///
    /// Fails if an output name is invalid, the entropy source fails, or
    /// either half cannot be encoded. Nothing is returned on failure.
    pub fn generate_with(&self, rng: &mut impl RngCore) -> Result<State, AssetError> {
        let private_name = asset_file_path(&self.private_key_file)?;
        let public_name = asset_file_path(&self.public_key_file)?;

        let mut seed = [0u8; ed25519_dalek::SECRET_KEY_LENGTH];
        rng.try_fill_bytes(&mut seed)
            .map_err(|e| AssetError::KeyGeneration(Box::new(e)))?;
        let key = SigningKey::from_bytes(&seed);
        seed.fill(0);

        let private_pem = key
            .to_pkcs8_pem(LineEnding::LF)
            .map_err(|e| AssetError::KeyEncoding {
                half: "private",
                source: Box::new(e),
            })?;
        let public_pem = key
            .verifying_key()
            .to_public_key_pem(LineEnding::LF)
            .map_err(|e| AssetError::KeyEncoding {
                half: "public",
                source: Box::new(e),
            })?;

        Ok(State::from_contents(vec![
            Content::new(private_name, private_pem.as_bytes()),
            Content::new(public_name, public_pem),
        ])?)
    }
}

#[async_trait(?Send)]
impl Asset for KeyPair {
    fn name(&self) -> String {
        format!("Key Pair ({})", self.public_key_file)
    }

    fn dependencies(&self) -> Vec<AssetId> {
        Vec::new()
    }

    async fn generate(&self, _parents: &ParentStates<'_>) -> Generation {
        self.generate_with(&mut OsRng).into()
    }
}
