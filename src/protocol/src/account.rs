//! Signing accounts recovered from mnemonics.

use crate::address::Address;
use crate::errors::ProtocolError;
use crate::mnemonic;
use crate::transaction::{SignedTransaction, Transaction};
use crate::types::KEY_LEN;
use ed25519_dalek::{Signer, SigningKey};
use std::fmt;

/// An account able to sign transactions.
pub struct Account {
    signing_key: SigningKey,
}

impl Account {
    /// Recovers an account from its 25-word mnemonic.
    pub fn from_mnemonic(phrase: &str) -> Result<Self, ProtocolError> {
        let seed = mnemonic::to_private_key(phrase)?;
        Ok(Self::from_seed(&seed))
    }

    /// Creates an account from a 32-byte ed25519 seed.
    pub fn from_seed(seed: &[u8; KEY_LEN]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Gets the address of the account.
    pub fn address(&self) -> Address {
        Address::from_public_key(self.signing_key.verifying_key().to_bytes())
    }

    /// Gets the mnemonic of the account.
    pub fn mnemonic(&self) -> String {
        mnemonic::from_key(&self.signing_key.to_bytes())
    }

    /// Signs a transaction.
    ///
    /// Fails if the transaction sender is not this account.
    pub fn sign_transaction(&self, transaction: Transaction) -> Result<SignedTransaction, ProtocolError> {
        if transaction.sender != self.address() {
            return Err(ProtocolError::InvalidTransaction(format!(
                "sender {} does not match signing account {}",
                transaction.sender,
                self.address()
            )));
        }

        let signature = self.signing_key.sign(&transaction.bytes_to_sign()?);
        Ok(SignedTransaction {
            transaction,
            signature: signature.to_bytes(),
        })
    }
}

// Never print key material.
impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("address", &self.address().to_string())
            .finish()
    }
}
