// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet challenge-signature verification.
//!
//! Binding a wallet to an account requires proving control of the address:
//! the client signs a fixed challenge string with the wallet key
//! (EIP-191 personal message, what browser wallets produce for
//! `personal_sign`) and the server recovers the signer address from the
//! signature.
//!
//! Every failure mode collapses to `false`; callers only learn
//! "not verified".

use alloy::primitives::{Address, Signature};

/// Recovers challenge signers and compares them to claimed addresses.
#[derive(Debug, Clone)]
pub struct ChallengeVerifier {
    network: String,
}

impl ChallengeVerifier {
    /// Create a verifier labelling challenges for the given network.
    pub fn new(network: impl Into<String>) -> Self {
        Self {
            network: network.into(),
        }
    }

    /// The challenge string a wallet must sign to prove control of
    /// `wallet_address`. Built from the address exactly as the client
    /// supplied it; the client signs the same text.
    pub fn challenge(&self, wallet_address: &str) -> String {
        format!("Auth for {wallet_address} ({})", self.network)
    }

    /// Verify that `signature` is a valid signature over the challenge for
    /// `wallet_address` by the key controlling that address.
    ///
    /// Address comparison is case-insensitive (canonical address equality).
    pub fn verify(&self, wallet_address: &str, signature: &str) -> bool {
        let Ok(claimed) = wallet_address.parse::<Address>() else {
            tracing::debug!(wallet_address, "unparseable wallet address");
            return false;
        };

        let Ok(raw) = alloy::hex::decode(signature) else {
            tracing::debug!("unparseable signature hex");
            return false;
        };
        let Ok(signature) = Signature::from_raw(&raw) else {
            tracing::debug!("malformed signature bytes");
            return false;
        };

        let message = self.challenge(wallet_address);
        match signature.recover_address_from_msg(message.as_bytes()) {
            Ok(recovered) => recovered == claimed,
            Err(e) => {
                tracing::debug!(error = %e, "signer recovery failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::signers::{local::PrivateKeySigner, SignerSync};

    fn verifier() -> ChallengeVerifier {
        ChallengeVerifier::new("Testnet")
    }

    fn sign_challenge(signer: &PrivateKeySigner, address: &str) -> String {
        let message = verifier().challenge(address);
        let signature = signer.sign_message_sync(message.as_bytes()).unwrap();
        alloy::hex::encode(signature.as_bytes())
    }

    #[test]
    fn challenge_embeds_address_and_network() {
        let v = ChallengeVerifier::new("Testnet");
        assert_eq!(v.challenge("0xabc"), "Auth for 0xabc (Testnet)");
    }

    #[test]
    fn sign_then_verify_succeeds_for_signing_address() {
        let signer = PrivateKeySigner::random();
        let address = signer.address().to_string();
        let signature = sign_challenge(&signer, &address);

        assert!(verifier().verify(&address, &signature));
    }

    #[test]
    fn verify_accepts_zero_x_prefixed_signature() {
        let signer = PrivateKeySigner::random();
        let address = signer.address().to_string();
        let signature = format!("0x{}", sign_challenge(&signer, &address));

        assert!(verifier().verify(&address, &signature));
    }

    #[test]
    fn address_comparison_is_case_insensitive() {
        let signer = PrivateKeySigner::random();
        // Client supplies and signs the lowercase form; the recovered
        // (checksummed) address still matches it.
        let address = signer.address().to_string().to_lowercase();
        let signature = sign_challenge(&signer, &address);

        assert!(verifier().verify(&address, &signature));
    }

    #[test]
    fn verify_fails_for_different_address() {
        let signer = PrivateKeySigner::random();
        let other = PrivateKeySigner::random();

        let claimed = other.address().to_string();
        let message = verifier().challenge(&claimed);
        let signature = signer.sign_message_sync(message.as_bytes()).unwrap();

        assert!(!verifier().verify(&claimed, &alloy::hex::encode(signature.as_bytes())));
    }

    #[test]
    fn verify_fails_for_mutated_signature() {
        let signer = PrivateKeySigner::random();
        let address = signer.address().to_string();
        let mut signature = sign_challenge(&signer, &address);

        // Flip one nibble in the r component
        let mutated = if signature.as_bytes()[7] == b'0' { "1" } else { "0" };
        signature.replace_range(7..8, mutated);

        assert!(!verifier().verify(&address, &signature));
    }

    #[test]
    fn verify_fails_on_garbage_inputs() {
        let v = verifier();
        assert!(!v.verify("not-an-address", "00"));
        assert!(!v.verify("0x0000000000000000000000000000000000000001", "zz"));
        assert!(!v.verify("0x0000000000000000000000000000000000000001", "0011"));
    }

    #[test]
    fn verify_fails_for_different_network_label() {
        let signer = PrivateKeySigner::random();
        let address = signer.address().to_string();
        // Signed for Testnet, verified against Mainnet
        let signature = sign_challenge(&signer, &address);

        assert!(!ChallengeVerifier::new("Mainnet").verify(&address, &signature));
    }
}
