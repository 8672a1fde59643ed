pub mod signature_verifier;

pub use signature_verifier::AcceptAllSignatureVerifier;
