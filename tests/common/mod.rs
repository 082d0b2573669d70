#![allow(dead_code)]
use async_trait::async_trait;
use ed25519_dalek::{Keypair, PublicKey, SecretKey, Signature, Signer, Verifier};
use serde_json::{json, Value};
use ssi_status_list::{
    create_credential, BitString, DocumentLoader, MapLoader, ProofSuite, ProofVerification,
    CREDENTIALS_V1_CONTEXT, STATUS_LIST_2021_V1_CONTEXT,
};

pub const ISSUER: &str = "did:example:issuer";
pub const REVOCATION_LIST: &str = "https://example.com/credentials/status/3";
pub const SUSPENSION_LIST: &str = "https://example.com/credentials/status/4";

pub const PROOF_TYPE: &str = "JcsEd25519Signature2020";

/// Signs documents with an Ed25519 key over their JCS canonical form.
pub struct Issuer {
    id: String,
    verification_method: String,
    keypair: Keypair,
}

impl Issuer {
    pub fn new(id: &str, seed: u8) -> Self {
        let secret = SecretKey::from_bytes(&[seed; 32]).unwrap();
        let public = PublicKey::from(&secret);
        Self {
            id: id.to_string(),
            verification_method: format!("{id}#key-1"),
            keypair: Keypair { secret, public },
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn verification_method(&self) -> &str {
        &self.verification_method
    }

    /// Verification method document served by the loader.
    pub fn key_document(&self) -> Value {
        json!({
            "id": self.verification_method,
            "type": "JsonWebKey2020",
            "controller": self.id,
            "publicKeyJwk": {
                "kty": "OKP",
                "crv": "Ed25519",
                "x": base64::encode_config(self.keypair.public.to_bytes(), base64::URL_SAFE_NO_PAD)
            }
        })
    }

    /// Replaces any existing proof with a fresh signature.
    pub fn sign(&self, mut document: Value) -> Value {
        document.as_object_mut().unwrap().remove("proof");
        let payload = serde_jcs::to_string(&document).unwrap();
        let signature = self.keypair.sign(payload.as_bytes());
        document["proof"] = json!({
            "type": PROOF_TYPE,
            "proofPurpose": "assertionMethod",
            "verificationMethod": self.verification_method,
            "proofValue": base64::encode_config(signature.to_bytes(), base64::URL_SAFE_NO_PAD)
        });
        document
    }

    /// Signed status list credential of 1024 bits with the given bits set.
    pub fn status_list(&self, url: &str, purpose: &str, set: &[usize]) -> Value {
        let mut list = BitString::new(1024).unwrap();
        for &i in set {
            list.set(i, true).unwrap();
        }
        let mut document = create_credential(url, &list, purpose)
            .unwrap()
            .to_value()
            .unwrap();
        document["issuer"] = json!(self.id);
        self.sign(document)
    }
}

/// Verifies [`PROOF_TYPE`] proofs, resolving the public key through the
/// document loader.
pub struct JcsEd25519;

#[async_trait]
impl ProofSuite for JcsEd25519 {
    async fn verify(&self, document: &Value, loader: &dyn DocumentLoader) -> ProofVerification {
        match verify_jcs(document, loader).await {
            Ok(()) => ProofVerification::verified(),
            Err(e) => ProofVerification::error(&e),
        }
    }
}

async fn verify_jcs(document: &Value, loader: &dyn DocumentLoader) -> Result<(), String> {
    let proof = document.get("proof").ok_or("Missing proof")?;
    if proof.get("type").and_then(Value::as_str) != Some(PROOF_TYPE) {
        return Err("Unsupported proof type".to_string());
    }
    let verification_method = proof
        .get("verificationMethod")
        .and_then(Value::as_str)
        .ok_or("Missing verification method")?;
    let key = loader
        .load(verification_method)
        .await
        .map_err(|e| e.to_string())?;
    let x = key["publicKeyJwk"]["x"]
        .as_str()
        .ok_or("Missing public key")?;
    let public_key_bytes =
        base64::decode_config(x, base64::URL_SAFE_NO_PAD).map_err(|e| e.to_string())?;
    let public_key = PublicKey::from_bytes(&public_key_bytes).map_err(|e| e.to_string())?;
    let proof_value = proof
        .get("proofValue")
        .and_then(Value::as_str)
        .ok_or("Missing proof value")?;
    let signature_bytes =
        base64::decode_config(proof_value, base64::URL_SAFE_NO_PAD).map_err(|e| e.to_string())?;
    let signature = Signature::try_from(signature_bytes.as_slice()).map_err(|e| e.to_string())?;

    let mut unsigned = document.clone();
    if let Some(object) = unsigned.as_object_mut() {
        object.remove("proof");
    }
    let payload = serde_jcs::to_string(&unsigned).map_err(|e| e.to_string())?;
    public_key
        .verify(payload.as_bytes(), &signature)
        .map_err(|_| "Invalid signature".to_string())
}

/// A suite that rejects everything.
pub struct Rejecting;

#[async_trait]
impl ProofSuite for Rejecting {
    async fn verify(&self, _: &Value, _: &dyn DocumentLoader) -> ProofVerification {
        ProofVerification::error("Unsupported proof type")
    }
}

pub fn entry(list: &str, purpose: &str, index: usize) -> Value {
    json!({
        "id": format!("{list}#{index}"),
        "type": "StatusList2021Entry",
        "statusPurpose": purpose,
        "statusListIndex": index.to_string(),
        "statusListCredential": list
    })
}

pub fn credential(issuer: Value, status: Value) -> Value {
    json!({
        "@context": [CREDENTIALS_V1_CONTEXT, STATUS_LIST_2021_V1_CONTEXT],
        "id": "urn:uuid:a63a60be-f4af-491c-87fc-2c8fd3007a58",
        "type": ["VerifiableCredential", "ExampleCredential"],
        "issuer": issuer,
        "issuanceDate": "2021-04-05T14:27:42Z",
        "credentialSubject": {"id": "did:example:subject"},
        "credentialStatus": status
    })
}

/// Loader serving the issuer's key and the given documents.
pub fn loader(issuer: &Issuer, documents: Vec<(&str, Value)>) -> MapLoader {
    documents.into_iter().fold(
        MapLoader::new().with_document(issuer.verification_method(), issuer.key_document()),
        |loader, (url, document)| loader.with_document(url, document),
    )
}

/// Loader serving the issuer's key and a revocation list.
pub fn loader_with(issuer: &Issuer, list: Value) -> MapLoader {
    loader(issuer, vec![(REVOCATION_LIST, list)])
}
