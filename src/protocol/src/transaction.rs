//! Payment transactions and their canonical encoding.

use crate::address::Address;
use crate::errors::ProtocolError;
use crate::msgpack::{self, Reader};
use crate::types::{sha512_256, MicroAlgos, Round, KEY_LEN, MIN_TXN_FEE, SIGNATURE_LEN};
use data_encoding::BASE32_NOPAD;
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use tracing::debug;

/// Domain separation prefix for transaction signatures and ids.
const TX_TAG: &[u8] = b"TX";

/// Transaction type tag for payments.
const PAYMENT_TYPE: &str = "pay";

/// Network parameters needed to build a valid transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestedParams {
    /// Fee per byte, or the total fee when `flat_fee` is set
    pub fee: MicroAlgos,
    /// Minimum total fee accepted by the network
    pub min_fee: MicroAlgos,
    /// First round the transaction is valid in
    pub first_valid: Round,
    /// Last round the transaction is valid in
    pub last_valid: Round,
    /// Genesis id of the network
    pub genesis_id: String,
    /// Genesis hash of the network
    pub genesis_hash: [u8; 32],
    /// Whether `fee` is the total fee rather than a per-byte rate
    pub flat_fee: bool,
}

/// A payment transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transaction {
    /// The paying account
    pub sender: Address,
    /// The receiving account
    pub receiver: Address,
    /// Amount transferred
    pub amount: MicroAlgos,
    /// Total fee paid by the sender
    pub fee: MicroAlgos,
    /// First valid round
    pub first_valid: Round,
    /// Last valid round
    pub last_valid: Round,
    /// Genesis id of the network
    pub genesis_id: String,
    /// Genesis hash of the network
    pub genesis_hash: [u8; 32],
    /// Arbitrary note bytes
    pub note: Vec<u8>,
}

/// A transaction with its ed25519 signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    /// The signed transaction
    pub transaction: Transaction,
    /// Signature over `"TX" || msgpack(transaction)`
    pub signature: [u8; SIGNATURE_LEN],
}

impl Transaction {
    /// Builds a payment from `sender` to `receiver` using node parameters.
    ///
    /// Unless the parameters carry a flat fee, the fee is the per-byte rate
    /// times the estimated signed size, raised to the minimum fee.
    pub fn payment(
        sender: Address,
        receiver: Address,
        amount: MicroAlgos,
        params: &SuggestedParams,
    ) -> Result<Self, ProtocolError> {
        let mut transaction = Self {
            sender,
            receiver,
            amount,
            fee: params.fee,
            first_valid: params.first_valid,
            last_valid: params.last_valid,
            genesis_id: params.genesis_id.clone(),
            genesis_hash: params.genesis_hash,
            note: Vec::new(),
        };
        transaction.assign_fee(params)?;
        Ok(transaction)
    }

    /// Attaches a note and recomputes the fee for the larger transaction.
    pub fn with_note(mut self, note: Vec<u8>, params: &SuggestedParams) -> Result<Self, ProtocolError> {
        self.note = note;
        self.fee = params.fee;
        self.assign_fee(params)?;
        Ok(self)
    }

    fn assign_fee(&mut self, params: &SuggestedParams) -> Result<(), ProtocolError> {
        if params.flat_fee {
            self.fee = params.fee;
            return Ok(());
        }

        let min_fee = if params.min_fee == 0 { MIN_TXN_FEE } else { params.min_fee };
        let size = self.estimate_size()? as u64;
        self.fee = params.fee.saturating_mul(size).max(min_fee);
        debug!("Estimated size {} bytes, fee {} microAlgos", size, self.fee);
        Ok(())
    }

    /// Returns the size of this transaction once signed.
    pub fn estimate_size(&self) -> Result<usize, ProtocolError> {
        let signed = SignedTransaction {
            transaction: self.clone(),
            signature: [0u8; SIGNATURE_LEN],
        };
        Ok(signed.encode()?.len())
    }

    /// Encodes the transaction as a canonical msgpack map.
    pub fn encode(&self) -> Result<Vec<u8>, ProtocolError> {
        let mut buf = Vec::new();
        self.encode_into(&mut buf)?;
        Ok(buf)
    }

    fn encode_into(&self, buf: &mut Vec<u8>) -> Result<(), ProtocolError> {
        let fields = [
            self.amount != 0,
            self.fee != 0,
            self.first_valid != 0,
            !self.genesis_id.is_empty(),
            self.genesis_hash != [0u8; 32],
            self.last_valid != 0,
            !self.note.is_empty(),
            !self.receiver.is_zero(),
            !self.sender.is_zero(),
            true,
        ];
        let len = fields.iter().filter(|present| **present).count();
        msgpack::write_map_len(buf, len as u32)?;

        // Keys in lexicographic order.
        if self.amount != 0 {
            msgpack::write_str(buf, "amt")?;
            msgpack::write_uint(buf, self.amount)?;
        }
        if self.fee != 0 {
            msgpack::write_str(buf, "fee")?;
            msgpack::write_uint(buf, self.fee)?;
        }
        if self.first_valid != 0 {
            msgpack::write_str(buf, "fv")?;
            msgpack::write_uint(buf, self.first_valid)?;
        }
        if !self.genesis_id.is_empty() {
            msgpack::write_str(buf, "gen")?;
            msgpack::write_str(buf, &self.genesis_id)?;
        }
        if self.genesis_hash != [0u8; 32] {
            msgpack::write_str(buf, "gh")?;
            msgpack::write_bin(buf, &self.genesis_hash)?;
        }
        if self.last_valid != 0 {
            msgpack::write_str(buf, "lv")?;
            msgpack::write_uint(buf, self.last_valid)?;
        }
        if !self.note.is_empty() {
            msgpack::write_str(buf, "note")?;
            msgpack::write_bin(buf, &self.note)?;
        }
        if !self.receiver.is_zero() {
            msgpack::write_str(buf, "rcv")?;
            msgpack::write_bin(buf, self.receiver.as_bytes())?;
        }
        if !self.sender.is_zero() {
            msgpack::write_str(buf, "snd")?;
            msgpack::write_bin(buf, self.sender.as_bytes())?;
        }
        msgpack::write_str(buf, "type")?;
        msgpack::write_str(buf, PAYMENT_TYPE)?;

        Ok(())
    }

    /// Decodes a transaction from its msgpack map.
    pub fn decode(bytes: &[u8]) -> Result<Self, ProtocolError> {
        let mut reader = Reader::new(bytes);
        let transaction = Self::decode_from(&mut reader)?;
        if !reader.is_empty() {
            return Err(ProtocolError::Decoding(format!(
                "{} trailing bytes after transaction",
                reader.remaining().len()
            )));
        }
        Ok(transaction)
    }

    fn decode_from(reader: &mut Reader<'_>) -> Result<Self, ProtocolError> {
        let mut transaction = Transaction::default();
        let mut tx_type = None;

        let len = reader.read_map_len()?;
        for _ in 0..len {
            match reader.read_str()? {
                "amt" => transaction.amount = reader.read_uint()?,
                "fee" => transaction.fee = reader.read_uint()?,
                "fv" => transaction.first_valid = reader.read_uint()?,
                "gen" => transaction.genesis_id = reader.read_str()?.to_string(),
                "gh" => transaction.genesis_hash = reader.read_fixed_bin::<32>()?,
                "lv" => transaction.last_valid = reader.read_uint()?,
                "note" => transaction.note = reader.read_bin()?.to_vec(),
                "rcv" => transaction.receiver = Address(reader.read_fixed_bin::<KEY_LEN>()?),
                "snd" => transaction.sender = Address(reader.read_fixed_bin::<KEY_LEN>()?),
                "type" => tx_type = Some(reader.read_str()?.to_string()),
                other => {
                    return Err(ProtocolError::InvalidTransaction(format!(
                        "unsupported field {:?}",
                        other
                    )))
                }
            }
        }

        match tx_type.as_deref() {
            Some(PAYMENT_TYPE) => Ok(transaction),
            Some(other) => Err(ProtocolError::InvalidTransaction(format!(
                "unsupported transaction type {:?}",
                other
            ))),
            None => Err(ProtocolError::InvalidTransaction(
                "missing transaction type".to_string(),
            )),
        }
    }

    /// Returns the bytes covered by the sender's signature.
    pub fn bytes_to_sign(&self) -> Result<Vec<u8>, ProtocolError> {
        let mut buf = TX_TAG.to_vec();
        self.encode_into(&mut buf)?;
        Ok(buf)
    }

    /// Returns the transaction id: base32 of the SHA-512/256 of the signed bytes.
    pub fn id(&self) -> Result<String, ProtocolError> {
        let digest = sha512_256(&self.bytes_to_sign()?);
        Ok(BASE32_NOPAD.encode(&digest))
    }
}

impl SignedTransaction {
    /// Encodes the signed transaction as a canonical msgpack map.
    pub fn encode(&self) -> Result<Vec<u8>, ProtocolError> {
        let mut buf = Vec::new();
        msgpack::write_map_len(&mut buf, 2)?;
        msgpack::write_str(&mut buf, "sig")?;
        msgpack::write_bin(&mut buf, &self.signature)?;
        msgpack::write_str(&mut buf, "txn")?;
        self.transaction.encode_into(&mut buf)?;
        Ok(buf)
    }

    /// Decodes a signed transaction from its msgpack map.
    pub fn decode(bytes: &[u8]) -> Result<Self, ProtocolError> {
        let mut reader = Reader::new(bytes);
        let mut signature = None;
        let mut transaction = None;

        let len = reader.read_map_len()?;
        for _ in 0..len {
            match reader.read_str()? {
                "sig" => signature = Some(reader.read_fixed_bin::<SIGNATURE_LEN>()?),
                "txn" => transaction = Some(Transaction::decode_from(&mut reader)?),
                other => {
                    return Err(ProtocolError::InvalidTransaction(format!(
                        "unsupported signed transaction field {:?}",
                        other
                    )))
                }
            }
        }

        if !reader.is_empty() {
            return Err(ProtocolError::Decoding(format!(
                "{} trailing bytes after signed transaction",
                reader.remaining().len()
            )));
        }

        match (transaction, signature) {
            (Some(transaction), Some(signature)) => Ok(Self { transaction, signature }),
            (None, _) => Err(ProtocolError::InvalidTransaction("missing txn".to_string())),
            (_, None) => Err(ProtocolError::InvalidTransaction("missing sig".to_string())),
        }
    }

    /// Returns the id of the inner transaction.
    pub fn id(&self) -> Result<String, ProtocolError> {
        self.transaction.id()
    }

    /// Checks the signature against the sender's public key.
    pub fn verify(&self) -> Result<(), ProtocolError> {
        let public_key = VerifyingKey::from_bytes(self.transaction.sender.as_bytes())?;
        let signature = Signature::from_bytes(&self.signature);
        public_key.verify(&self.transaction.bytes_to_sign()?, &signature)?;
        Ok(())
    }
}
