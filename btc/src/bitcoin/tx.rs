use crate::bitcoin::hash::Hash;
use crate::bitcoin::{varint_decode, varint_encode, varint_size};
use crate::bitcoin::{Encodable, Script};
use crate::{Error, Result};
use bytes::{Buf, BufMut, Bytes};
use hex::{FromHex, ToHex};
use log::trace;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::OnceLock;

/// The TxHash is used to identify transactions.
pub type TxHash = Hash;

/// The marker and flag bytes following the version of a segwit transaction.
const SEGWIT_MARKER: [u8; 2] = [0x00, 0x01];

/// Sequence numbers below this value signal replace-by-fee.
const RBF_SEQUENCE_LIMIT: u32 = 0xfffffffe;

/// A Bitcoin transaction, either legacy or segwit.
///
/// The transaction keeps the exact bytes it was parsed from alongside the decoded fields. Sizes
/// and identifiers are derived from those bytes, the two hashes are computed on first use and
/// then cached.
#[derive(Clone)]
pub struct Tx {
    raw: Bytes,
    version: u32,
    inputs: Vec<TxInput>,
    outputs: Vec<TxOutput>,
    lock_time: u32,
    segwit: bool,
    // offset of the witness section, for a legacy transaction this is the offset of the lock time
    witness_start: usize,
    txid: OnceLock<TxHash>,
    wtxid: OnceLock<TxHash>,
}

impl Tx {
    /// Build a transaction from its fields.
    ///
    /// The segwit serialization is used if any input carries witness data. The fields are encoded
    /// and the encoding parsed again, so the result is indistinguishable from a parsed transaction.
    pub fn new(
        version: u32,
        inputs: Vec<TxInput>,
        outputs: Vec<TxOutput>,
        lock_time: u32,
    ) -> Result<Tx> {
        // a zero input count followed by one output would read back as the segwit marker
        if inputs.is_empty() {
            return Err(Error::BadArgument("transaction has no inputs".to_string()));
        }
        let segwit = inputs.iter().any(|i| !i.witness.is_empty());
        let mut size = 8 + varint_size(inputs.len() as u64) + varint_size(outputs.len() as u64);
        size += inputs.iter().map(|i| i.encoded_size()).sum::<u64>();
        size += outputs.iter().map(|o| o.encoded_size()).sum::<u64>();
        if segwit {
            size += 2 + inputs.iter().map(|i| i.witness_size()).sum::<u64>();
        }
        let mut v = Vec::with_capacity(size as usize);
        v.put_u32_le(version);
        if segwit {
            v.put_slice(&SEGWIT_MARKER);
        }
        varint_encode(&mut v, inputs.len() as u64)?;
        for input in &inputs {
            input.to_binary(&mut v)?;
        }
        varint_encode(&mut v, outputs.len() as u64)?;
        for output in &outputs {
            output.to_binary(&mut v)?;
        }
        if segwit {
            for input in &inputs {
                input.witness_to_binary(&mut v)?;
            }
        }
        v.put_u32_le(lock_time);
        Tx::parse(&v)
    }

    /// Parse a transaction from the start of `data`.
    ///
    /// Bytes following the transaction are ignored, use [Tx::size] to find where it ends. Fails with
    /// [Error::IncompleteTransaction] if `data` ends before the transaction does.
    pub fn parse(data: &[u8]) -> Result<Tx> {
        Tx::parse_fields(data).map_err(|e| match e {
            Error::TruncatedInput => Error::IncompleteTransaction,
            e => e,
        })
    }

    fn parse_fields(data: &[u8]) -> Result<Tx> {
        let mut buf = data;
        let version = buf.try_get_u32_le()?;
        let segwit = buf.starts_with(&SEGWIT_MARKER);
        if segwit {
            trace!("segwit marker found");
            buf.advance(SEGWIT_MARKER.len());
        }

        let num_inputs = varint_decode(&mut buf)?;
        let mut inputs = Vec::with_capacity(capped(num_inputs, buf.len(), TxInput::MIN_SIZE));
        for _ in 0..num_inputs {
            inputs.push(TxInput::from_binary(&mut buf)?);
        }
        let num_outputs = varint_decode(&mut buf)?;
        let mut outputs = Vec::with_capacity(capped(num_outputs, buf.len(), TxOutput::MIN_SIZE));
        for _ in 0..num_outputs {
            outputs.push(TxOutput::from_binary(&mut buf)?);
        }

        let witness_start = data.len() - buf.len();
        if segwit {
            for input in inputs.iter_mut() {
                input.witness = read_witness(&mut buf)?;
            }
        }
        let lock_time = buf.try_get_u32_le()?;
        let size = data.len() - buf.len();
        trace!(
            "parsed tx, size: {}, inputs: {}, outputs: {}, segwit: {}",
            size,
            inputs.len(),
            outputs.len(),
            segwit
        );
        Ok(Tx {
            raw: Bytes::copy_from_slice(&data[..size]),
            version,
            inputs,
            outputs,
            lock_time,
            segwit,
            witness_start,
            txid: OnceLock::new(),
            wtxid: OnceLock::new(),
        })
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn inputs(&self) -> &[TxInput] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[TxOutput] {
        &self.outputs
    }

    pub fn lock_time(&self) -> u32 {
        self.lock_time
    }

    pub fn is_segwit(&self) -> bool {
        self.segwit
    }

    /// The serialized transaction, including any segwit marker and witness data.
    pub fn raw(&self) -> &Bytes {
        &self.raw
    }

    /// The size of the full serialization in bytes.
    pub fn size(&self) -> usize {
        self.raw.len()
    }

    /// The size of the serialization without the segwit marker and witness data.
    pub fn stripped_size(&self) -> usize {
        if !self.segwit {
            return self.size();
        }
        let witness_size = self.size() - self.witness_start - 4;
        self.size() - (SEGWIT_MARKER.len() + witness_size)
    }

    /// The weight, three times the stripped size plus the full size.
    pub fn weight(&self) -> usize {
        self.stripped_size() * 3 + self.size()
    }

    /// The virtual size, the weight divided by four and rounded up.
    pub fn vsize(&self) -> usize {
        if !self.segwit {
            return self.size();
        }
        self.weight().div_ceil(4)
    }

    /// The legacy serialization, omitting the segwit marker and all witness data.
    pub fn stripped_bytes(&self) -> Bytes {
        if !self.segwit {
            return self.raw.clone();
        }
        let size = self.size();
        let mut v = Vec::with_capacity(self.stripped_size());
        v.extend_from_slice(&self.raw[..4]);
        v.extend_from_slice(&self.raw[4 + SEGWIT_MARKER.len()..self.witness_start]);
        v.extend_from_slice(&self.raw[size - 4..]);
        Bytes::from(v)
    }

    /// The transaction id, the hash of the stripped serialization.
    pub fn txid(&self) -> TxHash {
        *self.txid.get_or_init(|| Hash::sha256d(&self.stripped_bytes()))
    }

    /// Same as [Tx::txid].
    pub fn hash(&self) -> TxHash {
        self.txid()
    }

    /// The witness transaction id, the hash of the full serialization. Equal to the txid for
    /// legacy transactions.
    pub fn wtxid(&self) -> TxHash {
        *self.wtxid.get_or_init(|| Hash::sha256d(&self.raw))
    }

    /// True if any input spends the all-zero previous transaction hash.
    pub fn is_coinbase(&self) -> bool {
        self.inputs.iter().any(|i| i.outpoint.tx_hash.is_zero())
    }

    /// True if the transaction opts in to replace-by-fee, i.e. it is not a coinbase and has an
    /// input with a sequence number below `0xfffffffe`.
    pub fn uses_replace_by_fee(&self) -> bool {
        !self.is_coinbase() && self.inputs.iter().any(|i| i.sequence < RBF_SEQUENCE_LIMIT)
    }
}

// Limit allocations for a declared item count to what the remaining bytes can hold.
fn capped(count: u64, remaining: usize, min_size: usize) -> usize {
    count.min((remaining / min_size) as u64) as usize
}

fn read_witness(buf: &mut &[u8]) -> Result<Vec<Bytes>> {
    let num_items = varint_decode(buf)?;
    let mut items = Vec::with_capacity(capped(num_items, buf.len(), 1));
    for _ in 0..num_items {
        let len = varint_decode(buf)?;
        if (buf.len() as u64) < len {
            return Err(Error::TruncatedInput);
        }
        let data: &[u8] = *buf;
        let (item, rest) = data.split_at(len as usize);
        items.push(Bytes::copy_from_slice(item));
        *buf = rest;
    }
    Ok(items)
}

impl Encodable for Tx {
    /// Read a transaction, advancing the buffer past it.
    ///
    /// The buffer must be contiguous (a single chunk), which holds for slices, [Bytes] and
    /// [BytesMut](bytes::BytesMut).
    fn from_binary(buffer: &mut dyn Buf) -> Result<Self>
    where
        Self: Sized,
    {
        if buffer.chunk().len() != buffer.remaining() {
            return Err(Error::BadArgument(
                "transactions can only be read from a contiguous buffer".to_string(),
            ));
        }
        let tx = Tx::parse(buffer.chunk())?;
        buffer.advance(tx.size());
        Ok(tx)
    }

    fn to_binary(&self, buffer: &mut dyn BufMut) -> Result<()> {
        buffer.put_slice(&self.raw);
        Ok(())
    }

    fn encoded_size(&self) -> u64 {
        self.raw.len() as u64
    }
}

impl FromHex for Tx {
    type Error = Error;

    /// Decode a transaction, the hex string must contain exactly one transaction.
    fn from_hex<T: AsRef<[u8]>>(hex: T) -> std::result::Result<Self, Self::Error> {
        let bytes = hex::decode(hex)?;
        let tx = Tx::parse(&bytes)?;
        if tx.size() != bytes.len() {
            let msg = format!("{} bytes after transaction", bytes.len() - tx.size());
            return Err(Error::BadData(msg));
        }
        Ok(tx)
    }
}

impl ToHex for Tx {
    fn encode_hex<T: FromIterator<char>>(&self) -> T {
        self.raw.encode_hex()
    }

    fn encode_hex_upper<T: FromIterator<char>>(&self) -> T {
        self.raw.encode_hex_upper()
    }
}

impl PartialEq for Tx {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Tx {}

impl std::hash::Hash for Tx {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::hash::Hash::hash(&self.raw, state);
    }
}

impl fmt::Debug for Tx {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Tx")
            .field("txid", &self.txid())
            .field("version", &self.version)
            .field("segwit", &self.segwit)
            .field("inputs", &self.inputs)
            .field("outputs", &self.outputs)
            .field("lock_time", &self.lock_time)
            .finish()
    }
}

impl Serialize for Tx {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.encode_hex::<String>().as_ref())
    }
}

impl<'de> Deserialize<'de> for Tx {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Tx::from_hex(s).map_err(|e| serde::de::Error::custom(e.to_string()))
    }
}

/// An Outpoint is a reference to a specific output of a specific transaction.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Outpoint {
    /// The hash of the transaction, in wire byte order.
    pub tx_hash: TxHash,
    pub index: u32,
}

impl Outpoint {
    pub const SIZE: u64 = 36;
}

impl Encodable for Outpoint {
    fn from_binary(buffer: &mut dyn Buf) -> Result<Self>
    where
        Self: Sized,
    {
        let tx_hash = TxHash::from_binary(buffer)?;
        let index = buffer.try_get_u32_le()?;
        Ok(Outpoint { tx_hash, index })
    }

    fn to_binary(&self, buffer: &mut dyn BufMut) -> Result<()> {
        self.tx_hash.to_binary(buffer)?;
        buffer.put_u32_le(self.index);
        Ok(())
    }

    fn encoded_size(&self) -> u64 {
        Self::SIZE
    }
}

/// A TxInput is an input to a transaction.
///
/// The [Encodable] implementation covers the fields of the legacy serialization only, the witness
/// is serialized separately after all outputs.
#[derive(PartialEq, Eq, Hash, Clone, Debug, Default, Serialize, Deserialize)]
pub struct TxInput {
    pub outpoint: Outpoint,
    pub script: Script,
    pub sequence: u32,
    /// The witness stack, empty unless the transaction is segwit.
    #[serde(default, with = "witness_hex")]
    pub witness: Vec<Bytes>,
}

/// Serde for a witness stack as a list of hex strings.
mod witness_hex {
    use bytes::Bytes;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(witness: &[Bytes], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(witness.iter().map(|item| hex::encode(item)))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Bytes>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let items = Vec::<String>::deserialize(deserializer)?;
        items
            .iter()
            .map(|h| hex::decode(h).map(Bytes::from).map_err(de::Error::custom))
            .collect()
    }
}

impl TxInput {
    const MIN_SIZE: usize = Outpoint::SIZE as usize + 1 + 4;

    pub fn new(outpoint: Outpoint, script: Script, sequence: u32) -> TxInput {
        TxInput {
            outpoint,
            script,
            sequence,
            witness: Vec::new(),
        }
    }

    /// The size of the serialized witness stack.
    pub fn witness_size(&self) -> u64 {
        let items: u64 = self
            .witness
            .iter()
            .map(|w| varint_size(w.len() as u64) + w.len() as u64)
            .sum();
        varint_size(self.witness.len() as u64) + items
    }

    fn witness_to_binary(&self, buffer: &mut dyn BufMut) -> Result<()> {
        varint_encode(buffer, self.witness.len() as u64)?;
        for item in &self.witness {
            varint_encode(buffer, item.len() as u64)?;
            buffer.put_slice(item);
        }
        Ok(())
    }
}

impl Encodable for TxInput {
    fn from_binary(buffer: &mut dyn Buf) -> Result<Self> {
        let outpoint = Outpoint::from_binary(buffer)?;
        let script = Script::from_binary(buffer)?;
        let sequence = buffer.try_get_u32_le()?;
        Ok(TxInput::new(outpoint, script, sequence))
    }

    fn to_binary(&self, buffer: &mut dyn BufMut) -> Result<()> {
        self.outpoint.to_binary(buffer)?;
        self.script.to_binary(buffer)?;
        buffer.put_u32_le(self.sequence);
        Ok(())
    }

    fn encoded_size(&self) -> u64 {
        self.outpoint.encoded_size() + self.script.encoded_size() + 4
    }
}

/// A TxOutput is an output from a transaction.
#[derive(PartialEq, Eq, Hash, Clone, Debug, Default, Serialize, Deserialize)]
pub struct TxOutput {
    /// The amount in satoshis.
    pub value: u64,
    pub script: Script,
}

impl TxOutput {
    const MIN_SIZE: usize = 8 + 1;

    pub fn new(value: u64, script: Script) -> TxOutput {
        TxOutput { value, script }
    }
}

impl Encodable for TxOutput {
    fn from_binary(buffer: &mut dyn Buf) -> Result<Self>
    where
        Self: Sized,
    {
        let value = buffer.try_get_u64_le()?;
        let script = Script::from_binary(buffer)?;
        Ok(TxOutput { value, script })
    }

    fn to_binary(&self, buffer: &mut dyn BufMut) -> Result<()> {
        buffer.put_u64_le(self.value);
        self.script.to_binary(buffer)?;
        Ok(())
    }

    fn encoded_size(&self) -> u64 {
        self.script.encoded_size() + 8
    }
}
