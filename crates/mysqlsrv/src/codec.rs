use crate::errors::{FrameError, MysqlSrvError, Result};
use crate::messages::BackendMessage;
use bytes::{Buf, BufMut, Bytes, BytesMut};
use futures::{SinkExt, TryStreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::{Decoder, Encoder, Framed};
use tracing::trace;

/// 3 byte little-endian payload length followed by the sequence number.
pub const HEADER_LEN: usize = 4;

/// Largest payload a single frame can carry.
pub const MAX_PAYLOAD_LEN: usize = 0xFF_FFFF;

/// A single frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub seq: u8,
    pub payload: Bytes,
}

impl Packet {
    pub fn new(seq: u8, payload: impl Into<Bytes>) -> Self {
        Packet {
            seq,
            payload: payload.into(),
        }
    }

    /// Write the frame header and payload. The length is always taken from
    /// the payload.
    pub fn encode(&self, dst: &mut BytesMut) -> Result<(), FrameError> {
        let len = self.payload.len();
        if len > MAX_PAYLOAD_LEN {
            return Err(FrameError::PayloadTooLarge(len));
        }
        dst.reserve(HEADER_LEN + len);
        dst.put_uint_le(len as u64, 3);
        dst.put_u8(self.seq);
        dst.put_slice(&self.payload);
        Ok(())
    }

    /// Decode the frame at the front of `src`, returning it along with the
    /// number of bytes it occupied.
    ///
    /// `src` is expected to hold the full frame.
    pub fn decode(src: &[u8]) -> Result<(Packet, usize), FrameError> {
        let len = match frame_len(src) {
            Some(len) => len,
            None => {
                return Err(FrameError::TruncatedFrame {
                    declared: HEADER_LEN,
                    available: src.len(),
                });
            }
        };
        let available = src.len() - HEADER_LEN;
        if available < len {
            return Err(FrameError::TruncatedFrame {
                declared: len,
                available,
            });
        }

        let packet = Packet::new(
            src[3],
            Bytes::copy_from_slice(&src[HEADER_LEN..HEADER_LEN + len]),
        );
        Ok((packet, HEADER_LEN + len))
    }
}

/// Payload length declared by the header, if the header is complete.
fn frame_len(src: &[u8]) -> Option<usize> {
    if src.len() < HEADER_LEN {
        return None;
    }
    Some(src[0] as usize | (src[1] as usize) << 8 | (src[2] as usize) << 16)
}

/// Frames packets and keeps track of sequence numbers.
///
/// The counter holds the sequence number of the next frame in either
/// direction. Every decoded frame has to carry exactly that number, every
/// encoded frame is stamped with it. Both advance it, wrapping at 256.
#[derive(Debug, Default)]
pub struct PacketCodec {
    seq: u8,
}

impl PacketCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new sequence. Clients begin every command at zero.
    pub fn reset(&mut self) {
        self.seq = 0;
    }

    pub fn next_seq(&self) -> u8 {
        self.seq
    }
}

impl Decoder for PacketCodec {
    type Item = Packet;
    type Error = MysqlSrvError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>> {
        let len = match frame_len(src) {
            Some(len) => len,
            None => return Ok(None),
        };

        // Not enough bytes to read the full frame yet.
        if src.len() < HEADER_LEN + len {
            src.reserve(HEADER_LEN + len - src.len());
            return Ok(None);
        }

        let mut frame = src.split_to(HEADER_LEN + len);
        let seq = frame[3];
        if seq != self.seq {
            return Err(FrameError::SequenceMismatch {
                expected: self.seq,
                got: seq,
            }
            .into());
        }
        self.seq = seq.wrapping_add(1);

        frame.advance(HEADER_LEN);
        Ok(Some(Packet::new(seq, frame.freeze())))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>> {
        match self.decode(src)? {
            Some(packet) => Ok(Some(packet)),
            None if src.is_empty() => Ok(None),
            // Connection closed partway through a frame.
            None => match Packet::decode(src) {
                Err(e) => Err(e.into()),
                Ok(_) => Err(FrameError::Malformed("frame left undecoded").into()),
            },
        }
    }
}

impl Encoder<BackendMessage> for PacketCodec {
    type Error = MysqlSrvError;

    fn encode(&mut self, item: BackendMessage, dst: &mut BytesMut) -> Result<()> {
        let mut payload = BytesMut::new();
        item.encode(&mut payload);
        Packet::new(self.seq, payload.freeze()).encode(dst)?;
        self.seq = self.seq.wrapping_add(1);
        Ok(())
    }
}

/// A connection that frames MySQL protocol packets.
pub struct FramedConn<C> {
    conn: Framed<C, PacketCodec>,
}

impl<C> FramedConn<C>
where
    C: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(conn: C) -> Self {
        FramedConn {
            conn: Framed::new(conn, PacketCodec::new()),
        }
    }

    /// Reads a single, complete packet.
    ///
    /// Returns `None` once the underlying connection terminates.
    pub async fn read_packet(&mut self) -> Result<Option<Packet>> {
        let packet = self.conn.try_next().await?;
        match &packet {
            Some(packet) => trace!(seq = packet.seq, len = packet.payload.len(), "read packet"),
            None => trace!("read packet (None)"),
        }
        Ok(packet)
    }

    /// Sends a single message, flushing the connection.
    pub async fn send(&mut self, msg: BackendMessage) -> Result<()> {
        trace!(?msg, seq = self.next_seq(), "sending message");
        self.conn.send(msg).await
    }

    /// Buffers a message without flushing.
    pub async fn feed(&mut self, msg: BackendMessage) -> Result<()> {
        trace!(?msg, seq = self.next_seq(), "feeding message");
        self.conn.feed(msg).await
    }

    pub async fn flush(&mut self) -> Result<()> {
        self.conn.flush().await
    }

    pub fn reset_sequence(&mut self) {
        self.conn.codec_mut().reset();
    }

    pub fn next_seq(&self) -> u8 {
        self.conn.codec().next_seq()
    }
}

/// Text on the wire is latin1, matching the charset announced to clients.
/// Characters outside latin1 are sent as `?`.
pub fn encode_latin1(s: &str) -> Vec<u8> {
    s.chars().map(|c| u8::try_from(c).unwrap_or(b'?')).collect()
}

/// Every byte is a latin1 character, so decoding never fails.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Writers for the protocol's string and integer encodings.
pub(crate) trait BufStringMut: BufMut {
    /// Put a null-terminated string in the buffer.
    fn put_cstring(&mut self, s: &str);

    /// Put an integer using the length-encoded format. Values below 251 take
    /// a single byte.
    fn put_lenenc_int(&mut self, v: u64);

    /// Put a string prefixed with its length-encoded length.
    fn put_lenenc_str(&mut self, s: &str);
}

impl<B: BufMut> BufStringMut for B {
    fn put_cstring(&mut self, s: &str) {
        self.put_slice(&encode_latin1(s));
        self.put_u8(0);
    }

    fn put_lenenc_int(&mut self, v: u64) {
        match v {
            0..=250 => self.put_u8(v as u8),
            251..=0xFFFF => {
                self.put_u8(0xFC);
                self.put_u16_le(v as u16);
            }
            0x1_0000..=0xFF_FFFF => {
                self.put_u8(0xFD);
                self.put_uint_le(v, 3);
            }
            _ => {
                self.put_u8(0xFE);
                self.put_u64_le(v);
            }
        }
    }

    fn put_lenenc_str(&mut self, s: &str) {
        let bytes = encode_latin1(s);
        self.put_lenenc_int(bytes.len() as u64);
        self.put_slice(&bytes);
    }
}

/// Checked reads over a packet payload. Running out of bytes is an error
/// rather than a panic.
#[derive(Debug)]
pub(crate) struct Cursor<'a> {
    buf: &'a [u8],
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Cursor { buf }
    }

    fn ensure(&self, n: usize) -> Result<(), FrameError> {
        if self.buf.len() < n {
            return Err(FrameError::Malformed("unexpected end of payload"));
        }
        Ok(())
    }

    pub(crate) fn read_u8(&mut self) -> Result<u8, FrameError> {
        self.ensure(1)?;
        Ok(self.get_u8())
    }

    pub(crate) fn read_u16(&mut self) -> Result<u16, FrameError> {
        self.ensure(2)?;
        Ok(self.get_u16_le())
    }

    pub(crate) fn read_u32(&mut self) -> Result<u32, FrameError> {
        self.ensure(4)?;
        Ok(self.get_u32_le())
    }

    pub(crate) fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], FrameError> {
        self.ensure(n)?;
        let (bytes, rest) = self.buf.split_at(n);
        self.buf = rest;
        Ok(bytes)
    }

    pub(crate) fn skip(&mut self, n: usize) -> Result<(), FrameError> {
        self.read_bytes(n).map(|_| ())
    }

    /// Bytes up to the next null, consuming the null.
    pub(crate) fn read_cstring_bytes(&mut self) -> Result<&'a [u8], FrameError> {
        let pos = self
            .buf
            .iter()
            .position(|b| *b == 0)
            .ok_or(FrameError::Malformed("missing null byte"))?;
        let bytes = self.read_bytes(pos)?;
        self.advance(1);
        Ok(bytes)
    }

    pub(crate) fn read_cstring(&mut self) -> Result<String, FrameError> {
        self.read_cstring_bytes().map(decode_latin1)
    }

    pub(crate) fn read_lenenc_int(&mut self) -> Result<u64, FrameError> {
        match self.read_u8()? {
            b @ 0..=250 => Ok(b as u64),
            0xFC => Ok(self.read_u16()? as u64),
            0xFD => {
                self.ensure(3)?;
                Ok(self.get_uint_le(3))
            }
            0xFE => {
                self.ensure(8)?;
                Ok(self.get_u64_le())
            }
            _ => Err(FrameError::Malformed("invalid length-encoded integer")),
        }
    }

    pub(crate) fn read_lenenc_str(&mut self) -> Result<String, FrameError> {
        let len = self.read_lenenc_int()?;
        let len = usize::try_from(len).map_err(|_| FrameError::Malformed("string too long"))?;
        let bytes = self.read_bytes(len)?;
        Ok(decode_latin1(bytes))
    }

    /// The rest of the payload.
    pub(crate) fn read_rest(&mut self) -> &'a [u8] {
        let rest = self.buf;
        self.buf = &[];
        rest
    }
}

impl Buf for Cursor<'_> {
    fn remaining(&self) -> usize {
        self.buf.len()
    }

    fn chunk(&self) -> &[u8] {
        self.buf
    }

    fn advance(&mut self, cnt: usize) {
        self.buf = &self.buf[cnt..]
    }
}
