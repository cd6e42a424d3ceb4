// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Binary wire codec and length-prefixed frame I/O.
//!
//! Payload layout (all integers little-endian):
//!
//! ```text
//! [i32 type tag]
//! [u32 property count]
//!   per property: [i32 key len][key utf8]
//!                 [u32 value kind]            0 = text, 1 = blob
//!                 [i32 value len][value bytes]
//! [u32 attachment count]
//!   per attachment: [i32 len][bytes]          len -1 encodes "absent"
//! ```
//!
//! On the stream each payload is framed as `[u32 len][payload]`, so a single
//! connection can multiplex many request/reply pairs and a reader can skip a
//! malformed payload without losing frame sync.
//!
//! Decoding never indexes raw buffers and never panics: every read goes
//! through `bytes::Buf` with an explicit remaining-bytes check.

use bytes::Buf;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::bag::PropertyValue;
use crate::envelope::Envelope;
use crate::error::ProtocolError;
use crate::types::MessageType;

/// Value-kind tag for string-encoded properties.
const KIND_TEXT: u32 = 0;
/// Value-kind tag for raw binary properties.
const KIND_BLOB: u32 = 1;

/// Hard ceiling on a single frame. Large activity payloads fit comfortably;
/// anything bigger is treated as a framing fault.
pub const MAX_FRAME_LEN: usize = 16 * 1024 * 1024;

/// Encode an envelope into payload bytes (no length prefix).
pub fn encode(envelope: &Envelope) -> Vec<u8> {
    let mut out = Vec::with_capacity(64);
    put_i32(&mut out, envelope.msg_type().as_tag());

    put_u32(&mut out, envelope.bag().len() as u32);
    for (key, value) in envelope.bag().iter() {
        put_i32(&mut out, key.len() as i32);
        out.extend_from_slice(key.as_bytes());
        match value {
            PropertyValue::Text(s) => {
                put_u32(&mut out, KIND_TEXT);
                put_i32(&mut out, s.len() as i32);
                out.extend_from_slice(s.as_bytes());
            }
            PropertyValue::Blob(b) => {
                put_u32(&mut out, KIND_BLOB);
                put_i32(&mut out, b.len() as i32);
                out.extend_from_slice(b);
            }
        }
    }

    put_u32(&mut out, envelope.attachments().len() as u32);
    for attachment in envelope.attachments() {
        match attachment {
            Some(bytes) => {
                put_i32(&mut out, bytes.len() as i32);
                out.extend_from_slice(bytes);
            }
            None => put_i32(&mut out, -1),
        }
    }

    out
}

/// Decode payload bytes into an envelope.
///
/// The type tag is read first so dispatch-relevant failures
/// (`UnknownMessageType`) surface before the rest of the frame is parsed.
pub fn decode(payload: &[u8]) -> Result<Envelope, ProtocolError> {
    let mut buf = payload;

    let tag = get_i32(&mut buf, "type tag")?;
    let msg_type = MessageType::from_tag(tag)
        .ok_or(ProtocolError::UnknownMessageType(tag))?;
    let mut envelope = Envelope::new(msg_type);

    let property_count = get_u32(&mut buf, "property count")?;
    for _ in 0..property_count {
        let key_len = get_len(&mut buf, "property key")?;
        let key_bytes = take(&mut buf, key_len, "property key")?;
        let key = String::from_utf8(key_bytes).map_err(|_| ProtocolError::InvalidKey)?;

        let kind = get_u32(&mut buf, "value kind")?;
        let value_len = get_len(&mut buf, "property value")?;
        let value_bytes = take(&mut buf, value_len, "property value")?;
        let value = match kind {
            KIND_TEXT => PropertyValue::Text(
                String::from_utf8(value_bytes)
                    .map_err(|_| ProtocolError::InvalidText { context: "property value" })?,
            ),
            KIND_BLOB => PropertyValue::Blob(value_bytes),
            other => return Err(ProtocolError::InvalidValueKind(other)),
        };
        envelope.bag_mut().set(key, value);
    }

    let attachment_count = get_u32(&mut buf, "attachment count")?;
    for _ in 0..attachment_count {
        let len = get_i32(&mut buf, "attachment length")?;
        if len == -1 {
            envelope.push_attachment(None);
        } else if len < 0 {
            return Err(ProtocolError::InvalidLength { context: "attachment", len });
        } else {
            let bytes = take(&mut buf, len as usize, "attachment")?;
            envelope.push_attachment(Some(bytes));
        }
    }

    if buf.has_remaining() {
        return Err(ProtocolError::TrailingBytes { remaining: buf.remaining() });
    }

    Ok(envelope)
}

/// Read one length-prefixed frame, returning the payload bytes.
pub async fn read_message<R>(reader: &mut R) -> Result<Vec<u8>, ProtocolError>
where
    R: AsyncRead + Unpin,
{
    let mut prefix = [0u8; 4];
    reader.read_exact(&mut prefix).await?;
    let len = u32::from_le_bytes(prefix) as usize;
    if len > MAX_FRAME_LEN {
        return Err(ProtocolError::FrameTooLarge { len, max: MAX_FRAME_LEN });
    }
    let mut payload = vec![0u8; len];
    reader.read_exact(&mut payload).await?;
    Ok(payload)
}

/// Write one length-prefixed frame.
pub async fn write_message<W>(writer: &mut W, payload: &[u8]) -> Result<(), ProtocolError>
where
    W: AsyncWrite + Unpin,
{
    if payload.len() > MAX_FRAME_LEN {
        return Err(ProtocolError::FrameTooLarge { len: payload.len(), max: MAX_FRAME_LEN });
    }
    writer.write_all(&(payload.len() as u32).to_le_bytes()).await?;
    writer.write_all(payload).await?;
    writer.flush().await?;
    Ok(())
}

/// Read and decode one envelope.
pub async fn read_envelope<R>(reader: &mut R) -> Result<Envelope, ProtocolError>
where
    R: AsyncRead + Unpin,
{
    let payload = read_message(reader).await?;
    decode(&payload)
}

/// Encode and write one envelope.
pub async fn write_envelope<W>(writer: &mut W, envelope: &Envelope) -> Result<(), ProtocolError>
where
    W: AsyncWrite + Unpin,
{
    write_message(writer, &encode(envelope)).await
}

// ---- little-endian helpers ----

fn put_i32(out: &mut Vec<u8>, value: i32) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn put_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn get_i32(buf: &mut &[u8], context: &'static str) -> Result<i32, ProtocolError> {
    if buf.remaining() < 4 {
        return Err(ProtocolError::Truncated { needed: 4 - buf.remaining(), context });
    }
    Ok(buf.get_i32_le())
}

fn get_u32(buf: &mut &[u8], context: &'static str) -> Result<u32, ProtocolError> {
    if buf.remaining() < 4 {
        return Err(ProtocolError::Truncated { needed: 4 - buf.remaining(), context });
    }
    Ok(buf.get_u32_le())
}

/// Read a non-negative length field.
fn get_len(buf: &mut &[u8], context: &'static str) -> Result<usize, ProtocolError> {
    let len = get_i32(buf, context)?;
    if len < 0 {
        return Err(ProtocolError::InvalidLength { context, len });
    }
    Ok(len as usize)
}

fn take(buf: &mut &[u8], n: usize, context: &'static str) -> Result<Vec<u8>, ProtocolError> {
    if buf.remaining() < n {
        return Err(ProtocolError::Truncated { needed: n - buf.remaining(), context });
    }
    let mut out = vec![0u8; n];
    buf.copy_to_slice(&mut out);
    Ok(out)
}

#[cfg(test)]
#[path = "wire_tests.rs"]
mod tests;
