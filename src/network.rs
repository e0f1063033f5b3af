use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::{self, Read, Write};
use std::net::TcpStream;

use crate::error::Result;

/// Sends one frame: little-endian `u32` length, then the UTF-8 payload.
pub fn send_message<W: Write>(stream: &mut W, message: &str) -> io::Result<()> {
    let message_bytes = message.as_bytes();
    let size = u32::try_from(message_bytes.len())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "message too large"))?;
    stream.write_u32::<LittleEndian>(size)?;
    stream.write_all(message_bytes)?;
    stream.flush()
}

/// Reads one frame written by `send_message`.
pub fn receive_message<R: Read>(stream: &mut R) -> io::Result<String> {
    let size = stream.read_u32::<LittleEndian>()?;
    let mut buffer = vec![0; size as usize];
    stream.read_exact(&mut buffer)?;
    String::from_utf8(buffer).map_err(|e| {
        io::Error::new(io::ErrorKind::InvalidData, format!("Invalid data: {}", e))
    })
}

pub fn send_json<W: Write, T: Serialize>(stream: &mut W, value: &T) -> Result<()> {
    let message = serde_json::to_string(value)?;
    send_message(stream, &message)?;
    Ok(())
}

pub fn receive_json<R: Read, T: DeserializeOwned>(stream: &mut R) -> Result<T> {
    let message = receive_message(stream)?;
    Ok(serde_json::from_str(&message)?)
}

pub fn connect_to_server(address: &str) -> io::Result<TcpStream> {
    TcpStream::connect(address)
}
