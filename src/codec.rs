// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Stateless percent-encoding codec for path text
//!
//! [`decode_path`] and [`encode_path`] are the two halves of the wire
//! representation of a hierarchical path: decoding is applied once on
//! construction, before the text is split into segments, and encoding is
//! applied once on serialization, after the segments are joined. Both leave
//! the segment delimiter untouched so the structure of the path survives
//! the round trip.
//!
//! The codec holds no state and may be called concurrently without
//! coordination.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// The delimiter separating the segments of a hierarchical path.
pub const DELIMITER: &str = "/";

/// The path delimiter as a single byte
pub const DELIMITER_BYTE: u8 = DELIMITER.as_bytes()[0];

/// The path delimiter as a single char
pub const DELIMITER_CHAR: char = DELIMITER_BYTE as char;

/// Characters percent-encoded within path text.
///
/// Everything outside the RFC 3986 `pchar` set, except the delimiter
/// (joining segments is the only way a delimiter enters the text handed to
/// [`encode_path`]) and `%`, which gets the escape-preserving treatment
/// described on [`encode_path`].
const PATH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=')
    .remove(b':')
    .remove(b'@')
    .remove(b'%')
    .remove(DELIMITER_BYTE);

/// Error returned by [`decode_path`]
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DecodeError {
    /// Error when a `%` is not followed by two hexadecimal digits
    #[error("\"%\" at byte {} is not followed by two hexadecimal digits", position)]
    MalformedEscape {
        /// Byte offset of the offending `%`
        position: usize,
    },

    /// Error when the decoded bytes are not valid UTF-8
    #[error("decoded bytes are not valid UTF-8: {}", source)]
    NonUnicode {
        /// The underlying error
        source: std::string::FromUtf8Error,
    },
}

/// Percent-decode raw path text, leaving the delimiter structure intact.
///
/// Every `%XX` escape is replaced by the byte it encodes, with one
/// exception: an escaped delimiter (`%2F`) is kept verbatim, so splitting
/// the result on [`DELIMITER`] yields the same segment boundaries as
/// splitting the raw input.
///
/// Fails with [`DecodeError::MalformedEscape`] when a `%` is not followed
/// by two hex digits, and with [`DecodeError::NonUnicode`] when the decoded
/// bytes do not form valid UTF-8. There is no partial result.
///
/// ```
/// # use uri_path::codec::decode_path;
/// assert_eq!(decode_path("a%20b").unwrap(), "a b");
/// assert_eq!(decode_path("a%2Fb").unwrap(), "a%2Fb");
/// assert!(decode_path("a%2x").is_err());
/// ```
pub fn decode_path(raw: &str) -> Result<String, DecodeError> {
    let bytes = raw.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut position = 0;
    while position < bytes.len() {
        if bytes[position] != b'%' {
            decoded.push(bytes[position]);
            position += 1;
            continue;
        }

        let escape = bytes
            .get(position + 1..position + 3)
            .ok_or(DecodeError::MalformedEscape { position })?;
        let high = hex_value(escape[0]).ok_or(DecodeError::MalformedEscape { position })?;
        let low = hex_value(escape[1]).ok_or(DecodeError::MalformedEscape { position })?;

        match (high << 4) | low {
            DELIMITER_BYTE => decoded.extend_from_slice(&bytes[position..position + 3]),
            byte => decoded.push(byte),
        }
        position += 3;
    }

    String::from_utf8(decoded).map_err(|source| DecodeError::NonUnicode { source })
}

/// Percent-encode joined path text into its wire-safe form.
///
/// Characters outside the path-safe set are escaped with uppercase hex
/// digits; the delimiters introduced by joining segments pass through. A
/// `%` that already heads a valid escape triplet is preserved rather than
/// double-encoded, while a stray `%` is escaped as `%25`, so decoding the
/// output restores the input.
///
/// The output is deterministic: the same input always encodes to the same
/// string.
///
/// ```
/// # use uri_path::codec::encode_path;
/// assert_eq!(encode_path("a b/c"), "a%20b/c");
/// assert_eq!(encode_path("a%2Fb"), "a%2Fb");
/// assert_eq!(encode_path("100%"), "100%25");
/// ```
pub fn encode_path(joined: &str) -> String {
    let bytes = joined.as_bytes();
    let mut encoded = String::with_capacity(bytes.len());
    let mut run_start = 0;
    let mut position = 0;
    while position < bytes.len() {
        if bytes[position] != b'%' {
            position += 1;
            continue;
        }

        encoded.extend(utf8_percent_encode(
            &joined[run_start..position],
            PATH_ENCODE_SET,
        ));
        match bytes.get(position + 1..position + 3) {
            Some(escape) if escape.iter().all(u8::is_ascii_hexdigit) => {
                encoded.push_str(&joined[position..position + 3]);
                position += 3;
            }
            _ => {
                encoded.push_str("%25");
                position += 1;
            }
        }
        run_start = position;
    }
    encoded.extend(utf8_percent_encode(&joined[run_start..], PATH_ENCODE_SET));
    encoded
}

fn hex_value(byte: u8) -> Option<u8> {
    (byte as char).to_digit(16).map(|value| value as u8)
}
