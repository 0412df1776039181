//! Document encoder: records → version-prefixed binary buffer.

use sdb_buffers::Writer;
use url::Url;

use super::FieldTag;
use crate::constants::{
    FORMAT_VERSION, HOST_IPV4, HOST_NAMED, MAX_PARAMETERS_LEN, MAX_TEXT_LEN,
};
use crate::descriptor::{Field, Host, Protocol, ServiceRecord};
use crate::error::SdbError;
use crate::history::History;

/// Encodes a record list into the binary document format.
///
/// Every `encode` call runs with a fresh [`History`] table: repeated
/// (kind, value) pairs across records are replaced by back-references to
/// the table index of their first occurrence.
pub struct DocumentEncoder {
    writer: Writer,
}

impl Default for DocumentEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentEncoder {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(),
        }
    }

    /// Encodes `records` into a document buffer.
    pub fn encode(&mut self, records: &[ServiceRecord]) -> Result<Vec<u8>, SdbError> {
        let mut history = History::new();
        self.writer.reset();
        self.writer.u8(FORMAT_VERSION);
        for (index, record) in records.iter().enumerate() {
            self.write_record(record, index, &mut history)?;
        }
        Ok(self.writer.flush())
    }

    fn write_record(
        &mut self,
        record: &ServiceRecord,
        index: usize,
        history: &mut History,
    ) -> Result<(), SdbError> {
        let mut section = Writer::new();
        for field in &record.fields {
            write_field(&mut section, field, index, history)?;
        }
        let section = section.flush();
        self.writer.u8(record.kind as u8);
        self.writer.u32(section.len() as u32);
        self.writer.buf(&section);
        Ok(())
    }
}

/// Encodes one field, replacing it with a back-reference when an equal
/// (kind, value) pair is already in the history table.
fn write_field(
    w: &mut Writer,
    field: &Field,
    record_index: usize,
    history: &mut History,
) -> Result<(), SdbError> {
    if let Some(tag) = FieldTag::ref_for(field.kind()) {
        if let Some(index) = history.find(field) {
            // Indices wider than the u16 payload cannot be referenced.
            if let Ok(index) = u16::try_from(index) {
                w.u8(tag as u8);
                w.u16(index);
                return Ok(());
            }
        }
    }
    match field {
        Field::Name(name) => {
            w.u8(FieldTag::Name as u8);
            write_text(w, name);
        }
        Field::Description(description) => {
            w.u8(FieldTag::Description as u8);
            write_text(w, description);
        }
        Field::Transport(transport) => {
            w.u8(FieldTag::Transport as u8);
            w.u8(*transport as u8);
        }
        Field::Protocol(protocol) => {
            w.u8(FieldTag::Protocol as u8);
            w.u8(protocol.wire_value());
        }
        Field::Host(host) => match host {
            Host::Ipv4(addr) => {
                w.u8(FieldTag::Host as u8);
                w.u8(HOST_IPV4);
                w.buf(&addr.octets());
            }
            Host::Ipv6(_) => return Err(SdbError::Ipv6Unsupported),
            Host::Named(name) => {
                w.u8(FieldTag::Host as u8);
                w.u8(HOST_NAMED);
                write_text(w, name);
            }
        },
        Field::Port(port) => {
            w.u8(FieldTag::Port as u8);
            w.u16(*port);
        }
        Field::Parameters(bytes) => {
            w.u8(FieldTag::Parameters as u8);
            let len = bytes.len().min(MAX_PARAMETERS_LEN);
            w.u24(len as u32);
            w.buf(&bytes[..len]);
        }
        Field::Url(url) => {
            // Compact form: each decomposed sub-field is individually
            // dedup-eligible.
            for sub in decompose_url(url)? {
                write_field(w, &sub, record_index, history)?;
            }
            return Ok(());
        }
    }
    history.insert(field, record_index);
    Ok(())
}

/// Writes a u16 length prefix and UTF-8 payload, truncating over-long
/// values on a char boundary.
fn write_text(w: &mut Writer, s: &str) {
    let mut end = s.len().min(MAX_TEXT_LEN);
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    w.u16(end as u16);
    w.buf(&s.as_bytes()[..end]);
}

/// Splits a compact-form `url` field into its wire fields: protocol and
/// host always, port and parameters when the URL has them.
fn decompose_url(input: &str) -> Result<Vec<Field>, SdbError> {
    let parsed = Url::parse(input)?;
    let protocol = Protocol::parse(parsed.scheme())
        .ok_or_else(|| SdbError::UnsupportedScheme(parsed.scheme().to_owned()))?;
    let mut fields = vec![Field::Protocol(protocol)];

    // IPv6 URL literals are bracketed; strip the enclosure before
    // classifying (RFC 2732 form).
    let host = parsed.host_str().unwrap_or("");
    let host = host.trim_start_matches('[').trim_end_matches(']');
    fields.push(Field::Host(Host::parse(host)));

    if let Some(port) = parsed.port() {
        fields.push(Field::Port(port));
    }
    match parsed.query() {
        Some(query) if !query.is_empty() => {
            fields.push(Field::Parameters(format!("?{query}").into_bytes()));
        }
        _ => {}
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{EntityKind, Transport};

    fn encode(records: &[ServiceRecord]) -> Vec<u8> {
        DocumentEncoder::new().encode(records).unwrap()
    }

    #[test]
    fn empty_record_list_is_just_the_version_byte() {
        assert_eq!(encode(&[]), [FORMAT_VERSION]);
    }

    #[test]
    fn record_frame_layout() {
        let records = [ServiceRecord::new(EntityKind::P2p).with(Field::Port(8090))];
        let bin = encode(&records);
        assert_eq!(
            bin,
            [
                FORMAT_VERSION,
                1, // p2p kind byte
                0, 0, 0, 3, // field section length
                5, 0x1f, 0x9a, // port field, 8090
            ]
        );
    }

    #[test]
    fn name_field_layout() {
        let records = [ServiceRecord::new(EntityKind::Api).with(Field::Name("svc".into()))];
        let bin = encode(&records);
        assert_eq!(&bin[6..], [0, 0, 3, b's', b'v', b'c']);
    }

    #[test]
    fn ipv4_host_is_four_octets() {
        let records =
            [ServiceRecord::new(EntityKind::Api).with(Field::Host(Host::parse("127.0.0.1")))];
        let bin = encode(&records);
        assert_eq!(&bin[6..], [4, HOST_IPV4, 127, 0, 0, 1]);
    }

    #[test]
    fn ipv6_host_fails_fast() {
        let records = [ServiceRecord::new(EntityKind::Api).with(Field::Host(Host::parse("::1")))];
        let err = DocumentEncoder::new().encode(&records).unwrap_err();
        assert!(matches!(err, SdbError::Ipv6Unsupported));
    }

    #[test]
    fn url_decomposition_shape() {
        let fields = decompose_url("https://example.com:8443/path?a=1&b=2").unwrap();
        assert_eq!(
            fields,
            vec![
                Field::Protocol(Protocol::Https),
                Field::Host(Host::Named("example.com".into())),
                Field::Port(8443),
                Field::Parameters(b"?a=1&b=2".to_vec()),
            ]
        );
    }

    #[test]
    fn url_default_port_and_empty_query_are_omitted() {
        let fields = decompose_url("http://example.com/path").unwrap();
        assert_eq!(
            fields,
            vec![
                Field::Protocol(Protocol::Http),
                Field::Host(Host::Named("example.com".into())),
            ]
        );
        // Explicit default port is also dropped by URL normalization.
        let fields = decompose_url("http://example.com:80/").unwrap();
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn url_scheme_is_lowercased() {
        let fields = decompose_url("WSS://node.example:9001").unwrap();
        assert_eq!(fields[0], Field::Protocol(Protocol::Wss));
        assert_eq!(fields[2], Field::Port(9001));
    }

    #[test]
    fn url_with_unsupported_scheme_fails() {
        assert!(matches!(
            decompose_url("ftp://example.com"),
            Err(SdbError::UnsupportedScheme(scheme)) if scheme == "ftp"
        ));
    }

    #[test]
    fn url_without_scheme_fails() {
        assert!(matches!(
            decompose_url("://example.com"),
            Err(SdbError::InvalidUrl(_))
        ));
    }

    #[test]
    fn repeated_value_becomes_reference() {
        let records = [
            ServiceRecord::new(EntityKind::Api).with(Field::Name("svc".into())),
            ServiceRecord::new(EntityKind::Api).with(Field::Name("svc".into())),
        ];
        let bin = encode(&records);
        // First frame: raw name field. Second frame: 3-byte reference.
        let second = &bin[1 + 5 + 6..];
        assert_eq!(second[..5], [0, 0, 0, 0, 3]);
        assert_eq!(second[5..], [FieldTag::NameRef as u8, 0, 0]);
    }

    #[test]
    fn reference_index_counts_all_field_entries() {
        // Transport has no reference tag but still occupies a table slot.
        let records = [
            ServiceRecord::new(EntityKind::Api)
                .with(Field::Transport(Transport::Http))
                .with(Field::Port(9000)),
            ServiceRecord::new(EntityKind::Api).with(Field::Port(9000)),
        ];
        let bin = encode(&records);
        let second_fields = &bin[bin.len() - 3..];
        assert_eq!(second_fields, [FieldTag::PortRef as u8, 0, 1]);
    }
}
