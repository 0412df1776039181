//! Document decoder: version-prefixed binary buffer → records.

use std::net::Ipv4Addr;

use sdb_buffers::Reader;

use super::FieldTag;
use crate::constants::{FORMAT_VERSION, HOST_IPV4, HOST_IPV6, HOST_NAMED};
use crate::descriptor::{EntityKind, Field, FieldKind, Host, Protocol, ServiceRecord, Transport};
use crate::error::SdbError;
use crate::history::History;

/// Decodes a binary document into its record list.
///
/// Decoding is lenient about unknown field tags: the payload size of an
/// unknown tag cannot be known, so the remainder of that record's field
/// section is logged and skipped. The version byte, the frame structure,
/// and reference resolution are strict.
#[derive(Debug, Default)]
pub struct DocumentDecoder;

impl DocumentDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Decodes a document buffer into records, preserving record and
    /// field order.
    pub fn decode(&self, data: &[u8]) -> Result<Vec<ServiceRecord>, SdbError> {
        let mut reader = Reader::new(data);
        let version = reader.u8()?;
        if version != FORMAT_VERSION {
            return Err(SdbError::VersionMismatch {
                found: version,
                supported: FORMAT_VERSION,
            });
        }
        let mut history = History::new();
        let mut records = Vec::new();
        while !reader.is_empty() {
            let kind_byte = reader.u8()?;
            let kind = EntityKind::from_u8(kind_byte).ok_or(SdbError::InvalidKind(kind_byte))?;
            let length = reader.u32()? as usize;
            let section = reader.bytes(length)?;
            let fields = read_fields(section, records.len(), &mut history)?;
            records.push(ServiceRecord { kind, fields });
        }
        Ok(records)
    }
}

/// Decodes one record's field section. Every literal field enters the
/// history table so later back-references can resolve against it.
fn read_fields(
    section: &[u8],
    record_index: usize,
    history: &mut History,
) -> Result<Vec<Field>, SdbError> {
    let mut reader = Reader::new(section);
    let mut fields = Vec::new();
    while !reader.is_empty() {
        let tag_byte = reader.u8()?;
        let Some(tag) = FieldTag::from_u8(tag_byte) else {
            log::debug!(
                "record {record_index}: skipping unknown field tag {tag_byte}, \
                 discarding the rest of the section"
            );
            break;
        };
        let field = match tag {
            FieldTag::Name => Some(Field::Name(read_text(&mut reader)?)),
            FieldTag::Description => Some(Field::Description(read_text(&mut reader)?)),
            FieldTag::Transport => {
                let value = reader.u8()?;
                let transport = Transport::from_u8(value);
                if transport.is_none() {
                    log::debug!("record {record_index}: skipping unknown transport {value}");
                }
                transport.map(Field::Transport)
            }
            FieldTag::Protocol => {
                let value = reader.u8()?;
                let protocol = Protocol::from_wire(value);
                if protocol.is_none() {
                    log::debug!("record {record_index}: skipping unknown protocol {value}");
                }
                protocol.map(Field::Protocol)
            }
            FieldTag::Host => match reader.u8()? {
                HOST_IPV4 => {
                    let octets = reader.bytes(4)?;
                    Some(Field::Host(Host::Ipv4(Ipv4Addr::new(
                        octets[0], octets[1], octets[2], octets[3],
                    ))))
                }
                HOST_IPV6 => return Err(SdbError::Ipv6Unsupported),
                HOST_NAMED => Some(Field::Host(Host::Named(read_text(&mut reader)?))),
                other => {
                    log::debug!(
                        "record {record_index}: skipping unknown host subtype {other}, \
                         discarding the rest of the section"
                    );
                    break;
                }
            },
            FieldTag::Port => Some(Field::Port(reader.u16()?)),
            FieldTag::Parameters => {
                let length = reader.u24()? as usize;
                Some(Field::Parameters(reader.bytes(length)?.to_vec()))
            }
            FieldTag::NameRef => Some(resolve_ref(&mut reader, history, FieldKind::Name)?),
            FieldTag::DescriptionRef => {
                Some(resolve_ref(&mut reader, history, FieldKind::Description)?)
            }
            FieldTag::HostRef => Some(resolve_ref(&mut reader, history, FieldKind::Host)?),
            FieldTag::PortRef => Some(resolve_ref(&mut reader, history, FieldKind::Port)?),
            FieldTag::ParametersRef => {
                Some(resolve_ref(&mut reader, history, FieldKind::Parameters)?)
            }
        };
        if let Some(field) = field {
            history.insert(&field, record_index);
            fields.push(field);
        }
    }
    Ok(fields)
}

/// Reads a back-reference payload and resolves it.
///
/// The encoded u16 index is read but deliberately not used: resolution
/// takes the first table entry of the matching kind, reproducing the
/// format's historical behavior.
fn resolve_ref(
    reader: &mut Reader<'_>,
    history: &History,
    kind: FieldKind,
) -> Result<Field, SdbError> {
    let _index = reader.u16()?;
    history
        .resolve(kind)
        .cloned()
        .ok_or(SdbError::DanglingReference)
}

fn read_text(reader: &mut Reader<'_>) -> Result<String, SdbError> {
    let length = reader.u16()? as usize;
    Ok(reader.utf8(length)?.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::DocumentEncoder;

    fn roundtrip(records: &[ServiceRecord]) -> Vec<ServiceRecord> {
        let bin = DocumentEncoder::new().encode(records).unwrap();
        DocumentDecoder::new().decode(&bin).unwrap()
    }

    #[test]
    fn version_gate() {
        let err = DocumentDecoder::new().decode(&[9]).unwrap_err();
        assert!(matches!(
            err,
            SdbError::VersionMismatch {
                found: 9,
                supported: FORMAT_VERSION
            }
        ));
    }

    #[test]
    fn empty_document_decodes_to_no_records() {
        assert_eq!(
            DocumentDecoder::new().decode(&[FORMAT_VERSION]).unwrap(),
            vec![]
        );
    }

    #[test]
    fn field_order_is_preserved() {
        let records = [ServiceRecord::new(EntityKind::Peer)
            .with(Field::Port(4040))
            .with(Field::Name("node".into()))
            .with(Field::Transport(Transport::WebRtc))];
        assert_eq!(roundtrip(&records), records);
    }

    #[test]
    fn truncated_frame_is_an_error() {
        let records = [ServiceRecord::new(EntityKind::Api).with(Field::Name("svc".into()))];
        let bin = DocumentEncoder::new().encode(&records).unwrap();
        let err = DocumentDecoder::new().decode(&bin[..bin.len() - 1]).unwrap_err();
        assert!(matches!(err, SdbError::Buffer(_)));
    }

    #[test]
    fn unknown_kind_byte_is_an_error() {
        let err = DocumentDecoder::new()
            .decode(&[FORMAT_VERSION, 7, 0, 0, 0, 0])
            .unwrap_err();
        assert!(matches!(err, SdbError::InvalidKind(7)));
    }

    #[test]
    fn unknown_field_tag_skips_rest_of_record_only() {
        // Record 1 carries an unknown tag after a valid name; record 2
        // must still decode.
        let mut doc = vec![FORMAT_VERSION];
        let section = [0u8, 0, 1, b'a', 42, 1, 2, 3];
        doc.push(0); // api
        doc.extend_from_slice(&(section.len() as u32).to_be_bytes());
        doc.extend_from_slice(&section);
        doc.push(2); // peer
        doc.extend_from_slice(&3u32.to_be_bytes());
        doc.extend_from_slice(&[5, 0x0f, 0xa0]); // port 4000
        let records = DocumentDecoder::new().decode(&doc).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].fields, vec![Field::Name("a".into())]);
        assert_eq!(records[1].fields, vec![Field::Port(4000)]);
    }

    #[test]
    fn unknown_transport_byte_is_skipped_in_place() {
        let mut doc = vec![FORMAT_VERSION, 0];
        let section = [2u8, 9, 5, 0x1f, 0x9a];
        doc.extend_from_slice(&(section.len() as u32).to_be_bytes());
        doc.extend_from_slice(&section);
        let records = DocumentDecoder::new().decode(&doc).unwrap();
        // The bogus transport is dropped; the port after it survives.
        assert_eq!(records[0].fields, vec![Field::Port(8090)]);
    }

    #[test]
    fn ipv6_subtype_is_rejected() {
        let doc = [FORMAT_VERSION, 0, 0, 0, 0, 2, 4, HOST_IPV6];
        let err = DocumentDecoder::new().decode(&doc).unwrap_err();
        assert!(matches!(err, SdbError::Ipv6Unsupported));
    }

    #[test]
    fn dangling_reference_is_an_error() {
        let doc = [FORMAT_VERSION, 0, 0, 0, 0, 3, FieldTag::NameRef as u8, 0, 0];
        let err = DocumentDecoder::new().decode(&doc).unwrap_err();
        assert!(matches!(err, SdbError::DanglingReference));
    }

    #[test]
    fn references_resolve_across_records() {
        let records = [
            ServiceRecord::new(EntityKind::Api)
                .with(Field::Name("svc".into()))
                .with(Field::Host(Host::parse("10.1.2.3"))),
            ServiceRecord::new(EntityKind::P2p)
                .with(Field::Name("svc".into()))
                .with(Field::Host(Host::parse("10.1.2.3"))),
        ];
        assert_eq!(roundtrip(&records), records);
    }
}
