//! # Transactions Wire Encoding
//!
//! The canonical string form of a block's transactions, frozen by spec §6
//! because it is part of the hash preimage every peer must reproduce
//! bit-for-bit: ops are joined by `{;}`, and each op is four fields joined
//! by `{,}` — `op`, `name`, `content`, `originator_id`. A `NoOp` op is
//! rendered as `"No-Op{,}{,}{,}<originator_id>"`.

use crate::entities::{OpKind, OpMsg};
use thiserror::Error;

const OP_SEP: &str = "{;}";
const FIELD_SEP: &str = "{,}";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WireError {
    #[error("operation record has {found} fields, expected 4")]
    WrongFieldCount { found: usize },
    #[error("unrecognized operation discriminator {0:?}")]
    UnknownOpKind(String),
}

/// Encodes a sequence of operations into the canonical transactions string.
///
/// Content bytes are rendered lossily if they are not valid UTF-8; in
/// practice every op's content originates from a JSON string at the
/// gateway, so this is exact for all traffic the gateway itself produces.
pub fn encode_transactions(ops: &[OpMsg]) -> String {
    ops.iter()
        .map(encode_one)
        .collect::<Vec<_>>()
        .join(OP_SEP)
}

fn encode_one(op: &OpMsg) -> String {
    let content = String::from_utf8_lossy(&op.content);
    format!(
        "{}{FIELD_SEP}{}{FIELD_SEP}{}{FIELD_SEP}{}",
        op.op.wire_token(),
        op.name,
        content,
        op.originator_id,
    )
}

/// Decodes the canonical transactions string back into operations.
///
/// An empty input decodes to an empty vector (the genesis block's
/// transactions string is `""`).
pub fn decode_transactions(payload: &str) -> Result<Vec<OpMsg>, WireError> {
    if payload.is_empty() {
        return Vec::new().into_iter().map(Ok).collect();
    }
    payload.split(OP_SEP).map(decode_one).collect()
}

fn decode_one(record: &str) -> Result<OpMsg, WireError> {
    let fields: Vec<&str> = record.split(FIELD_SEP).collect();
    if fields.len() != 4 {
        return Err(WireError::WrongFieldCount {
            found: fields.len(),
        });
    }
    let op = OpKind::from_wire_token(fields[0])
        .ok_or_else(|| WireError::UnknownOpKind(fields[0].to_string()))?;
    Ok(OpMsg {
        originator_id: fields[3].to_string(),
        sequence_id: 0,
        op,
        name: fields[1].to_string(),
        content: fields[2].as_bytes().to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_payload_decodes_to_empty() {
        assert_eq!(decode_transactions("").unwrap(), Vec::new());
    }

    #[test]
    fn noop_encodes_per_spec_literal() {
        let op = OpMsg::noop("M1".to_string());
        assert_eq!(encode_transactions(&[op]), "No-Op{,}{,}{,}M1");
    }

    #[test]
    fn round_trips_create_then_append() {
        let ops = vec![
            OpMsg {
                originator_id: "M1".to_string(),
                sequence_id: 1,
                op: OpKind::CreateFile,
                name: "a.txt".to_string(),
                content: Vec::new(),
            },
            OpMsg {
                originator_id: "M1".to_string(),
                sequence_id: 2,
                op: OpKind::AppendRec,
                name: "a.txt".to_string(),
                content: b"x".to_vec(),
            },
        ];
        let encoded = encode_transactions(&ops);
        let decoded = decode_transactions(&encoded).unwrap();
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0].op, OpKind::CreateFile);
        assert_eq!(decoded[0].name, "a.txt");
        assert_eq!(decoded[1].op, OpKind::AppendRec);
        assert_eq!(decoded[1].content, b"x");
    }

    #[test]
    fn malformed_field_count_is_rejected() {
        assert_eq!(
            decode_transactions("CreateFile{,}a.txt"),
            Err(WireError::WrongFieldCount { found: 2 })
        );
    }

    #[test]
    fn unknown_discriminator_is_rejected() {
        assert!(matches!(
            decode_transactions("Bogus{,}{,}{,}M1"),
            Err(WireError::UnknownOpKind(_))
        ));
    }
}
