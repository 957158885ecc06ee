//! RLP encoding of [`MultiGas`].
//!
//! A value is encoded as the list `[total, refund, gas[0], .., gas[N-1]]`, with the dimensions in
//! [`ResourceKind`](crate::ResourceKind) ordinal order. The set of dimensions has grown over time,
//! so decoding accepts payloads written by older and newer versions:
//!
//! - dimensions missing from the end of the payload decode as zero;
//! - dimensions beyond [`NUM_RESOURCE_KIND`] are skipped.
//!
//! The decoded `total` is the one stored in the payload.

use alloy_rlp::{BufMut, Decodable, Encodable, Error as RlpError, Header};

use crate::{MultiGas, NUM_RESOURCE_KIND};

impl MultiGas {
    fn rlp_payload_length(&self) -> usize {
        self.total().length()
            + self.refund().length()
            + self.dimensions().iter().map(Encodable::length).sum::<usize>()
    }
}

impl Encodable for MultiGas {
    fn encode(&self, out: &mut dyn BufMut) {
        Header { list: true, payload_length: self.rlp_payload_length() }.encode(out);
        self.total().encode(out);
        self.refund().encode(out);
        for amount in self.dimensions() {
            amount.encode(out);
        }
    }

    fn length(&self) -> usize {
        let payload_length = self.rlp_payload_length();
        payload_length + alloy_rlp::length_of_length(payload_length)
    }
}

impl Decodable for MultiGas {
    fn decode(buf: &mut &[u8]) -> alloy_rlp::Result<Self> {
        let header = Header::decode(buf)?;
        if !header.list {
            return Err(RlpError::UnexpectedString);
        }
        if buf.len() < header.payload_length {
            return Err(RlpError::InputTooShort);
        }
        let (mut payload, rest) = buf.split_at(header.payload_length);

        let total = u64::decode(&mut payload)?;
        let refund = u64::decode(&mut payload)?;

        let mut gas = [0u64; NUM_RESOURCE_KIND];
        for amount in &mut gas {
            if payload.is_empty() {
                break;
            }
            *amount = u64::decode(&mut payload)?;
        }

        // Dimensions added by a newer version.
        while !payload.is_empty() {
            let item = Header::decode(&mut payload)?;
            if payload.len() < item.payload_length {
                return Err(RlpError::InputTooShort);
            }
            payload = &payload[item.payload_length..];
        }

        *buf = rest;
        Ok(Self::from_parts(gas, total, refund))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::{Pair, ResourceKind};

    fn roundtrip(gas: MultiGas) -> MultiGas {
        let encoded = alloy_rlp::encode(gas);
        assert_eq!(encoded.len(), gas.length());
        MultiGas::decode(&mut encoded.as_slice()).unwrap()
    }

    #[rstest]
    #[case::zero(MultiGas::ZERO)]
    #[case::single(MultiGas::storage_growth_gas(20_000))]
    #[case::multi_with_refund(
        MultiGas::from_pairs([
            Pair::new(ResourceKind::Computation, 21_000),
            Pair::new(ResourceKind::StorageAccess, 2_100),
            Pair::new(ResourceKind::L2Calldata, 320),
            Pair::new(ResourceKind::WasmComputation, u64::MAX - 30_000),
        ])
        .with_refund(4_800)
    )]
    fn test_roundtrip(#[case] gas: MultiGas) {
        assert_eq!(roundtrip(gas), gas);
    }

    #[test]
    fn test_layout() {
        let gas = MultiGas::computation_gas(10).with_refund(3);
        let expected = alloy_rlp::encode(vec![10u64, 3, 0, 10, 0, 0, 0, 0, 0, 0]);
        assert_eq!(alloy_rlp::encode(gas), expected);
    }

    #[test]
    fn test_decode_fewer_dimensions_zero_fills() {
        // Written when only five dimensions existed.
        let encoded = alloy_rlp::encode(vec![60u64, 7, 5, 10, 20, 25, 0]);
        let gas = MultiGas::decode(&mut encoded.as_slice()).unwrap();
        assert_eq!(gas.get(ResourceKind::Unknown), 5);
        assert_eq!(gas.get(ResourceKind::Computation), 10);
        assert_eq!(gas.get(ResourceKind::HistoryGrowth), 20);
        assert_eq!(gas.get(ResourceKind::StorageAccess), 25);
        assert_eq!(gas.get(ResourceKind::StorageGrowth), 0);
        assert_eq!(gas.get(ResourceKind::L1Calldata), 0);
        assert_eq!(gas.get(ResourceKind::WasmComputation), 0);
        assert_eq!(gas.total(), 60);
        assert_eq!(gas.refund(), 7);
    }

    #[test]
    fn test_decode_only_total_and_refund() {
        let encoded = alloy_rlp::encode(vec![0u64, 9]);
        let gas = MultiGas::decode(&mut encoded.as_slice()).unwrap();
        assert_eq!(gas, MultiGas::ZERO.with_refund(9));
    }

    #[test]
    fn test_decode_extra_dimensions_skipped() {
        let mut fields = vec![36u64, 0, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, u64::MAX];
        let encoded = alloy_rlp::encode(fields.clone());
        let gas = MultiGas::decode(&mut encoded.as_slice()).unwrap();
        for (i, kind) in ResourceKind::ALL.into_iter().enumerate() {
            assert_eq!(gas.get(kind), i as u64);
        }
        assert_eq!(gas.total(), 36);

        // Trailing data after the list is left in the buffer.
        fields.truncate(4);
        let mut with_tail = alloy_rlp::encode(fields);
        with_tail.push(0x05);
        let mut buf = with_tail.as_slice();
        MultiGas::decode(&mut buf).unwrap();
        assert_eq!(buf, &[0x05]);
    }

    #[rstest]
    #[case::empty_list(alloy_rlp::encode(Vec::<u64>::new()))]
    #[case::missing_refund(alloy_rlp::encode(vec![1u64]))]
    #[case::not_a_list(alloy_rlp::encode(42u64))]
    #[case::truncated(alloy_rlp::encode(vec![1u64, 2, 3])[..3].to_vec())]
    fn test_decode_rejects_malformed(#[case] encoded: Vec<u8>) {
        assert!(MultiGas::decode(&mut encoded.as_slice()).is_err());
    }
}
