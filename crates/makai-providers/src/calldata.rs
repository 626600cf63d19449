//! Unsigned transaction construction for dispute contract writes.
//!
//! The engine never signs or submits anything itself; each builder packs one contract
//! call into a [TxCandidate] for the transaction-management collaborator.

use crate::{
    bindings::{ITribunal, OutputRootProof, PublicInput},
    ProofAndPair,
};
use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::SolCall;

/// An unsigned transaction descriptor: target address plus ABI-encoded calldata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxCandidate {
    /// The transaction target.
    pub to: Address,
    /// The ABI-encoded calldata.
    pub data: Bytes,
}

/// Builds the `createChallenge` transaction disputing the output at `output_index`
/// with the first round's segments.
pub fn create_challenge(contract: Address, output_index: u64, hashes: Vec<B256>) -> TxCandidate {
    let call = ITribunal::createChallengeCall {
        _outputIndex: U256::from(output_index),
        _segments: hashes,
    };
    TxCandidate { to: contract, data: call.abi_encode().into() }
}

/// Builds the `bisect` transaction answering the current turn: the disputed position
/// in the previous round's segments and the next round's segments over it.
pub fn bisect(contract: Address, position: u64, hashes: Vec<B256>) -> TxCandidate {
    let call = ITribunal::bisectCall { _position: U256::from(position), _segments: hashes };
    TxCandidate { to: contract, data: call.abi_encode().into() }
}

/// Builds the `asserterTimeout` claim transaction.
pub fn asserter_timeout(contract: Address) -> TxCandidate {
    TxCandidate { to: contract, data: ITribunal::asserterTimeoutCall {}.abi_encode().into() }
}

/// Builds the `challengerTimeout` claim transaction for `challenge_id`.
pub fn challenger_timeout(contract: Address, challenge_id: U256) -> TxCandidate {
    let call = ITribunal::challengerTimeoutCall { _challengeId: challenge_id };
    TxCandidate { to: contract, data: call.abi_encode().into() }
}

/// Builds the final `proveFault` transaction.
#[allow(clippy::too_many_arguments)]
pub fn prove_fault(
    contract: Address,
    position: u64,
    src_proof: OutputRootProof,
    dst_proof: OutputRootProof,
    public_input: PublicInput,
    header_rlp: Bytes,
    artifact: ProofAndPair,
) -> TxCandidate {
    let call = ITribunal::proveFaultCall {
        _position: U256::from(position),
        _srcProof: src_proof,
        _dstProof: dst_proof,
        _publicInput: public_input,
        _headerRlp: header_rlp,
        _proof: artifact.proof,
        _pair: artifact.pair,
    };
    TxCandidate { to: contract, data: call.abi_encode().into() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contract() -> Address {
        Address::with_last_byte(0x11)
    }

    #[test]
    fn test_create_challenge_roundtrip() {
        let hashes = vec![B256::with_last_byte(1), B256::with_last_byte(2)];
        let candidate = create_challenge(contract(), 10, hashes.clone());
        assert_eq!(candidate.to, contract());
        assert_eq!(&candidate.data[..4], ITribunal::createChallengeCall::SELECTOR);

        let decoded = ITribunal::createChallengeCall::abi_decode(&candidate.data).unwrap();
        assert_eq!(decoded._outputIndex, U256::from(10));
        assert_eq!(decoded._segments, hashes);
    }

    #[test]
    fn test_bisect_roundtrip() {
        let hashes = vec![B256::with_last_byte(3), B256::with_last_byte(4)];
        let candidate = bisect(contract(), 1, hashes.clone());
        let decoded = ITribunal::bisectCall::abi_decode(&candidate.data).unwrap();
        assert_eq!(decoded._position, U256::from(1));
        assert_eq!(decoded._segments, hashes);
    }

    #[test]
    fn test_timeout_claims() {
        let candidate = asserter_timeout(contract());
        assert_eq!(&candidate.data[..], ITribunal::asserterTimeoutCall::SELECTOR);

        let candidate = challenger_timeout(contract(), U256::from(7));
        let decoded = ITribunal::challengerTimeoutCall::abi_decode(&candidate.data).unwrap();
        assert_eq!(decoded._challengeId, U256::from(7));
    }

    #[test]
    fn test_prove_fault_roundtrip() {
        let src_proof = OutputRootProof {
            version: B256::ZERO,
            stateRoot: B256::with_last_byte(1),
            withdrawalStorageRoot: B256::with_last_byte(2),
            blockHash: B256::with_last_byte(3),
            nextBlockHash: B256::with_last_byte(4),
        };
        let dst_proof = OutputRootProof { blockHash: B256::with_last_byte(4), ..src_proof };
        let public_input = PublicInput {
            chainId: U256::from(2358),
            parentHash: B256::with_last_byte(3),
            blockNumber: 1001,
            timestamp: 1700000002,
            stateRoot: B256::with_last_byte(5),
            blockHash: B256::with_last_byte(4),
            txHashes: vec![B256::with_last_byte(6)],
        };
        let artifact =
            ProofAndPair { proof: vec![U256::from(1), U256::from(2)], pair: vec![U256::from(3)] };

        let candidate = prove_fault(
            contract(),
            0,
            src_proof.clone(),
            dst_proof.clone(),
            public_input.clone(),
            Bytes::from_static(b"\x01\x02"),
            artifact.clone(),
        );
        let decoded = ITribunal::proveFaultCall::abi_decode(&candidate.data).unwrap();
        assert_eq!(decoded._position, U256::ZERO);
        assert_eq!(decoded._srcProof, src_proof);
        assert_eq!(decoded._dstProof, dst_proof);
        assert_eq!(decoded._publicInput, public_input);
        assert_eq!(decoded._headerRlp, Bytes::from_static(b"\x01\x02"));
        assert_eq!(decoded._proof, artifact.proof);
        assert_eq!(decoded._pair, artifact.pair);
    }
}
