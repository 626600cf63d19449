//! `sol!` bindings for the dispute contract.
//!
//! Only the calldata layout matters to the engine; the contract's internal semantics
//! stay opaque. The ABI structs here mirror the domain types in `makai-protocol`,
//! which remain the ones the engine reasons about.

#![allow(missing_docs)]

use alloy_sol_types::sol;

sol! {
    /// @notice The preimage of an output root: opened on chain when a fault proof is
    ///         submitted. V0 commitments hash the first four fields, V1 all five.
    #[derive(Default, Debug, PartialEq, Eq)]
    struct OutputRootProof {
        bytes32 version;
        bytes32 stateRoot;
        bytes32 withdrawalStorageRoot;
        bytes32 blockHash;
        bytes32 nextBlockHash;
    }

    /// @notice The public input of the ZK fault proof, derived from the faulty block's
    ///         header and transactions and scoped to the L2 chain id.
    #[derive(Default, Debug, PartialEq, Eq)]
    struct PublicInput {
        uint256 chainId;
        bytes32 parentHash;
        uint64 blockNumber;
        uint64 timestamp;
        bytes32 stateRoot;
        bytes32 blockHash;
        bytes32[] txHashes;
    }

    /// @notice An output submission recorded by the contract.
    #[derive(Default, Debug, PartialEq, Eq)]
    struct OutputProposal {
        bytes32 outputRoot;
        uint256 l2BlockNumber;
    }

    /// @notice The in-progress challenge record. `segStart`/`segSize` bound the block
    ///         range the current `segments` array subdivides.
    #[derive(Default, Debug, PartialEq, Eq)]
    struct Challenge {
        uint256 id;
        uint256 outputIndex;
        address asserter;
        address challenger;
        uint8 turn;
        uint256 segStart;
        uint256 segSize;
        bytes32[] segments;
    }

    #[sol(rpc)]
    interface ITribunal {
        function nextOutputIndex() external view returns (uint256);
        function outputAt(uint256 _outputIndex) external view returns (OutputProposal memory);
        function submissionInterval() external view returns (uint256);
        function finalizationPeriod() external view returns (uint256);
        function isChallengeInProgress() external view returns (bool);
        function isRelated(address _address) external view returns (bool);
        function statusInProgress() external view returns (uint8);
        function challengeInProgress() external view returns (Challenge memory);
        function sectionsForTurn(uint8 _turn) external view returns (uint256);

        function createChallenge(uint256 _outputIndex, bytes32[] calldata _segments) external;
        function bisect(uint256 _position, bytes32[] calldata _segments) external;
        function asserterTimeout() external;
        function challengerTimeout(uint256 _challengeId) external;
        function proveFault(
            uint256 _position,
            OutputRootProof calldata _srcProof,
            OutputRootProof calldata _dstProof,
            PublicInput calldata _publicInput,
            bytes calldata _headerRlp,
            uint256[] calldata _proof,
            uint256[] calldata _pair
        ) external;
    }
}

impl From<makai_protocol::OutputRootProof> for OutputRootProof {
    fn from(proof: makai_protocol::OutputRootProof) -> Self {
        Self {
            version: proof.version,
            stateRoot: proof.state_root,
            withdrawalStorageRoot: proof.withdrawal_storage_root,
            blockHash: proof.block_hash,
            nextBlockHash: proof.next_block_hash,
        }
    }
}
