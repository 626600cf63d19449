//! Block reference types.

use alloy_eips::BlockNumHash;
use alloy_primitives::B256;

/// A minimal reference to a block: its hash, number, parent hash and timestamp.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq, Default)]
pub struct BlockRef {
    /// The block hash
    pub hash: B256,
    /// The block number
    #[cfg_attr(feature = "serde", serde(with = "alloy_serde::quantity"))]
    pub number: u64,
    /// The parent block hash
    pub parent_hash: B256,
    /// The block timestamp
    #[cfg_attr(feature = "serde", serde(with = "alloy_serde::quantity"))]
    pub timestamp: u64,
}

impl BlockRef {
    /// Instantiates a new [BlockRef].
    pub const fn new(hash: B256, number: u64, parent_hash: B256, timestamp: u64) -> Self {
        Self { hash, number, parent_hash, timestamp }
    }

    /// Returns the block ID.
    pub const fn id(&self) -> BlockNumHash {
        BlockNumHash { hash: self.hash, number: self.number }
    }
}

impl core::fmt::Display for BlockRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "BlockRef {{ hash: {}, number: {}, parent_hash: {}, timestamp: {} }}",
            self.hash, self.number, self.parent_hash, self.timestamp
        )
    }
}

/// A reference to an L2 block together with its L1 anchor.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct L2BlockRef {
    /// The base [BlockRef]
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub block_ref: BlockRef,
    /// The L1 origin [BlockNumHash]
    pub l1_origin: BlockNumHash,
    /// The sequence number of the L2 block relative to its L1 origin
    #[cfg_attr(
        feature = "serde",
        serde(with = "alloy_serde::quantity", rename = "sequenceNumber", alias = "seqNum")
    )]
    pub seq_num: u64,
}

impl L2BlockRef {
    /// Instantiates a new [L2BlockRef].
    pub const fn new(block_ref: BlockRef, l1_origin: BlockNumHash, seq_num: u64) -> Self {
        Self { block_ref, l1_origin, seq_num }
    }

    /// Returns the hash of the referenced L2 block.
    pub const fn hash(&self) -> B256 {
        self.block_ref.hash
    }

    /// Returns the number of the referenced L2 block.
    pub const fn number(&self) -> u64 {
        self.block_ref.number
    }
}

impl core::fmt::Display for L2BlockRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "L2BlockRef {{ hash: {}, number: {}, l1_origin: {}, seq_num: {} }}",
            self.block_ref.hash, self.block_ref.number, self.l1_origin.hash, self.seq_num
        )
    }
}
