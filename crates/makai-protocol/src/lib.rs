#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod block;
pub use block::{BlockRef, L2BlockRef};

mod output;
pub use output::{
    L1Status, OutputCommitment, OutputRange, OutputRootError, OutputRootProof, OutputSnapshot,
    OUTPUT_ROOT_VERSION_V0, OUTPUT_ROOT_VERSION_V1,
};

mod segments;
pub use segments::{Segments, SegmentsError};

mod challenge;
pub use challenge::{Challenge, ChallengeError, ChallengeStatus};
