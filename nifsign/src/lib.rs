#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub use nifsign_core::*;

#[cfg(feature = "nifcloud")]
pub mod nifcloud {
    pub use nifsign_nifcloud::*;
}
