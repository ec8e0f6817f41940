//! Export adapters for downstream consumers.

pub mod jsonl;
