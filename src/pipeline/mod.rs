// Data processing pipeline: post assembly, dedup-guarded insertion, storage

pub mod ingest;
pub mod processing;
pub mod storage;
