// copyscan: sentence-level overlap detection
//
// This is the library root. Each module corresponds to a stage of a check:
// ingest a file, tokenize it, compare it against the corpus, report.

pub mod config;
pub mod corpus;
pub mod ingest;
pub mod output;
pub mod pipeline;
pub mod report;
pub mod similarity;
pub mod text;
