//! PubMed E-utilities access and EFetch record extraction

pub mod client;
pub mod models;
pub mod parser;
pub mod responses;

pub use client::PubMedClient;
pub use models::{Author, PaperRecord, PublicationDate};
pub use parser::{Extraction, extract_papers};
