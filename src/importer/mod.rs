// ==========================================
// Maintenance KPI Engine - Importer Layer
// ==========================================
// Raw sheet rows in, canonical record set out.
// ==========================================

pub mod derivation;
pub mod error;
pub mod field_mapper;
pub mod normalizer;

pub use derivation::DerivationService;
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper;
pub use normalizer::RecordNormalizer;
